// Módulo de plataforma con implementaciones específicas por target

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod memory;

// Traits comunes para todas las plataformas
pub mod traits;

pub use traits::*;
