/// URL base del backend
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:8000/api (por defecto)
/// - Producción: via BACKEND_URL env var
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

/// Clave de sessionStorage donde vive el token
pub const TOKEN_STORAGE_KEY: &str = "token";

// Límites de campos de receta (en caracteres)
pub const MAX_TITULO: usize = 150;
pub const MAX_TIEMPO: usize = 50;
pub const MAX_PASOS: usize = 5000;
pub const MAX_FOTO_URL: usize = 500;

// Límites de formularios de auth
pub const MAX_NAME: usize = 60;
pub const MAX_EMAIL: usize = 120;
pub const MIN_NAME: usize = 2;
pub const MIN_PASSWORD: usize = 6;
pub const MAX_PASSWORD: usize = 72;

/// Espera antes de volver a "Mis recetas" tras guardar (ms)
pub const REDIRECT_DELAY_MS: u32 = 1200;
