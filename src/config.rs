use serde::{Deserialize, Serialize};

use crate::utils::constants::{BACKEND_URL, REDIRECT_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Espera antes de volver al listado tras guardar (ms)
    pub redirect_delay_ms: u32,
    /// Un 401 en una llamada autenticada fuerza logout + redirect a /
    pub logout_on_unauthorized: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            redirect_delay_ms: REDIRECT_DELAY_MS,
            logout_on_unauthorized: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: defaults.backend_url,
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            redirect_delay_ms: option_env!("REDIRECT_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redirect_delay_ms),
            logout_on_unauthorized: option_env!("LOGOUT_ON_UNAUTHORIZED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.logout_on_unauthorized),
        }
    }

    /// Config apuntando a otro backend (tests, entornos de preview)
    pub fn with_backend(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Self::default()
        }
    }

    /// URL absoluta de un endpoint relativo (`/recipes/1`)
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
