use thiserror::Error;

/// Errores que llegan a la pantalla. `Display` es el mensaje para el usuario.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Validación local, nunca sale a la red
    #[error("{0}")]
    Validation(String),

    /// 401/422 en el login: la sesión no se establece
    #[error("{0}")]
    Auth(String),

    /// 422 con errores de campo devueltos por el backend
    #[error("{0}")]
    Unprocessable(String),

    /// 403: el token sigue siendo válido, la acción no
    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    RateLimited(String),

    /// 401 en una llamada autenticada, o no hay token
    #[error("{0}")]
    SessionExpired(String),

    /// Red caída, 5xx o respuesta ilegible
    #[error("{0}")]
    Transient(String),
}

impl ClientError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
