// ============================================================================
// ERROR CLASSIFIER - Resultado HTTP → mensaje para el usuario
// ============================================================================
// Precedencia:
//   1. Sin respuesta (red)                 → reintentar más tarde
//   2. 401/422 en /login, 401 en /register → credenciales incorrectas
//   3. 422 con `errors`                    → primer mensaje del primer campo
//   4. 403                                 → sin permiso
//   5. 404                                 → no existe (delete: éxito)
//   6. 429                                 → demasiados intentos
//   7. Cualquier otra cosa                 → reintentar más tarde
// Un 401 fuera de auth es una sesión caducada.
// ============================================================================

use serde_json::Value;

use crate::error::ClientError;

pub const MSG_RETRY_LATER: &str = "Ha ocurrido un error. Intentalo de nuevo mas tarde.";
pub const MSG_INVALID_CREDENTIALS: &str = "Email o contrasena incorrectos.";
pub const MSG_CHECK_FIELDS: &str = "Datos incorrectos. Revisa los campos e intentalo de nuevo.";
pub const MSG_FORBIDDEN: &str = "No tienes permiso para realizar esta accion.";
pub const MSG_NOT_FOUND: &str = "La receta no existe o ha sido eliminada.";
pub const MSG_RATE_LIMITED: &str = "Demasiados intentos. Espera un momento antes de volver a intentarlo.";
pub const MSG_SESSION_EXPIRED: &str = "Tu sesion ha caducado. Inicia sesion de nuevo.";

/// Fallo de una llamada al backend
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// No hubo respuesta
    Network(String),
    /// Respuesta no-2xx
    Status { status: u16, body: Option<Value> },
    /// 2xx con un cuerpo que no encaja
    Decode(String),
    /// Llamada autenticada sin token: no llega a salir
    MissingToken,
}

impl ApiFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Flujo que originó la llamada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Login,
    Register,
    Logout,
    FetchList,
    FetchRecipe,
    Edit,
    Delete,
}

impl Flow {
    fn is_auth(self) -> bool {
        matches!(self, Flow::Login | Flow::Register)
    }
}

pub fn classify(flow: Flow, failure: &ApiFailure) -> ClientError {
    let (status, body) = match failure {
        ApiFailure::Network(_) | ApiFailure::Decode(_) => {
            return ClientError::Transient(MSG_RETRY_LATER.to_string());
        }
        ApiFailure::MissingToken => {
            return ClientError::SessionExpired(MSG_SESSION_EXPIRED.to_string());
        }
        ApiFailure::Status { status, body } => (*status, body.as_ref()),
    };

    match status {
        401 if flow.is_auth() => ClientError::Auth(MSG_INVALID_CREDENTIALS.to_string()),
        422 if flow == Flow::Login => ClientError::Auth(MSG_INVALID_CREDENTIALS.to_string()),
        401 => ClientError::SessionExpired(MSG_SESSION_EXPIRED.to_string()),
        422 => ClientError::Unprocessable(
            first_field_error(body).unwrap_or_else(|| MSG_CHECK_FIELDS.to_string()),
        ),
        403 => ClientError::Permission(MSG_FORBIDDEN.to_string()),
        404 => ClientError::NotFound(MSG_NOT_FOUND.to_string()),
        429 => ClientError::RateLimited(MSG_RATE_LIMITED.to_string()),
        _ => ClientError::Transient(MSG_RETRY_LATER.to_string()),
    }
}

/// Primer mensaje del primer campo de `{ "errors": { campo: [msg, ...] } }`
fn first_field_error(body: Option<&Value>) -> Option<String> {
    let (_, first) = body?.get("errors")?.as_object()?.iter().next()?;
    let message = match first {
        Value::Array(messages) => match messages.first()? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => return None,
        other => other.to_string(),
    };
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(code: u16, body: Option<Value>) -> ApiFailure {
        ApiFailure::Status { status: code, body }
    }

    #[test]
    fn field_error_body_yields_first_message() {
        let failure = status(422, Some(json!({"errors": {"email": ["ya existe"]}})));
        assert_eq!(classify(Flow::Register, &failure).message(), "ya existe");
        assert_eq!(classify(Flow::Edit, &failure).message(), "ya existe");
    }

    #[test]
    fn field_order_follows_server() {
        let failure = status(
            422,
            Some(json!({"errors": {"titulo": ["muy largo", "otro"], "foto": ["url mala"]}})),
        );
        assert_eq!(classify(Flow::Edit, &failure).message(), "muy largo");
    }

    #[test]
    fn unprocessable_without_errors_is_generic() {
        let failure = status(422, Some(json!({"message": "The given data was invalid."})));
        assert_eq!(
            classify(Flow::Edit, &failure),
            ClientError::Unprocessable(MSG_CHECK_FIELDS.to_string())
        );
    }

    #[test]
    fn login_failures_are_invalid_credentials() {
        for code in [401, 422] {
            let failure = status(code, Some(json!({"errors": {"email": ["x"]}})));
            assert_eq!(
                classify(Flow::Login, &failure),
                ClientError::Auth(MSG_INVALID_CREDENTIALS.to_string())
            );
        }
        assert_eq!(
            classify(Flow::Register, &status(401, None)),
            ClientError::Auth(MSG_INVALID_CREDENTIALS.to_string())
        );
    }

    #[test]
    fn status_table() {
        assert_eq!(classify(Flow::Delete, &status(403, None)).message(), MSG_FORBIDDEN);
        assert_eq!(classify(Flow::FetchRecipe, &status(404, None)).message(), MSG_NOT_FOUND);
        for flow in [Flow::Login, Flow::Register, Flow::FetchList, Flow::Edit, Flow::Delete] {
            assert_eq!(classify(flow, &status(429, None)).message(), MSG_RATE_LIMITED);
            assert_eq!(classify(flow, &status(500, None)).message(), MSG_RETRY_LATER);
        }
        assert!(classify(Flow::Edit, &status(401, None)).is_session_expired());
    }

    #[test]
    fn network_and_decode_failures_ask_to_retry() {
        let network = ApiFailure::Network("Failed to fetch".into());
        assert_eq!(
            classify(Flow::Login, &network),
            ClientError::Transient(MSG_RETRY_LATER.to_string())
        );
        assert_eq!(
            classify(Flow::FetchRecipe, &ApiFailure::Decode("bad".into())).message(),
            MSG_RETRY_LATER
        );
        assert!(classify(Flow::FetchList, &ApiFailure::MissingToken).is_session_expired());
    }
}
