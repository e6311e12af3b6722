// ============================================================================
// VALIDATION - Sanitizado y validación de inputs (funciones puras)
// ============================================================================
// Se evalúan en cada cambio de campo y se re-chequean al enviar.
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::utils::constants::{MAX_PASSWORD, MIN_NAME, MIN_PASSWORD};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();
    static ref LONG_WHITESPACE_RE: Regex = Regex::new(r"\s{3,}").unwrap();
    static ref ANY_WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Estado de validación de un campo.
///
/// `Unchecked` significa que el usuario todavía no ha tocado el campo: no se
/// muestra error aunque el valor sea inválido.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Unchecked,
    Invalid(String),
    Valid,
}

impl FieldState {
    /// Estado visible en pantalla: solo se chequea si el campo fue tocado
    pub fn evaluate(touched: bool, result: Result<(), String>) -> Self {
        if touched {
            Self::check(result)
        } else {
            FieldState::Unchecked
        }
    }

    /// Chequeo incondicional (usado al enviar)
    pub fn check(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => FieldState::Valid,
            Err(msg) => FieldState::Invalid(msg),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldState::Invalid(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid(_))
    }
}

/// Quita espacios iniciales y colapsa 3+ espacios seguidos a exactamente 2
pub fn sanitize(value: &str) -> String {
    LONG_WHITESPACE_RE
        .replace_all(value, "  ")
        .trim_start()
        .to_string()
}

/// Elimina cualquier espacio (inputs de email y URL)
pub fn strip_whitespace(value: &str) -> String {
    ANY_WHITESPACE_RE.replace_all(value, "").into_owned()
}

/// Trunca a `max` caracteres (no bytes)
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(&normalize_email(value))
}

pub fn validate_email(value: &str) -> Result<(), String> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Introduce un email valido.".to_string())
    }
}

pub fn validate_name(value: &str) -> Result<(), String> {
    if value.trim().chars().count() >= MIN_NAME {
        Ok(())
    } else {
        Err(format!("El nombre debe tener al menos {} caracteres.", MIN_NAME))
    }
}

pub fn validate_password(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < MIN_PASSWORD {
        return Err(format!("La contrasena debe tener al menos {} caracteres.", MIN_PASSWORD));
    }
    if len > MAX_PASSWORD {
        return Err(format!("La contrasena no puede superar {} caracteres.", MAX_PASSWORD));
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if password == confirmation {
        Ok(())
    } else {
        Err("Las contrasenas no coinciden.".to_string())
    }
}

/// URL de foto: vacía es válida; si no, absoluta y con esquema http/https
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

pub fn validate_photo_url(value: &str) -> Result<(), String> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err("La URL de la imagen no es valida (debe empezar por http:// o https://).".to_string())
    }
}
