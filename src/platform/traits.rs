use async_trait::async_trait;
use serde_json::Value;

use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request HTTP independiente de la plataforma
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Respuesta cruda: status + cuerpo JSON si lo hay
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP. `Err` significa que no hubo respuesta (red caída, CORS...)
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// Almacenamiento síncrono del token (sessionStorage en el navegador)
pub trait TokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>, String>;
    fn save(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Navegación entre pantallas
pub trait Navigator {
    /// Navegar ya. `replace` reemplaza la entrada actual del historial
    fn navigate(&self, route: &Route, replace: bool);

    /// Navegar tras `delay_ms` (mensaje de éxito visible mientras tanto)
    fn navigate_after(&self, route: &Route, delay_ms: u32);

    /// Anular el `navigate_after` pendiente, si lo hay
    fn cancel_pending(&self);
}
