// ============================================================================
// PLATAFORMA WEB - fetch (gloo-net), sessionStorage e History (web-sys)
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use web_sys::{window, Storage};

use super::{HttpRequest, HttpResponse, HttpTransport, Method, Navigator, TokenStorage};
use crate::router::Route;

/// Evento que se dispara en `window` tras cada cambio de ruta
pub const ROUTE_CHANGE_EVENT: &str = "routechange";

/// Transporte HTTP sobre fetch
#[derive(Clone, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("Accept", "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| format!("Serialization error: {}", e))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body = if text.trim().is_empty() {
            None
        } else {
            // Cuerpos no-JSON se conservan como string
            Some(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
        };

        Ok(HttpResponse { status, body })
    }
}

/// sessionStorage: se borra al cerrar la pestaña
#[derive(Clone, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage(&self) -> Result<Storage, String> {
        window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .ok_or_else(|| "No se pudo acceder a sessionStorage".to_string())
    }
}

impl TokenStorage for BrowserSessionStorage {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        self.storage()?
            .get_item(key)
            .map_err(|_| "Error leyendo sessionStorage".to_string())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| "Error guardando en sessionStorage".to_string())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| "Error eliminando de sessionStorage".to_string())
    }
}

/// Navegación con History API + evento `routechange`
#[derive(Clone, Default)]
pub struct BrowserNavigator {
    /// Generación del redirect diferido vigente; subirla anula los anteriores
    redirect: Rc<Cell<u64>>,
}

impl BrowserNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ruta actual según `location.pathname`
    pub fn current_path() -> String {
        window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
}

fn go(path: &str, replace: bool) {
    let Some(win) = window() else {
        log::error!("❌ [NAV] No hay window");
        return;
    };
    let history = match win.history() {
        Ok(h) => h,
        Err(e) => {
            log::error!("❌ [NAV] History no disponible: {:?}", e);
            return;
        }
    };
    let result = if replace {
        history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
    } else {
        history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::error!("❌ [NAV] Error navegando a {}: {:?}", path, e);
        return;
    }
    if let Ok(event) = web_sys::Event::new(ROUTE_CHANGE_EVENT) {
        let _ = win.dispatch_event(&event);
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, route: &Route, replace: bool) {
        log::info!("🧭 [NAV] {} {}", if replace { "replace" } else { "push" }, route.path());
        self.cancel_pending();
        go(&route.path(), replace);
    }

    fn navigate_after(&self, route: &Route, delay_ms: u32) {
        let path = route.path();
        log::info!("⏰ [NAV] {} en {} ms", path, delay_ms);
        let generation = self.redirect.get().wrapping_add(1);
        self.redirect.set(generation);
        let current = self.redirect.clone();
        // El callback no suelta su propio Timeout: se comprueba la generación
        Timeout::new(delay_ms, move || {
            if current.get() == generation {
                go(&path, false);
            } else {
                log::debug!("⏰ [NAV] Redirect a {} anulado", path);
            }
        })
        .forget();
    }

    fn cancel_pending(&self) {
        self.redirect.set(self.redirect.get().wrapping_add(1));
    }
}
