// ============================================================================
// FOODSYNK WEB - Núcleo del cliente (Rust + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Models: Estructuras compartidas con backend
// - Services: SOLO comunicación API + clasificación de errores
// - State: Sesión y estado de pantallas con Rc<RefCell>
// - ViewModels: Flujos de login, listado, edición y borrado
// - Platform: fetch / sessionStorage / History detrás de traits
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod test_utils;

pub use app::{App, Screen};
pub use config::{AppConfig, CONFIG};
pub use error::ClientError;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::{App, Screen};
    use crate::config::CONFIG;
    use crate::platform::web::{
        BrowserNavigator, BrowserSessionStorage, FetchTransport, ROUTE_CHANGE_EVENT,
    };

    // Instancia global de la app y pantalla montada
    thread_local! {
        static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
        static SCREEN: RefCell<Option<Screen>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Warn
        };
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("🚀 Foodsynk - Rust + MVVM ({})", CONFIG.environment);

        let app = App::new(
            CONFIG.clone(),
            Rc::new(FetchTransport),
            Rc::new(BrowserSessionStorage),
            Rc::new(BrowserNavigator::new()),
        );
        APP.with(|cell| *cell.borrow_mut() = Some(Rc::new(app)));

        // El guard se re-evalúa en cada navegación: push/replace propios
        // (routechange) y atrás/adelante del navegador (popstate)
        if let Some(win) = web_sys::window() {
            for event in [ROUTE_CHANGE_EVENT, "popstate"] {
                let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    handle_route();
                }) as Box<dyn FnMut(web_sys::Event)>);
                win.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
                // Listener registrado una sola vez en el arranque
                closure.forget();
            }
        }

        handle_route();
        Ok(())
    }

    fn handle_route() {
        let Some(app) = APP.with(|cell| cell.borrow().clone()) else {
            log::warn!("⚠️ [APP] App no está inicializada");
            return;
        };

        if let Some(previous) = SCREEN.with(|cell| cell.borrow_mut().take()) {
            previous.unmount();
        }

        let path = BrowserNavigator::current_path();
        if let Some(screen) = app.enter(&path) {
            SCREEN.with(|cell| *cell.borrow_mut() = Some(screen.clone()));
            wasm_bindgen_futures::spawn_local(async move {
                screen.activate().await;
            });
        }
    }

    /// Ruta actual, para la capa de vista en JavaScript
    #[wasm_bindgen]
    pub fn current_route() -> String {
        BrowserNavigator::current_path()
    }

    /// Cerrar sesión desde la navbar
    #[wasm_bindgen]
    pub fn logout() {
        let Some(app) = APP.with(|cell| cell.borrow().clone()) else {
            return;
        };
        let ctx = app.context();
        wasm_bindgen_futures::spawn_local(async move {
            crate::viewmodels::logout(&ctx).await;
        });
    }
}
