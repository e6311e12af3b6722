// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::platform::TokenStorage;
use crate::state::SessionState;

/// Estado compartido por todas las pantallas. Se pasa por referencia/clon,
/// no hay estado global mutable.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub config: Rc<AppConfig>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new(config: AppConfig, storage: Rc<dyn TokenStorage>) -> Self {
        Self {
            session: SessionState::new(storage),
            config: Rc::new(config),
        }
    }
}
