// ============================================================================
// VIEWMODELS - Flujos de pantalla
// ============================================================================
// Cada ViewModel es un handle clonable: el estado vive en Rc<RefCell<_>> y
// nunca se mantiene un borrow a través de un `.await`.
// ============================================================================

pub mod auth_viewmodel;
pub mod edit_recipe_viewmodel;
pub mod recipe_detail_viewmodel;
pub mod recipe_list_viewmodel;

pub use auth_viewmodel::{logout, LoginForm, LoginViewModel, RegisterForm, RegisterViewModel};
pub use edit_recipe_viewmodel::{EditRecipeScreen, EditRecipeViewModel};
pub use recipe_detail_viewmodel::{RecipeDetailScreen, RecipeDetailViewModel};
pub use recipe_list_viewmodel::{RecipeListScreen, RecipeListViewModel};

use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::platform::Navigator;
use crate::router::Route;
use crate::services::{classify, ApiClient, ApiFailure, Flow};
use crate::state::SessionState;

/// Dependencias compartidas por todos los ViewModels
#[derive(Clone)]
pub struct ViewContext {
    pub api: ApiClient,
    pub session: SessionState,
    pub navigator: Rc<dyn Navigator>,
    pub config: Rc<AppConfig>,
}

impl ViewContext {
    /// Clasificar un fallo y aplicar la política de 401: con
    /// `logout_on_unauthorized` la sesión se cierra y se vuelve a `/`.
    pub fn fail(&self, flow: Flow, failure: &ApiFailure) -> ClientError {
        let error = classify(flow, failure);
        if error.is_session_expired() && self.config.logout_on_unauthorized {
            log::warn!("🔒 [SESSION] Token rechazado en {:?}, cerrando sesión", flow);
            self.session.clear();
            self.navigator.navigate(&Route::public_entry(), true);
        }
        error
    }
}
