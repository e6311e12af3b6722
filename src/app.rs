// ============================================================================
// APP - Raíz de composición
// ============================================================================
// Restaura la sesión una sola vez al arrancar, antes de evaluar ninguna ruta.
// Cada navegación pasa por el Route Guard y monta la pantalla que toque.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::models::{RecipeScope, ResourceId};
use crate::platform::{HttpTransport, Navigator, TokenStorage};
use crate::router::{GuardDecision, Route, RouteGuard};
use crate::services::ApiClient;
use crate::state::AppState;
use crate::viewmodels::{
    EditRecipeViewModel, LoginViewModel, RecipeDetailViewModel, RecipeListViewModel,
    RegisterViewModel, ViewContext,
};

/// Pantalla montada con su ViewModel
#[derive(Clone)]
pub enum Screen {
    Login(LoginViewModel),
    Register(RegisterViewModel),
    /// /home: todas las recetas
    Home(RecipeListViewModel),
    MyRecipes(RecipeListViewModel),
    Detail(RecipeDetailViewModel, ResourceId),
    Edit(EditRecipeViewModel),
    NotFound(String),
}

impl Screen {
    /// Carga inicial de la pantalla (no-op en formularios)
    pub async fn activate(&self) {
        match self {
            Screen::Home(vm) | Screen::MyRecipes(vm) => vm.fetch().await,
            Screen::Detail(vm, id) => vm.load(id).await,
            Screen::Edit(vm) => vm.load().await,
            Screen::Login(_) | Screen::Register(_) | Screen::NotFound(_) => {}
        }
    }

    /// Descartar todo lo que siga en vuelo
    pub fn unmount(&self) {
        match self {
            Screen::Home(vm) | Screen::MyRecipes(vm) => vm.unmount(),
            Screen::Detail(vm, _) => vm.unmount(),
            Screen::Edit(vm) => vm.unmount(),
            Screen::Login(vm) => vm.unmount(),
            Screen::Register(vm) => vm.unmount(),
            Screen::NotFound(_) => {}
        }
    }
}

/// Aplicación principal
pub struct App {
    state: AppState,
    ctx: ViewContext,
    guard: RouteGuard,
}

impl App {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn TokenStorage>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let state = AppState::new(config, storage);

        if state.session.restore() {
            log::info!("💾 [APP] Sesión restaurada desde sessionStorage");
        }

        let api = ApiClient::new(transport, state.session.clone(), state.config.clone());
        let ctx = ViewContext {
            api,
            session: state.session.clone(),
            navigator,
            config: state.config.clone(),
        };
        let guard = RouteGuard::new(state.session.clone());

        Self { state, ctx, guard }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn context(&self) -> ViewContext {
        self.ctx.clone()
    }

    /// Decisión del guard para un pathname
    pub fn resolve(&self, path: &str) -> GuardDecision {
        self.guard.check(Route::parse(path))
    }

    /// Navegar a `path`: si el guard redirige se pide la navegación y no se
    /// monta nada; si no, se devuelve la pantalla nueva.
    pub fn enter(&self, path: &str) -> Option<Screen> {
        match self.resolve(path) {
            GuardDecision::Redirect { to, replace } => {
                self.ctx.navigator.navigate(&to, replace);
                None
            }
            GuardDecision::Render(route) => Some(self.mount(route)),
        }
    }

    fn mount(&self, route: Route) -> Screen {
        let ctx = self.context();
        match route {
            Route::Login => Screen::Login(LoginViewModel::new(ctx)),
            Route::Register => Screen::Register(RegisterViewModel::new(ctx)),
            Route::Home => Screen::Home(RecipeListViewModel::new(ctx, RecipeScope::All)),
            Route::MyRecipes => Screen::MyRecipes(RecipeListViewModel::new(ctx, RecipeScope::Mine)),
            Route::RecipeDetail(id) => Screen::Detail(RecipeDetailViewModel::new(ctx), id),
            Route::EditRecipe(id) => Screen::Edit(EditRecipeViewModel::new(ctx, id)),
            Route::NotFound(path) => {
                log::warn!("❓ [APP] Ruta desconocida: {}", path);
                Screen::NotFound(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryTokenStorage, NavigationRecord, RecordingNavigator};
    use crate::platform::TokenStorage as _;
    use crate::state::ViewStatus;
    use crate::test_utils::{reply, MockTransport};
    use crate::utils::constants::TOKEN_STORAGE_KEY;
    use serde_json::json;

    fn app_with(storage: &MemoryTokenStorage) -> (App, MockTransport, RecordingNavigator) {
        let transport = MockTransport::new();
        let navigator = RecordingNavigator::new();
        let app = App::new(
            AppConfig::with_backend("https://api.test"),
            Rc::new(transport.clone()),
            Rc::new(storage.clone()),
            Rc::new(navigator.clone()),
        );
        (app, transport, navigator)
    }

    #[test]
    fn protected_route_without_token_redirects_to_login() {
        let (app, _, navigator) = app_with(&MemoryTokenStorage::new());

        for path in ["/home", "/my-recipes", "/recipes/3", "/recipes/3/edit"] {
            assert!(app.enter(path).is_none());
        }
        assert!(navigator
            .history()
            .iter()
            .all(|n| *n == NavigationRecord { route: Route::Login, replace: true, delay_ms: None }));
        assert_eq!(navigator.history().len(), 4);
    }

    #[test]
    fn token_from_previous_page_load_is_restored() {
        let storage = MemoryTokenStorage::new();
        storage.save(TOKEN_STORAGE_KEY, "persistido").unwrap();

        let (app, _, _) = app_with(&storage);

        assert_eq!(app.state().session.token().as_deref(), Some("persistido"));
        assert_eq!(app.resolve("/my-recipes"), GuardDecision::Render(Route::MyRecipes));
        assert_eq!(
            app.resolve("/"),
            GuardDecision::Redirect { to: Route::Home, replace: true }
        );
    }

    #[test]
    fn logout_invalidates_guard_immediately() {
        let storage = MemoryTokenStorage::new();
        storage.save(TOKEN_STORAGE_KEY, "t").unwrap();
        let (app, _, _) = app_with(&storage);
        assert!(matches!(app.resolve("/home"), GuardDecision::Render(_)));

        app.state().session.clear();

        assert!(matches!(app.resolve("/home"), GuardDecision::Redirect { .. }));
    }

    #[tokio::test]
    async fn entering_my_recipes_fetches_own_list() {
        let storage = MemoryTokenStorage::new();
        storage.save(TOKEN_STORAGE_KEY, "t").unwrap();
        let (app, transport, _) = app_with(&storage);
        transport.push(reply(200, json!([{"id": 1, "titulo": "Sopa"}])));

        let screen = app.enter("/My-Recipes").unwrap();
        screen.activate().await;

        let Screen::MyRecipes(vm) = screen else {
            panic!("expected MyRecipes screen");
        };
        assert_eq!(vm.status(), ViewStatus::Ready);
        assert_eq!(transport.requests()[0].url, "https://api.test/my-recipes");
    }

    #[test]
    fn unknown_path_renders_not_found() {
        let (app, _, navigator) = app_with(&MemoryTokenStorage::new());
        assert!(matches!(app.enter("/nada/que/ver"), Some(Screen::NotFound(_))));
        assert!(navigator.history().is_empty());
    }
}
