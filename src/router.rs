// ============================================================================
// ROUTER - Tabla de rutas + Route Guard
// ============================================================================
// Públicas:   /            (login)
//             /register
// Protegidas: /home
//             /my-recipes
//             /recipes/{id}
//             /recipes/{id}/edit
// ============================================================================

use crate::models::ResourceId;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    MyRecipes,
    RecipeDetail(ResourceId),
    EditRecipe(ResourceId),
    NotFound(String),
}

impl Route {
    /// Punto de entrada público
    pub fn public_entry() -> Route {
        Route::Login
    }

    /// Parsear un pathname. Query y hash se ignoran; los segmentos fijos no
    /// distinguen mayúsculas (la navbar enlaza a `/my-Recipes`).
    pub fn parse(path: &str) -> Route {
        let clean = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();
        let lower: Vec<String> = segments.iter().map(|s| s.to_ascii_lowercase()).collect();

        match lower.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Route::Login,
            ["register"] => Route::Register,
            ["home"] => Route::Home,
            ["my-recipes"] => Route::MyRecipes,
            ["recipes", _] => Route::RecipeDetail(ResourceId::from(segments[1])),
            ["recipes", _, "edit"] => Route::EditRecipe(ResourceId::from(segments[1])),
            _ => Route::NotFound(clean.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/home".to_string(),
            Route::MyRecipes => "/my-recipes".to_string(),
            Route::RecipeDetail(id) => format!("/recipes/{}", id),
            Route::EditRecipe(id) => format!("/recipes/{}/edit", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::MyRecipes | Route::RecipeDetail(_) | Route::EditRecipe(_)
        )
    }

    /// Pantallas de login/registro: con sesión activa no tienen sentido
    fn is_auth_screen(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Resultado de evaluar una navegación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect { to: Route, replace: bool },
}

/// Route Guard. Lee la sesión en cada llamada, nunca cachea el resultado.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionState,
}

impl RouteGuard {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    pub fn check(&self, route: Route) -> GuardDecision {
        let authenticated = self.session.is_authenticated();

        if route.is_protected() && !authenticated {
            log::warn!("🔒 [GUARD] {} requiere sesión, redirigiendo a /", route.path());
            return GuardDecision::Redirect {
                to: Route::public_entry(),
                replace: true,
            };
        }

        if route.is_auth_screen() && authenticated {
            log::info!("🔓 [GUARD] Sesión activa, {} → /home", route.path());
            return GuardDecision::Redirect {
                to: Route::Home,
                replace: true,
            };
        }

        GuardDecision::Render(route)
    }
}
