// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// NO tiene lógica de negocio: construye requests, adjunta el bearer y
// decodifica. Los fallos salen como `ApiFailure` para el clasificador.
// ============================================================================

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::{
    decode_list, decode_one, AuthResponse, LoginRequest, Recipe, RecipeScope, RecipeUpdate,
    RegisterRequest, ResourceId,
};
use crate::platform::{HttpRequest, HttpTransport, Method};
use crate::services::error_classifier::ApiFailure;
use crate::state::SessionState;

/// Cliente API
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    session: SessionState,
    config: Rc<AppConfig>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn HttpTransport>, session: SessionState, config: Rc<AppConfig>) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    /// POST /login
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiFailure> {
        log::info!("🔐 [API] Login para: {}", request.email);
        let body = self.send(Method::Post, "/login", Some(to_body(request)?), false).await?;
        decode_one(body).map_err(ApiFailure::Decode)
    }

    /// POST /register
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiFailure> {
        log::info!("📝 [API] Registro para: {}", request.email);
        let body = self.send(Method::Post, "/register", Some(to_body(request)?), false).await?;
        decode_one(body).map_err(ApiFailure::Decode)
    }

    /// POST /logout con el token capturado antes de limpiar la sesión
    pub async fn logout(&self, token: String) -> Result<(), ApiFailure> {
        self.dispatch(Method::Post, "/logout", None, Some(token)).await.map(|_| ())
    }

    /// GET /recipes o /my-recipes
    pub async fn list_recipes(&self, scope: RecipeScope) -> Result<Vec<Recipe>, ApiFailure> {
        let body = self.send(Method::Get, scope.path(), None, true).await?;
        let recipes: Vec<Recipe> = decode_list(body);
        log::info!("📋 [API] {} recetas recibidas de {}", recipes.len(), scope.path());
        Ok(recipes)
    }

    /// GET /recipes/{id}
    pub async fn get_recipe(&self, id: &ResourceId) -> Result<Recipe, ApiFailure> {
        let body = self.send(Method::Get, &recipe_path(id), None, true).await?;
        decode_one(body).map_err(ApiFailure::Decode)
    }

    /// PUT /recipes/{id}. El objeto devuelto es opcional: un 2xx basta.
    pub async fn update_recipe(
        &self,
        id: &ResourceId,
        update: &RecipeUpdate,
    ) -> Result<Option<Recipe>, ApiFailure> {
        log::info!("📝 [API] Actualizando receta {}", id);
        let body = self
            .send(Method::Put, &recipe_path(id), Some(to_body(update)?), true)
            .await?;
        Ok(decode_one(body).ok())
    }

    /// DELETE /recipes/{id}
    pub async fn delete_recipe(&self, id: &ResourceId) -> Result<(), ApiFailure> {
        log::info!("🗑️ [API] Eliminando receta {}", id);
        self.send(Method::Delete, &recipe_path(id), None, true).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<Option<Value>, ApiFailure> {
        let bearer = if authenticated {
            // Sin token la request no llega a salir
            match self.session.token() {
                Some(token) => Some(token),
                None => {
                    log::warn!("⚠️ [API] {} {} sin token, no se envía", method.as_str(), path);
                    return Err(ApiFailure::MissingToken);
                }
            }
        } else {
            None
        };

        self.dispatch(method, path, body, bearer).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> Result<Option<Value>, ApiFailure> {
        let request = HttpRequest {
            method,
            url: self.config.endpoint(path),
            bearer,
            body,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {} {}: {}", method.as_str(), path, e);
            ApiFailure::Network(e)
        })?;

        if response.ok() {
            Ok(response.body)
        } else {
            log::warn!("⚠️ [API] {} {} → HTTP {}", method.as_str(), path, response.status);
            Err(ApiFailure::Status {
                status: response.status,
                body: response.body,
            })
        }
    }
}

fn recipe_path(id: &ResourceId) -> String {
    format!("/recipes/{}", id)
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiFailure> {
    serde_json::to_value(value).map_err(|e| ApiFailure::Decode(format!("Serialization error: {}", e)))
}
