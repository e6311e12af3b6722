// ============================================================================
// EDIT RECIPE VIEWMODEL - Borrador + snapshot original
// ============================================================================
// load → draft = original = receta del backend (null → "")
// set_field sanea y trunca en cada cambio
// submit: todo vacío / sin cambios / foto inválida → bloqueado
//         OK   → original = draft recortado, éxito, /my-recipes tras el delay
//         fallo → vuelve a Ready conservando lo editado
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::ClientError;
use crate::models::{RecipeField, RecipeFields, RecipeUpdate, ResourceId};
use crate::router::Route;
use crate::services::Flow;
use crate::state::{RequestTracker, ViewStatus};
use crate::utils::validation::{
    is_valid_url, sanitize, strip_whitespace, truncate_chars, validate_photo_url, FieldState,
};
use crate::viewmodels::ViewContext;

pub const MSG_ALL_EMPTY: &str = "No puedes dejar todos los campos vacios.";
pub const MSG_NO_CHANGES: &str = "No has realizado ningun cambio.";
pub const MSG_INVALID_PHOTO: &str = "La URL de la foto no es valida.";
pub const MSG_SAVED: &str = "Receta actualizada correctamente.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRecipeScreen {
    pub status: ViewStatus,
    pub draft: RecipeFields,
    pub original: RecipeFields,
    pub touched: HashSet<RecipeField>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl EditRecipeScreen {
    /// Comparación en crudo: un espacio añadido cuenta como cambio
    pub fn has_changes(&self) -> bool {
        self.draft != self.original
    }

    pub fn all_empty(&self) -> bool {
        self.draft.is_blank()
    }

    fn photo_is_valid(&self) -> bool {
        is_valid_url(self.draft.foto.trim())
    }

    /// Primer motivo que bloquea el envío, si hay alguno
    fn blocking_reason(&self) -> Option<&'static str> {
        if self.all_empty() {
            Some(MSG_ALL_EMPTY)
        } else if !self.has_changes() {
            Some(MSG_NO_CHANGES)
        } else if !self.photo_is_valid() {
            Some(MSG_INVALID_PHOTO)
        } else {
            None
        }
    }
}

#[derive(Clone)]
pub struct EditRecipeViewModel {
    ctx: ViewContext,
    id: ResourceId,
    screen: Rc<RefCell<EditRecipeScreen>>,
    tracker: RequestTracker,
}

impl EditRecipeViewModel {
    pub fn new(ctx: ViewContext, id: ResourceId) -> Self {
        Self {
            ctx,
            id,
            screen: Rc::new(RefCell::new(EditRecipeScreen::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn screen(&self) -> EditRecipeScreen {
        self.screen.borrow().clone()
    }

    pub fn status(&self) -> ViewStatus {
        self.screen.borrow().status.clone()
    }

    pub fn draft(&self) -> RecipeFields {
        self.screen.borrow().draft.clone()
    }

    pub async fn load(&self) {
        let ticket = self.tracker.begin();
        {
            let mut screen = self.screen.borrow_mut();
            screen.status = ViewStatus::Loading;
            screen.error = None;
            screen.success = None;
        }

        let result = self.ctx.api.get_recipe(&self.id).await;

        if !self.tracker.is_current(ticket) {
            log::debug!("⏭️ [EDIT] Carga obsoleta de {} descartada", self.id);
            return;
        }

        match result {
            Ok(recipe) => {
                log::info!("✏️ [EDIT] Receta {} cargada", self.id);
                let fields = RecipeFields::from_recipe(&recipe);
                let mut screen = self.screen.borrow_mut();
                screen.draft = fields.clone();
                screen.original = fields;
                screen.touched.clear();
                screen.status = ViewStatus::Ready;
            }
            Err(failure) => {
                let error = self.ctx.fail(Flow::FetchRecipe, &failure);
                log::error!("❌ [EDIT] No se pudo cargar {}: {}", self.id, error);
                self.screen.borrow_mut().status = ViewStatus::Failed(error.message());
            }
        }
    }

    /// Cambio de un campo. La foto pierde todos los espacios; el resto se
    /// sanea. Todo se trunca al máximo del campo.
    pub fn set_field(&self, field: RecipeField, value: &str) {
        let mut screen = self.screen.borrow_mut();
        if screen.status != ViewStatus::Ready {
            return;
        }
        let cleaned = match field {
            RecipeField::Foto => strip_whitespace(value),
            _ => sanitize(value),
        };
        screen.draft.set(field, truncate_chars(&cleaned, field.max_len()));
        screen.touched.insert(field);
        screen.error = None;
        screen.success = None;
    }

    pub fn field_state(&self, field: RecipeField) -> FieldState {
        let screen = self.screen.borrow();
        let touched = screen.touched.contains(&field);
        let result = match field {
            RecipeField::Foto => validate_photo_url(screen.draft.foto.trim()),
            _ => Ok(()),
        };
        FieldState::evaluate(touched, result)
    }

    pub fn has_changes(&self) -> bool {
        self.screen.borrow().has_changes()
    }

    pub fn all_empty(&self) -> bool {
        self.screen.borrow().all_empty()
    }

    pub fn can_submit(&self) -> bool {
        let screen = self.screen.borrow();
        screen.status == ViewStatus::Ready && screen.blocking_reason().is_none()
    }

    pub async fn submit(&self) -> Result<(), ClientError> {
        let update = {
            let mut screen = self.screen.borrow_mut();
            if screen.status != ViewStatus::Ready {
                return Err(ClientError::Validation("Espera a que termine la operacion.".to_string()));
            }
            screen.success = None;
            if let Some(reason) = screen.blocking_reason() {
                screen.error = Some(reason.to_string());
                return Err(ClientError::Validation(reason.to_string()));
            }
            screen.error = None;
            screen.status = ViewStatus::Saving;
            RecipeUpdate::from_fields(&screen.draft)
        };

        let ticket = self.tracker.begin();
        let result = self.ctx.api.update_recipe(&self.id, &update).await;
        let result = result.map_err(|failure| self.ctx.fail(Flow::Edit, &failure));

        if !self.tracker.is_current(ticket) {
            return result.map(|_| ());
        }

        let mut screen = self.screen.borrow_mut();
        screen.status = ViewStatus::Ready;
        match result {
            Ok(_) => {
                log::info!("✅ [EDIT] Receta {} guardada", self.id);
                let saved = screen.draft.trimmed();
                screen.draft = saved.clone();
                screen.original = saved;
                screen.touched.clear();
                screen.success = Some(MSG_SAVED.to_string());
                self.ctx
                    .navigator
                    .navigate_after(&Route::MyRecipes, self.ctx.config.redirect_delay_ms);
                Ok(())
            }
            Err(error) => {
                log::error!("❌ [EDIT] Error guardando {}: {}", self.id, error);
                screen.error = Some(error.message());
                Err(error)
            }
        }
    }

    /// Salir de la pantalla descarta el guardado en vuelo y anula el
    /// redirect a /my-recipes si aún no ha saltado
    pub fn unmount(&self) {
        self.tracker.unmount();
        self.ctx.navigator.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::NavigationRecord;
    use crate::platform::{HttpResponse, Method};
    use crate::services::error_classifier::{MSG_NOT_FOUND, MSG_RETRY_LATER};
    use crate::test_utils::{empty_reply, reply, Harness};
    use serde_json::json;

    async fn loaded(h: &Harness) -> EditRecipeViewModel {
        h.transport.push(reply(
            200,
            json!({"data": {"id": 7, "titulo": "Sopa", "tiempo": "20 min", "pasos": null, "foto": null}}),
        ));
        let vm = EditRecipeViewModel::new(h.ctx.clone(), ResourceId::from(7));
        vm.load().await;
        vm
    }

    #[tokio::test]
    async fn load_fills_draft_and_original() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;

        let screen = vm.screen();
        assert_eq!(screen.status, ViewStatus::Ready);
        assert_eq!(screen.draft.titulo, "Sopa");
        assert_eq!(screen.draft.pasos, "");
        assert_eq!(screen.draft, screen.original);
        assert_eq!(h.transport.requests()[0].url, "https://api.test/recipes/7");
    }

    #[tokio::test]
    async fn load_failure_is_classified() {
        let h = Harness::logged_in("t");
        h.transport.push(empty_reply(404));
        let vm = EditRecipeViewModel::new(h.ctx.clone(), ResourceId::from(7));

        vm.load().await;

        assert_eq!(vm.status(), ViewStatus::Failed(MSG_NOT_FOUND.to_string()));
    }

    #[tokio::test]
    async fn submit_without_changes_is_refused() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;

        assert!(!vm.can_submit());
        let err = vm.submit().await.unwrap_err();
        assert_eq!(err, ClientError::Validation(MSG_NO_CHANGES.to_string()));
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn edit_save_then_second_submit_is_blocked() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        h.transport.push(reply(200, json!({"id": 7, "titulo": "Sopa fria"})));

        vm.set_field(RecipeField::Titulo, "Sopa fria");
        assert!(vm.can_submit());
        vm.submit().await.unwrap();

        let put = &h.transport.requests()[1];
        assert_eq!(put.method, Method::Put);
        assert_eq!(
            put.body,
            Some(json!({"titulo": "Sopa fria", "tiempo": "20 min", "pasos": null, "foto": null}))
        );
        let screen = vm.screen();
        assert_eq!(screen.original.titulo, "Sopa fria");
        assert_eq!(screen.success.as_deref(), Some(MSG_SAVED));
        assert_eq!(
            h.navigator.last(),
            Some(NavigationRecord { route: Route::MyRecipes, replace: false, delay_ms: Some(1200) })
        );

        assert!(!vm.can_submit());
        assert!(vm.submit().await.is_err());
        assert_eq!(h.transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn trailing_spaces_are_trimmed_in_payload_and_snapshot() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        h.transport.push(empty_reply(204));

        vm.set_field(RecipeField::Pasos, "Hervir   agua   ");
        assert_eq!(vm.draft().pasos, "Hervir  agua  ");
        vm.submit().await.unwrap();

        assert_eq!(h.transport.requests()[1].body.as_ref().unwrap()["pasos"], json!("Hervir  agua"));
        assert_eq!(vm.screen().original.pasos, "Hervir  agua");
        assert!(!vm.has_changes());
    }

    #[tokio::test]
    async fn clearing_every_field_is_refused() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;

        vm.set_field(RecipeField::Titulo, "   ");
        vm.set_field(RecipeField::Tiempo, "");
        assert!(vm.all_empty());

        let err = vm.submit().await.unwrap_err();
        assert_eq!(err.message(), MSG_ALL_EMPTY);
        assert_eq!(vm.screen().error.as_deref(), Some(MSG_ALL_EMPTY));
    }

    #[tokio::test]
    async fn photo_is_stripped_capped_and_validated() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        assert_eq!(vm.field_state(RecipeField::Foto), FieldState::Unchecked);

        vm.set_field(RecipeField::Foto, "javascript: alert(1)");
        assert_eq!(vm.draft().foto, "javascript:alert(1)");
        assert!(vm.field_state(RecipeField::Foto).is_invalid());
        assert_eq!(vm.submit().await.unwrap_err().message(), MSG_INVALID_PHOTO);

        vm.set_field(RecipeField::Foto, &format!("https://x.com/{}", "a".repeat(600)));
        assert_eq!(vm.draft().foto.chars().count(), RecipeField::Foto.max_len());
        assert_eq!(vm.field_state(RecipeField::Foto), FieldState::Valid);
    }

    #[tokio::test]
    async fn title_is_capped_in_characters() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;

        vm.set_field(RecipeField::Titulo, &"ñ".repeat(200));
        assert_eq!(vm.draft().titulo.chars().count(), 150);
    }

    #[tokio::test]
    async fn failed_save_keeps_edits() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        h.transport.push(reply(422, json!({"errors": {"titulo": ["El titulo es demasiado largo."]}})));

        vm.set_field(RecipeField::Titulo, "Sopa castellana");
        let err = vm.submit().await.unwrap_err();

        assert_eq!(err, ClientError::Unprocessable("El titulo es demasiado largo.".into()));
        let screen = vm.screen();
        assert_eq!(screen.status, ViewStatus::Ready);
        assert_eq!(screen.draft.titulo, "Sopa castellana");
        assert_eq!(screen.original.titulo, "Sopa");
        assert!(h.navigator.history().is_empty());
        assert!(vm.can_submit());
    }

    #[tokio::test]
    async fn network_failure_on_save_asks_to_retry() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        h.transport.push_network_error();

        vm.set_field(RecipeField::Tiempo, "25 min");
        let err = vm.submit().await.unwrap_err();
        assert_eq!(err.message(), MSG_RETRY_LATER);
        assert_eq!(vm.draft().tiempo, "25 min");
    }

    #[tokio::test]
    async fn submit_is_blocked_while_saving() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        let pending = h.transport.defer();
        vm.set_field(RecipeField::Titulo, "Sopa fria");

        let first = vm.submit();
        let second = async {
            assert_eq!(vm.status(), ViewStatus::Saving);
            vm.set_field(RecipeField::Titulo, "otra cosa");
            assert!(vm.submit().await.is_err());
            pending.send(Ok(HttpResponse { status: 200, body: None })).unwrap();
        };
        let (result, ()) = tokio::join!(first, second);

        result.unwrap();
        assert_eq!(h.transport.requests().len(), 2);
        assert_eq!(vm.draft().titulo, "Sopa fria");
    }

    #[tokio::test]
    async fn save_finishing_after_unmount_schedules_no_redirect() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        let pending = h.transport.defer();
        vm.set_field(RecipeField::Titulo, "Sopa fria");

        let save = vm.submit();
        let leave = async {
            vm.unmount();
            pending.send(Ok(reply(200, json!({"id": 7, "titulo": "Sopa fria"})))).unwrap();
        };
        let (result, ()) = tokio::join!(save, leave);

        result.unwrap();
        assert!(h.navigator.history().is_empty());
        assert_eq!(vm.screen().success, None);
        assert_eq!(vm.status(), ViewStatus::Saving);
    }

    #[tokio::test]
    async fn leaving_before_redirect_fires_cancels_it() {
        let h = Harness::logged_in("t");
        let vm = loaded(&h).await;
        h.transport.push(empty_reply(204));
        vm.set_field(RecipeField::Pasos, "Batir todo");
        vm.submit().await.unwrap();
        assert_eq!(
            h.navigator.last(),
            Some(NavigationRecord { route: Route::MyRecipes, replace: false, delay_ms: Some(1200) })
        );
        assert_eq!(h.navigator.cancelled(), 0);

        crate::app::Screen::Edit(vm.clone()).unmount();

        assert_eq!(h.navigator.cancelled(), 1);
    }
}
