// ============================================================================
// RECIPE LIST VIEWMODEL - Listado + borrado con confirmación
// ============================================================================
// fetch:   Loading → Ready(lista completa) | Failed(msg), nunca a medias
// delete:  request_delete → confirm_delete → Deleting → Ready
//          2xx y 404 quitan la receta por id; cualquier otro fallo deja la
//          lista intacta y el objetivo seleccionado hasta cancelar.
//          Un solo borrado en vuelo, aunque entre medias se recargue la lista.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ClientError;
use crate::models::{Recipe, RecipeScope, ResourceId};
use crate::services::Flow;
use crate::state::{RequestTracker, ViewStatus};
use crate::viewmodels::ViewContext;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeListScreen {
    pub status: ViewStatus,
    pub recipes: Vec<Recipe>,
    /// Error de borrado (los de carga van en `ViewStatus::Failed`)
    pub error: Option<String>,
    pub delete_target: Option<Recipe>,
}

#[derive(Clone)]
pub struct RecipeListViewModel {
    ctx: ViewContext,
    scope: RecipeScope,
    screen: Rc<RefCell<RecipeListScreen>>,
    tracker: RequestTracker,
    /// DELETE en vuelo; independiente de `status`, que `fetch` pisa
    deleting: Rc<Cell<bool>>,
}

impl RecipeListViewModel {
    pub fn new(ctx: ViewContext, scope: RecipeScope) -> Self {
        Self {
            ctx,
            scope,
            screen: Rc::new(RefCell::new(RecipeListScreen::default())),
            tracker: RequestTracker::new(),
            deleting: Rc::new(Cell::new(false)),
        }
    }

    pub fn scope(&self) -> RecipeScope {
        self.scope
    }

    pub fn screen(&self) -> RecipeListScreen {
        self.screen.borrow().clone()
    }

    pub fn status(&self) -> ViewStatus {
        self.screen.borrow().status.clone()
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.screen.borrow().recipes.clone()
    }

    pub fn delete_target(&self) -> Option<Recipe> {
        self.screen.borrow().delete_target.clone()
    }

    /// Cargar el listado. Solo se aplica la respuesta de la última llamada.
    pub async fn fetch(&self) {
        let ticket = self.tracker.begin();
        {
            let mut screen = self.screen.borrow_mut();
            screen.status = ViewStatus::Loading;
            screen.error = None;
        }
        log::info!("📋 [RECIPES] Cargando {}", self.scope.path());

        let result = self.ctx.api.list_recipes(self.scope).await;

        if !self.tracker.is_current(ticket) {
            log::debug!("⏭️ [RECIPES] Respuesta obsoleta descartada");
            return;
        }

        match result {
            Ok(recipes) => {
                let mut screen = self.screen.borrow_mut();
                screen.recipes = recipes;
                screen.status = ViewStatus::Ready;
            }
            Err(failure) => {
                let error = self.ctx.fail(Flow::FetchList, &failure);
                log::error!("❌ [RECIPES] Error cargando listado: {}", error);
                let mut screen = self.screen.borrow_mut();
                screen.recipes.clear();
                screen.status = ViewStatus::Failed(error.message());
            }
        }
    }

    /// Seleccionar receta a borrar (abre la confirmación, sin red)
    pub fn request_delete(&self, id: &ResourceId) -> bool {
        if self.deleting.get() {
            return false;
        }
        let mut screen = self.screen.borrow_mut();
        let found = screen.recipes.iter().find(|r| &r.id == id).cloned();
        match found {
            Some(recipe) => {
                screen.delete_target = Some(recipe);
                screen.error = None;
                true
            }
            None => false,
        }
    }

    /// Cerrar la confirmación. Ignorado mientras el borrado está en vuelo.
    pub fn cancel_delete(&self) {
        if self.deleting.get() {
            log::debug!("⏳ [RECIPES] Borrado en curso, cancelar ignorado");
            return;
        }
        let mut screen = self.screen.borrow_mut();
        screen.delete_target = None;
        screen.error = None;
    }

    /// Confirmar el borrado del objetivo seleccionado
    pub async fn confirm_delete(&self) -> Result<(), ClientError> {
        if self.deleting.get() {
            return Ok(());
        }
        let target = {
            let mut screen = self.screen.borrow_mut();
            let Some(target) = screen.delete_target.clone() else {
                return Ok(());
            };
            self.deleting.set(true);
            screen.status = ViewStatus::Deleting;
            screen.error = None;
            target
        };

        let result = match self.ctx.api.delete_recipe(&target.id).await {
            // Ya no existe: mismo resultado que un borrado correcto
            Err(failure) if failure.is_not_found() => {
                log::info!("🗑️ [RECIPES] Receta {} ya no existía", target.id);
                Ok(())
            }
            other => other,
        };

        self.deleting.set(false);
        let result = result.map_err(|failure| self.ctx.fail(Flow::Delete, &failure));
        if !self.tracker.is_mounted() {
            return result;
        }

        let mut screen = self.screen.borrow_mut();
        // Una recarga lanzada durante el borrado es dueña del estado
        if screen.status == ViewStatus::Deleting {
            screen.status = ViewStatus::Ready;
        }
        match result {
            Ok(()) => {
                log::info!("✅ [RECIPES] Receta {} eliminada", target.id);
                screen.recipes.retain(|r| r.id != target.id);
                screen.delete_target = None;
                Ok(())
            }
            Err(error) => {
                log::error!("❌ [RECIPES] Error eliminando {}: {}", target.id, error);
                screen.error = Some(error.message());
                Err(error)
            }
        }
    }

    /// La pantalla se desmonta: lo que esté en vuelo ya no toca el estado
    pub fn unmount(&self) {
        self.tracker.unmount();
    }
}
