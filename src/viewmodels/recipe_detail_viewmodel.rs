// Detalle de una receta: solo lectura, mismo guard de respuestas obsoletas

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Recipe, ResourceId};
use crate::services::Flow;
use crate::state::{RequestTracker, ViewStatus};
use crate::viewmodels::ViewContext;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDetailScreen {
    pub status: ViewStatus,
    pub recipe: Option<Recipe>,
}

#[derive(Clone)]
pub struct RecipeDetailViewModel {
    ctx: ViewContext,
    screen: Rc<RefCell<RecipeDetailScreen>>,
    tracker: RequestTracker,
}

impl RecipeDetailViewModel {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            screen: Rc::new(RefCell::new(RecipeDetailScreen::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub fn screen(&self) -> RecipeDetailScreen {
        self.screen.borrow().clone()
    }

    /// Cargar una receta. Navegar a otro id antes de que llegue la anterior
    /// descarta la respuesta vieja.
    pub async fn load(&self, id: &ResourceId) {
        let ticket = self.tracker.begin();
        self.screen.borrow_mut().status = ViewStatus::Loading;

        let result = self.ctx.api.get_recipe(id).await;
        if !self.tracker.is_current(ticket) {
            return;
        }

        match result {
            Ok(recipe) => {
                let mut screen = self.screen.borrow_mut();
                screen.recipe = Some(recipe);
                screen.status = ViewStatus::Ready;
            }
            Err(failure) => {
                let error = self.ctx.fail(Flow::FetchRecipe, &failure);
                log::error!("❌ [RECIPES] No se pudo cargar la receta {}: {}", id, error);
                let mut screen = self.screen.borrow_mut();
                screen.recipe = None;
                screen.status = ViewStatus::Failed(error.message());
            }
        }
    }

    pub fn unmount(&self) {
        self.tracker.unmount();
    }
}
