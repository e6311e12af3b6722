// ============================================================================
// IMPLEMENTACIONES EN MEMORIA - fuera del navegador (tests, herramientas)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Navigator, TokenStorage};
use crate::router::Route;

/// sessionStorage en memoria. Los clones comparten contenido, así un
/// "reload" se simula creando otro `SessionState` sobre el mismo storage.
#[derive(Clone, Default)]
pub struct MemoryTokenStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Una navegación registrada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub route: Route,
    pub replace: bool,
    pub delay_ms: Option<u32>,
}

/// Navigator que solo registra las navegaciones pedidas
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    history: Rc<RefCell<Vec<NavigationRecord>>>,
    cancelled: Rc<Cell<usize>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<NavigationRecord> {
        self.history.borrow().clone()
    }

    pub fn last(&self) -> Option<NavigationRecord> {
        self.history.borrow().last().cloned()
    }

    /// Veces que se anuló un redirect diferido
    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route, replace: bool) {
        self.history.borrow_mut().push(NavigationRecord {
            route: route.clone(),
            replace,
            delay_ms: None,
        });
    }

    fn navigate_after(&self, route: &Route, delay_ms: u32) {
        self.history.borrow_mut().push(NavigationRecord {
            route: route.clone(),
            replace: false,
            delay_ms: Some(delay_ms),
        });
    }

    fn cancel_pending(&self) {
        self.cancelled.set(self.cancelled.get() + 1);
    }
}
