// ============================================================================
// REQUEST TRACKER - Descartar respuestas obsoletas
// ============================================================================
// Las requests en vuelo no se cancelan. Cada una recibe un ticket y su
// resultado solo se aplica si el ticket sigue siendo el último emitido y la
// pantalla sigue montada.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Clone)]
pub struct RequestTracker {
    generation: Rc<Cell<u64>>,
    mounted: Rc<Cell<bool>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            generation: Rc::new(Cell::new(0)),
            mounted: Rc::new(Cell::new(true)),
        }
    }

    /// Emitir un ticket nuevo; invalida los anteriores
    pub fn begin(&self) -> RequestTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.mounted.get() && self.generation.get() == ticket.0
    }

    /// La pantalla se desmonta: todo lo pendiente se descarta
    pub fn unmount(&self) {
        self.mounted.set(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}
