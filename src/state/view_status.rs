// ============================================================================
// VIEW STATUS - Máquina de estados por pantalla
// ============================================================================
// Idle → Loading → {Ready, Failed}
// Ready ⇄ Saving / Deleting
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
    Saving,
    Deleting,
}

impl ViewStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, ViewStatus::Loading | ViewStatus::Saving | ViewStatus::Deleting)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ViewStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
