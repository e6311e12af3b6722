// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod session_state;
pub mod request_tracker;
pub mod view_status;
pub mod app_state;

pub use session_state::*;
pub use request_tracker::*;
pub use view_status::*;
pub use app_state::*;
