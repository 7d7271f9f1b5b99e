// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod gate;
pub mod notification_store;
pub mod session_store;

pub use app_state::*;
pub use gate::*;
pub use notification_store::*;
pub use session_store::*;
