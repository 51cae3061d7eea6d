// ============================================================================
// STATE MODULE - Reducers de sesiones, flujo del viaje y posición
// ============================================================================

pub mod guard;
pub mod position_feed;
pub mod ride_flow;
pub mod session_state;

pub use guard::*;
pub use position_feed::*;
pub use ride_flow::*;
pub use session_state::*;
