pub mod session_context;
pub mod use_autocomplete;
pub mod use_live_position;
pub mod use_ride_flow;

pub use session_context::{use_channel, use_session_store};
pub use use_autocomplete::{use_autocomplete, SearchField, UseAutocompleteHandle};
pub use use_live_position::{use_live_position, UseLivePositionHandle};
pub use use_ride_flow::{use_ride_flow, UseRideFlowHandle};
