pub mod actor;
pub mod auth;
pub mod position;
pub mod ride;

pub use actor::{ActorKind, LogoutMethod, Principal};
pub use auth::{FullName, LoginOutcome, LoginRequest, SignupRequest, VehicleDetails, VEHICLE_TYPES};
pub use position::Position;
pub use ride::{CreateRideRequest, FareQuote, FareResponse, FareTable, Ride, Suggestion, SuggestionsResponse};
