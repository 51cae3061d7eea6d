pub mod app;
pub mod captain_home;
pub mod channel_provider;
pub mod home;
pub mod live_tracking;
pub mod login_screen;
pub mod logout;
pub mod protected_route;
pub mod ride_panels;
pub mod riding;
pub mod session_provider;
pub mod signup_screen;
pub mod start;

pub use app::App;
pub use channel_provider::{ChannelContext, ChannelProvider};
pub use protected_route::{GuardDescriptor, ProtectedRoute};
pub use session_provider::{SessionContext, SessionProvider};
