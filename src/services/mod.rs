pub mod api_client;
pub mod auth_service;
pub mod geolocation;
pub mod realtime;
pub mod session_service;
pub mod socket_channel;
pub mod socket_io;

pub use api_client::{ApiClient, ApiError};
pub use geolocation::{current_position, GeoError, GeoOptions, WatchSubscription};
pub use realtime::{ChannelError, ChannelManager, RealtimeChannel, Subscription};
pub use session_service::{bootstrap_sessions, check_session, SessionApi};
pub use socket_channel::{SocketChannel, SocketConnector};
