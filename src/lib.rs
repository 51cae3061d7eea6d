// ============================================================================
// RIDE CLIENT - Cliente web para el backend de viajes (Yew + WASM)
// ============================================================================
// - State: reducers puros (sesiones, flujo del viaje, posición)
// - Services: REST, canal socket.io, geolocalización
// - Maps: trait MapSurface + binding de Ola Maps
// - Hooks / Components: pegamento Yew y pantallas
// ============================================================================

pub mod components;
pub mod config;
pub mod hooks;
pub mod maps;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use components::App;
