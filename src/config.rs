// ============================================================================
// CONFIG - Configuración en tiempo de compilación (.env -> build.rs -> option_env!)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub realtime_path: String,
    pub map_config: MapConfig,
    pub tracking_config: TrackingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
            environment: "development".to_string(),
            realtime_path: "/api/socket.io".to_string(),
            map_config: MapConfig::default(),
            tracking_config: TrackingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub api_key: String,
    pub style_url: String,
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            style_url: "https://api.olamaps.io/tiles/vector/v1/styles/default-light-standard/style.json"
                .to_string(),
            default_center_lat: 17.406,
            default_center_lng: 78.4514,
            default_zoom: 17.0,
        }
    }
}

/// Tiempos de geolocalización y de cámara del mapa en vivo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub poll_interval_ms: u32,
    pub ease_duration_ms: u32,
    pub one_shot_timeout_ms: u32,
    pub one_shot_maximum_age_ms: u32,
    pub watch_timeout_ms: u32,
    pub watch_maximum_age_ms: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            ease_duration_ms: 1000,
            one_shot_timeout_ms: 10_000,
            one_shot_maximum_age_ms: 60_000,
            watch_timeout_ms: 5000,
            watch_maximum_age_ms: 30_000,
        }
    }
}

impl AppConfig {
    /// Construye la configuración con las variables capturadas al compilar
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            realtime_path: option_env!("REALTIME_PATH")
                .unwrap_or("/api/socket.io").to_string(),
            map_config: MapConfig {
                api_key: option_env!("OLA_MAPS_API_KEY")
                    .unwrap_or("").to_string(),
                style_url: option_env!("MAP_STYLE_URL")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.map_config.style_url),
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("17.406").parse().unwrap_or(17.406),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("78.4514").parse().unwrap_or(78.4514),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("17").parse().unwrap_or(17.0),
            },
            tracking_config: TrackingConfig {
                poll_interval_ms: option_env!("POSITION_POLL_INTERVAL_MS")
                    .unwrap_or("2000").parse().unwrap_or(2000),
                ease_duration_ms: option_env!("CAMERA_EASE_DURATION_MS")
                    .unwrap_or("1000").parse().unwrap_or(1000),
                ..defaults.tracking_config
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
