use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Posición del dispositivo según el sensor de geolocalización
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub heading_degrees: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            heading_degrees: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_heading(mut self, heading: Option<f64>) -> Self {
        // Los navegadores dan NaN con el dispositivo parado
        self.heading_degrees = heading.filter(|h| h.is_finite());
        self
    }

    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = at;
        self
    }

    /// `[lng, lat]`, el orden de GeoJSON y del SDK del mapa
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn same_place(&self, other: &Position) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}
