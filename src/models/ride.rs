use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Tarifa de un tipo de vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    pub fare: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FareQuote {
    /// Detalle extra como `duration` o `distance`, en texto
    pub fn detail(&self, key: &str) -> Option<String> {
        value_text(self.extra.get(key)?)
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Tipo de vehículo (`"car"`, `"auto"`, `"moto"`, ...) -> tarifa
pub type FareTable = BTreeMap<String, FareQuote>;

#[derive(Debug, Clone, Deserialize)]
pub struct FareResponse {
    #[serde(default)]
    pub fares: FareTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRideRequest {
    pub pickup: String,
    pub destination: String,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
}

/// Viaje tal como llega de ride-create y de los eventos en tiempo real
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ride {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Cualquier campo extra texto/número (p. ej. `otp`, `fare`) como texto
    pub fn field_text(&self, key: &str) -> Option<String> {
        value_text(self.extra.get(key)?)
    }
}

/// El autocompletado devuelve textos planos u objetos de lugar
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    Text(String),
    Place {
        description: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Suggestion {
    pub fn label(&self) -> &str {
        match self {
            Suggestion::Text(s) => s,
            Suggestion::Place { description, .. } => description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fare_response_keeps_extra_fields() {
        let body = json!({"fares": {"car": {"fare": 120, "eta": 4}, "auto": {"fare": 80.5}}});
        let parsed: FareResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.fares.len(), 2);
        assert_eq!(parsed.fares["car"].fare, 120.0);
        assert_eq!(parsed.fares["car"].extra.get("eta"), Some(&json!(4)));
        assert_eq!(parsed.fares["car"].detail("eta").as_deref(), Some("4"));
        assert_eq!(parsed.fares["auto"].detail("duration"), None);
    }

    #[test]
    fn missing_fares_is_empty_table() {
        let parsed: FareResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.fares.is_empty());
    }

    #[test]
    fn ride_accepts_mongo_id_and_keeps_unknown_fields() {
        let ride = Ride::from_value(json!({"_id": "r1", "otp": 4821, "fare": 120})).unwrap();
        assert_eq!(ride.id.as_deref(), Some("r1"));
        assert_eq!(ride.field_text("otp").as_deref(), Some("4821"));

        let ride = Ride::from_value(json!({"id": "r2"})).unwrap();
        assert_eq!(ride.id.as_deref(), Some("r2"));
    }

    #[test]
    fn create_request_uses_camel_case_vehicle_type() {
        let body = serde_json::to_value(CreateRideRequest {
            pickup: "A".into(),
            destination: "B".into(),
            vehicle_type: "car".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"pickup": "A", "destination": "B", "vehicleType": "car"}));
    }

    #[test]
    fn suggestions_accept_strings_and_places() {
        let parsed: SuggestionsResponse = serde_json::from_value(json!({
            "suggestions": ["Airport", {"description": "Charminar, Hyderabad", "place_id": "x"}]
        }))
        .unwrap();
        let labels: Vec<_> = parsed.suggestions.iter().map(Suggestion::label).collect();
        assert_eq!(labels, vec!["Airport", "Charminar, Hyderabad"]);
    }
}
