use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::actor::{principal_from_profile, ActorKind, Principal};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct FullName {
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct VehicleDetails {
    pub color: String,
    pub plate: String,
    pub capacity: u32,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
}

/// Tipos de vehículo que acepta el registro de capitanes
pub const VEHICLE_TYPES: [&str; 3] = ["car", "moto", "auto"];

const MIN_PASSWORD_LEN: usize = 6;

/// Registro de rider o capitán; solo los capitanes llevan `vehicle`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct SignupRequest {
    pub fullname: FullName,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vehicle: Option<VehicleDetails>,
}

impl SignupRequest {
    /// Limpia espacios y comprueba el formulario antes de enviarlo
    pub fn validated(mut self, kind: ActorKind) -> Result<Self, String> {
        self.fullname.firstname = self.fullname.firstname.trim().to_string();
        self.fullname.lastname = self.fullname.lastname.trim().to_string();
        self.email = self.email.trim().to_string();

        if self.fullname.firstname.is_empty() {
            return Err("First name is required".to_string());
        }
        if self.email.is_empty() || !self.email.contains('@') {
            return Err("A valid email is required".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!("Password must be at least {} characters", MIN_PASSWORD_LEN));
        }

        if kind == ActorKind::Rider {
            self.vehicle = None;
            return Ok(self);
        }

        let vehicle = self
            .vehicle
            .as_mut()
            .ok_or_else(|| "Vehicle details are required".to_string())?;
        vehicle.color = vehicle.color.trim().to_string();
        vehicle.plate = vehicle.plate.trim().to_string();
        if vehicle.color.is_empty() || vehicle.plate.is_empty() {
            return Err("Vehicle color and plate are required".to_string());
        }
        if vehicle.capacity == 0 {
            return Err("Vehicle capacity must be at least 1".to_string());
        }
        if !VEHICLE_TYPES.contains(&vehicle.vehicle_type.as_str()) {
            return Err("Select a vehicle type".to_string());
        }
        Ok(self)
    }
}

/// Resultado de un login correcto: el token a guardar y el principal para
/// la sesión.
#[derive(Clone, PartialEq, Debug)]
pub struct LoginOutcome {
    pub token: Option<String>,
    pub principal: Principal,
}

impl LoginOutcome {
    /// Las respuestas traen `token` junto al perfil (dentro de
    /// `user`/`captain` o plano).
    pub fn from_response(kind: ActorKind, mut body: Value) -> Option<Self> {
        let token = body
            .as_object_mut()
            .and_then(|map| map.remove("token"))
            .and_then(|t| t.as_str().map(str::to_string));
        let principal = principal_from_profile(kind, body)?;
        Some(Self { token, principal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_login_response() {
        let body = json!({"token": "t0k", "user": {"_id": "u1", "email": "a@b.c"}});
        let outcome = LoginOutcome::from_response(ActorKind::Rider, body).unwrap();
        assert_eq!(outcome.token.as_deref(), Some("t0k"));
        assert_eq!(outcome.principal.id(), Some("u1"));
    }

    fn signup(vehicle: Option<VehicleDetails>) -> SignupRequest {
        SignupRequest {
            fullname: FullName {
                firstname: "  Asha ".to_string(),
                lastname: "Rao".to_string(),
            },
            email: " asha@example.com ".to_string(),
            password: "secret1".to_string(),
            vehicle,
        }
    }

    fn vehicle() -> VehicleDetails {
        VehicleDetails {
            color: "White".to_string(),
            plate: "TS09 AB 1234".to_string(),
            capacity: 4,
            vehicle_type: "car".to_string(),
        }
    }

    #[test]
    fn rider_signup_is_trimmed_and_drops_vehicle() {
        let request = signup(Some(vehicle())).validated(ActorKind::Rider).unwrap();
        assert_eq!(request.fullname.firstname, "Asha");
        assert_eq!(request.email, "asha@example.com");
        assert!(request.vehicle.is_none());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["fullname"]["firstname"], "Asha");
        assert!(body.get("vehicle").is_none());
    }

    #[test]
    fn captain_signup_needs_a_complete_vehicle() {
        assert!(signup(None).validated(ActorKind::Captain).is_err());

        let mut empty_seats = vehicle();
        empty_seats.capacity = 0;
        assert!(signup(Some(empty_seats)).validated(ActorKind::Captain).is_err());

        let mut spaceship = vehicle();
        spaceship.vehicle_type = "spaceship".to_string();
        assert!(signup(Some(spaceship)).validated(ActorKind::Captain).is_err());

        let request = signup(Some(vehicle())).validated(ActorKind::Captain).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["vehicle"]["vehicleType"], "car");
        assert_eq!(body["vehicle"]["capacity"], 4);
    }

    #[test]
    fn short_password_or_bad_email_is_rejected() {
        let mut request = signup(None);
        request.password = "12345".to_string();
        assert_eq!(
            request.validated(ActorKind::Rider).unwrap_err(),
            "Password must be at least 6 characters"
        );

        let mut request = signup(None);
        request.email = "not-an-email".to_string();
        assert!(request.validated(ActorKind::Rider).is_err());
    }

    #[test]
    fn flat_login_response_without_token() {
        let body = json!({"_id": "c7", "email": "cap@b.c"});
        let outcome = LoginOutcome::from_response(ActorKind::Captain, body).unwrap();
        assert_eq!(outcome.token, None);
        assert_eq!(outcome.principal.id(), Some("c7"));
    }
}
