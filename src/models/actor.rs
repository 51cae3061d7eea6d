use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Los dos dominios de identidad paralelos de la app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Rider,
    Captain,
}

/// Cómo llega el logout al backend (cada actor usa un método)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutMethod {
    Get,
    Post,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Rider => "rider",
            ActorKind::Captain => "captain",
        }
    }

    pub fn profile_path(&self) -> &'static str {
        match self {
            ActorKind::Rider => "/user/profile",
            ActorKind::Captain => "/captain/profile",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            ActorKind::Rider => "/user/login",
            ActorKind::Captain => "/captain/login",
        }
    }

    pub fn signup_path(&self) -> &'static str {
        match self {
            ActorKind::Rider => "/user/register",
            ActorKind::Captain => "/captain/register",
        }
    }

    pub fn logout_endpoint(&self) -> (LogoutMethod, &'static str) {
        match self {
            ActorKind::Rider => (LogoutMethod::Post, "/users/logout"),
            ActorKind::Captain => (LogoutMethod::Get, "/captain/logout"),
        }
    }

    /// Clave de localStorage con el token de sesión del actor
    pub fn token_storage_key(&self) -> &'static str {
        match self {
            ActorKind::Rider => "token",
            ActorKind::Captain => "captain-token",
        }
    }

    /// `userType` que se envía en el `join`
    pub fn user_type(&self) -> &'static str {
        match self {
            ActorKind::Rider => "user",
            ActorKind::Captain => "captain",
        }
    }

    /// Clave bajo la que las respuestas anidan el perfil, si lo anidan
    fn profile_field(&self) -> &'static str {
        match self {
            ActorKind::Rider => "user",
            ActorKind::Captain => "captain",
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Perfil autenticado que devuelve el backend. Opaco salvo el identificador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub Value);

impl Principal {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Identificador del backend: `_id`, si no `id`
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("_id")
            .or_else(|| self.0.get("id"))
            .and_then(Value::as_str)
    }

    /// Nombre para mostrar (`fullname.firstname`, `name` o `email`)
    pub fn display_name(&self) -> Option<String> {
        if let Some(first) = self.0.pointer("/fullname/firstname").and_then(Value::as_str) {
            return Some(first.to_string());
        }
        self.0
            .get("name")
            .or_else(|| self.0.get("email"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// La respuesta de sesión es el perfil o lo envuelve bajo la clave del actor
pub fn principal_from_profile(kind: ActorKind, body: Value) -> Option<Principal> {
    match body {
        Value::Object(mut map) => {
            if let Some(inner @ Value::Object(_)) = map.remove(kind.profile_field()) {
                return Some(Principal(inner));
            }
            if map.is_empty() {
                None
            } else {
                Some(Principal(Value::Object(map)))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn principal_id_prefers_mongo_style_key() {
        let p = Principal::new(json!({"_id": "abc", "id": "other"}));
        assert_eq!(p.id(), Some("abc"));

        let p = Principal::new(json!({"id": "u1"}));
        assert_eq!(p.id(), Some("u1"));

        let p = Principal::new(json!({"email": "a@b.c"}));
        assert_eq!(p.id(), None);
    }

    #[test]
    fn profile_unwraps_actor_key() {
        let body = json!({"captain": {"_id": "c1"}, "message": "ok"});
        let p = principal_from_profile(ActorKind::Captain, body).unwrap();
        assert_eq!(p.id(), Some("c1"));

        let body = json!({"_id": "u9", "email": "x@y.z"});
        let p = principal_from_profile(ActorKind::Rider, body).unwrap();
        assert_eq!(p.id(), Some("u9"));
    }

    #[test]
    fn empty_or_non_object_profile_is_no_principal() {
        assert!(principal_from_profile(ActorKind::Rider, json!({})).is_none());
        assert!(principal_from_profile(ActorKind::Rider, json!(null)).is_none());
        assert!(principal_from_profile(ActorKind::Rider, json!("nope")).is_none());
    }

    #[test]
    fn actor_kinds_do_not_share_storage_keys() {
        assert_ne!(
            ActorKind::Rider.token_storage_key(),
            ActorKind::Captain.token_storage_key()
        );
        assert_eq!(ActorKind::Rider.user_type(), "user");
        assert_eq!(ActorKind::Captain.logout_endpoint(), (LogoutMethod::Get, "/captain/logout"));
        assert_eq!(ActorKind::Captain.signup_path(), "/captain/register");
    }
}
