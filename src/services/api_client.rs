// ============================================================================
// API CLIENT - Solo HTTP (sin estado)
// ============================================================================
// Cada llamada lleva credenciales (cookie de sesión) y, si hay uno guardado,
// el bearer token del actor.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use web_sys::RequestCredentials;

use crate::config::CONFIG;
use crate::models::{
    ActorKind, CreateRideRequest, FareResponse, FareTable, LoginOutcome, LoginRequest, LogoutMethod, Principal, Ride,
    SignupRequest, Suggestion, SuggestionsResponse,
};
use crate::models::actor::principal_from_profile;
use crate::utils::storage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("request build error: {0}")]
    Build(String),
    #[error("unexpected response: {0}")]
    Unexpected(&'static str),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(&CONFIG.backend_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, builder: RequestBuilder, kind: ActorKind) -> RequestBuilder {
        let builder = builder.credentials(RequestCredentials::Include);
        match storage::load_token(kind) {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Perfil del actor autenticado (comprobación de sesión)
    pub async fn get_profile(&self, kind: ActorKind) -> Result<Principal, ApiError> {
        let request = self.prepare(Request::get(&self.url(kind.profile_path())), kind);
        let body: Value = read_json(send(request).await?).await?;
        principal_from_profile(kind, body).ok_or(ApiError::Unexpected("empty profile"))
    }

    pub async fn login(&self, kind: ActorKind, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 Login de {} {}", kind, email);

        let request = self
            .prepare(Request::post(&self.url(kind.login_path())), kind)
            .json(&body)
            .map_err(|e| ApiError::Build(e.to_string()))?;
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let body: Value = read_json(response).await?;
        LoginOutcome::from_response(kind, body).ok_or(ApiError::Unexpected("login response without profile"))
    }

    /// El registro responde como el login: token opcional y perfil
    pub async fn signup(&self, kind: ActorKind, request: &SignupRequest) -> Result<LoginOutcome, ApiError> {
        log::info!("📝 Registrando {} {}", kind, request.email);
        let response = self
            .prepare(Request::post(&self.url(kind.signup_path())), kind)
            .json(request)
            .map_err(|e| ApiError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: Value = read_json(response).await?;
        LoginOutcome::from_response(kind, body).ok_or(ApiError::Unexpected("signup response without profile"))
    }

    pub async fn logout(&self, kind: ActorKind) -> Result<(), ApiError> {
        let (method, path) = kind.logout_endpoint();
        let url = self.url(path);
        let response = match method {
            LogoutMethod::Get => send(self.prepare(Request::get(&url), kind)).await?,
            LogoutMethod::Post => self
                .prepare(Request::post(&url), kind)
                .json(&serde_json::json!({}))
                .map_err(|e| ApiError::Build(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?,
        };
        ensure_ok(response).await.map(|_| ())
    }

    pub async fn autocomplete(&self, input: &str) -> Result<Vec<Suggestion>, ApiError> {
        let request = self
            .prepare(Request::get(&self.url("/map/autocomplete")), ActorKind::Rider)
            .query([("input", input)]);
        let parsed: SuggestionsResponse = read_json(send(request).await?).await?;
        Ok(parsed.suggestions)
    }

    pub async fn get_fare(&self, pickup: &str, destination: &str) -> Result<FareTable, ApiError> {
        let request = self
            .prepare(Request::get(&self.url("/ride/get-fare")), ActorKind::Rider)
            .query([("pickup", pickup), ("destination", destination)]);
        let parsed: FareResponse = read_json(send(request).await?).await?;
        Ok(parsed.fares)
    }

    pub async fn create_ride(&self, ride: &CreateRideRequest) -> Result<Ride, ApiError> {
        log::info!("🚕 Creando viaje {} -> {} ({})", ride.pickup, ride.destination, ride.vehicle_type);
        let response = self
            .prepare(Request::post(&self.url("/ride/create")), ActorKind::Rider)
            .json(ride)
            .map_err(|e| ApiError::Build(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Http { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    ensure_ok(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
