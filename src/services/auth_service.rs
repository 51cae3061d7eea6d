// ============================================================================
// AUTH SERVICE - Login, registro y logout de riders y capitanes
// ============================================================================

use crate::models::{ActorKind, LoginOutcome, Principal, SignupRequest};
use crate::services::api_client::{ApiClient, ApiError};
use crate::utils::storage;

/// Login y guarda el token recibido. El principal vuelve al llamador, que
/// lo guarda en su sesión.
pub async fn login(api: &ApiClient, kind: ActorKind, email: &str, password: &str) -> Result<Principal, String> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    let outcome = api
        .login(kind, email, password)
        .await
        .map_err(|e| if e.is_unauthorized() { "Invalid email or password".to_string() } else { e.to_string() })?;

    let principal = keep_session(kind, outcome)?;
    log::info!("✅ Login de {} correcto", kind);
    Ok(principal)
}

/// Registrar y dejar la sesión abierta, igual que un login
pub async fn signup(api: &ApiClient, kind: ActorKind, request: SignupRequest) -> Result<Principal, String> {
    let request = request.validated(kind)?;
    let outcome = api.signup(kind, &request).await.map_err(|e| match e {
        ApiError::Http { status: 409, .. } => "An account with this email already exists".to_string(),
        other => other.to_string(),
    })?;

    let principal = keep_session(kind, outcome)?;
    log::info!("✅ {} registrado", kind);
    Ok(principal)
}

fn keep_session(kind: ActorKind, outcome: LoginOutcome) -> Result<Principal, String> {
    match outcome.token.as_deref() {
        Some(token) => storage::save_token(kind, token)?,
        None => log::warn!("⚠️ {} sin token en la respuesta, se usa la cookie", kind),
    }
    Ok(outcome.principal)
}

/// Avisa al backend y borra las credenciales locales conteste lo que conteste.
/// El llamador limpia la sesión y cierra el canal después.
pub async fn logout(api: &ApiClient, kind: ActorKind) {
    match api.logout(kind).await {
        Ok(()) => log::info!("✅ Logout de {}", kind),
        Err(e) => log::warn!("⚠️ Logout de {} fallido en el backend, se limpia en local igualmente: {}", kind, e),
    }
    storage::remove_token(kind);
}
