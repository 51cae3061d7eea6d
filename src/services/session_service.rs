// ============================================================================
// SESSION SERVICE - Comprobaciones de sesión y barrera de arranque
// ============================================================================

use crate::models::{ActorKind, Principal};
use crate::services::api_client::{ApiClient, ApiError};
use crate::state::SessionAction;

/// De dónde sacan el perfil las comprobaciones de sesión
#[allow(async_fn_in_trait)]
pub trait SessionApi {
    async fn fetch_profile(&self, kind: ActorKind) -> Result<Principal, ApiError>;
}

impl SessionApi for ApiClient {
    async fn fetch_profile(&self, kind: ActorKind) -> Result<Principal, ApiError> {
        self.get_profile(kind).await
    }
}

/// Una comprobación de sesión: `CheckStarted` y después exactamente uno de
/// `CheckSucceeded` / `CheckFailed`.
pub async fn check_session<A, D>(api: &A, kind: ActorKind, dispatch: D)
where
    A: SessionApi,
    D: Fn(SessionAction),
{
    dispatch(SessionAction::CheckStarted);
    match api.fetch_profile(kind).await {
        Ok(principal) => {
            log::info!("✅ Sesión de {} restaurada ({})", kind, principal.id().unwrap_or("?"));
            dispatch(SessionAction::CheckSucceeded(principal));
        }
        Err(e) => {
            // No es un error para el usuario: simplemente no ha iniciado sesión
            log::info!("ℹ️ Sin sesión de {}: {}", kind, e);
            dispatch(SessionAction::CheckFailed);
        }
    }
}

/// Lanza las dos comprobaciones y termina cuando acaban ambas
pub async fn bootstrap_sessions<A, D>(api: &A, dispatch: D)
where
    A: SessionApi,
    D: Fn(ActorKind, SessionAction),
{
    log::info!("🔄 Comprobando sesiones de rider y capitán...");
    futures::join!(
        check_session(api, ActorKind::Rider, |action| dispatch(ActorKind::Rider, action)),
        check_session(api, ActorKind::Captain, |action| dispatch(ActorKind::Captain, action)),
    );
    log::info!("✅ Comprobaciones de sesión terminadas");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SessionSlice, SessionSlices};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    struct FakeApi {
        rider: Result<Principal, ApiError>,
        captain: Result<Principal, ApiError>,
    }

    impl SessionApi for FakeApi {
        async fn fetch_profile(&self, kind: ActorKind) -> Result<Principal, ApiError> {
            match kind {
                ActorKind::Rider => self.rider.clone(),
                ActorKind::Captain => self.captain.clone(),
            }
        }
    }

    fn unauthorized() -> ApiError {
        ApiError::Http { status: 401, body: "Unauthorized".into() }
    }

    #[test]
    fn check_dispatches_start_then_outcome() {
        let api = FakeApi {
            rider: Ok(Principal::new(json!({"_id": "u1"}))),
            captain: Err(unauthorized()),
        };
        let seen = RefCell::new(Vec::new());
        block_on(check_session(&api, ActorKind::Rider, |a| seen.borrow_mut().push(a)));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], SessionAction::CheckStarted);
        assert!(matches!(seen[1], SessionAction::CheckSucceeded(_)));
    }

    #[test]
    fn bootstrap_settles_both_slices_independently() {
        let api = FakeApi {
            rider: Ok(Principal::new(json!({"_id": "u1"}))),
            captain: Err(ApiError::Network("offline".into())),
        };
        let slices = RefCell::new(SessionSlices::default());
        block_on(bootstrap_sessions(&api, |kind, action| slices.borrow_mut().apply(kind, action)));

        let slices = slices.into_inner();
        assert!(!slices.rider.is_loading);
        assert!(!slices.captain.is_loading);
        assert_eq!(slices.rider.principal.as_ref().and_then(|p| p.id()), Some("u1"));
        assert!(slices.captain.principal.is_none());
    }

    #[test]
    fn bootstrap_with_both_failing_leaves_nobody_logged_in() {
        let api = FakeApi {
            rider: Err(unauthorized()),
            captain: Err(unauthorized()),
        };
        let slices = RefCell::new(SessionSlices::default());
        block_on(bootstrap_sessions(&api, |kind, action| slices.borrow_mut().apply(kind, action)));

        let slices = slices.into_inner();
        assert_eq!(slices, SessionSlices {
            rider: SessionSlice { is_loading: false, principal: None },
            captain: SessionSlice { is_loading: false, principal: None },
        });
    }
}
