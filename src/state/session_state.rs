// ============================================================================
// SESSION STATE - Una sesión de autenticación por tipo de actor
// ============================================================================
// Solo cambia con `SessionAction`; en Yew cada sesión vive en un
// `use_reducer` de `SessionProvider`.
// ============================================================================

use std::rc::Rc;
use yew::Reducible;

use crate::models::{ActorKind, Principal};

/// `{is_loading, principal}` for one actor kind
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSlice {
    pub is_loading: bool,
    pub principal: Option<Principal>,
}

impl Default for SessionSlice {
    fn default() -> Self {
        Self {
            is_loading: true,
            principal: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    /// `check_session` lanzado
    CheckStarted,
    CheckSucceeded(Principal),
    CheckFailed,
    /// Login o registro
    SetPrincipal(Principal),
    /// Logout
    ClearPrincipal,
}

impl SessionSlice {
    pub fn apply(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::CheckStarted => Self {
                is_loading: true,
                principal: self.principal.clone(),
            },
            SessionAction::CheckSucceeded(principal) | SessionAction::SetPrincipal(principal) => Self {
                is_loading: false,
                principal: Some(principal),
            },
            SessionAction::CheckFailed | SessionAction::ClearPrincipal => Self {
                is_loading: false,
                principal: None,
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.principal.is_some()
    }
}

impl Reducible for SessionSlice {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Las dos sesiones juntas. Nunca se leen entre sí.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSlices {
    pub rider: SessionSlice,
    pub captain: SessionSlice,
}

impl SessionSlices {
    pub fn slice(&self, kind: ActorKind) -> &SessionSlice {
        match kind {
            ActorKind::Rider => &self.rider,
            ActorKind::Captain => &self.captain,
        }
    }

    pub fn apply(&mut self, kind: ActorKind, action: SessionAction) {
        let slot = match kind {
            ActorKind::Rider => &mut self.rider,
            ActorKind::Captain => &mut self.captain,
        };
        *slot = slot.apply(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn principal(id: &str) -> Principal {
        Principal::new(json!({ "_id": id }))
    }

    #[test]
    fn starts_loading_without_principal() {
        let slice = SessionSlice::default();
        assert!(slice.is_loading);
        assert!(slice.principal.is_none());
    }

    #[test]
    fn loading_clears_after_any_check_outcome() {
        let sequences: [&[bool]; 4] = [&[true], &[false], &[true, false], &[false, false, true]];

        for sequence in sequences {
            let mut slice = SessionSlice::default();
            for (i, succeeded) in sequence.iter().enumerate() {
                slice = slice.apply(SessionAction::CheckStarted);
                assert!(slice.is_loading);

                let outcome = if *succeeded {
                    SessionAction::CheckSucceeded(principal(&format!("u{i}")))
                } else {
                    SessionAction::CheckFailed
                };
                slice = slice.apply(outcome);
                assert!(!slice.is_loading);
                assert_eq!(slice.principal.is_some(), *succeeded);
            }
        }
    }

    #[test]
    fn failed_check_drops_principal() {
        let slice = SessionSlice::default()
            .apply(SessionAction::SetPrincipal(principal("u1")))
            .apply(SessionAction::CheckStarted)
            .apply(SessionAction::CheckFailed);
        assert_eq!(slice.principal, None);
        assert!(!slice.is_loading);
    }

    #[test]
    fn login_and_logout_force_loading_off() {
        let slice = SessionSlice::default().apply(SessionAction::SetPrincipal(principal("u1")));
        assert!(slice.is_authenticated());

        let slice = SessionSlice::default().apply(SessionAction::ClearPrincipal);
        assert!(!slice.is_loading);
        assert!(slice.principal.is_none());
    }

    #[test]
    fn slices_are_independent() {
        let mut slices = SessionSlices::default();
        slices.apply(ActorKind::Rider, SessionAction::CheckSucceeded(principal("u1")));
        slices.apply(ActorKind::Captain, SessionAction::CheckFailed);

        assert_eq!(slices.slice(ActorKind::Rider).principal, Some(principal("u1")));
        assert!(slices.slice(ActorKind::Captain).principal.is_none());

        slices.apply(ActorKind::Captain, SessionAction::ClearPrincipal);
        assert!(slices.slice(ActorKind::Rider).is_authenticated());
    }

    #[test]
    fn reducer_keeps_identity_when_nothing_changes() {
        let slice = Rc::new(SessionSlice::default().apply(SessionAction::ClearPrincipal));
        let next = slice.clone().reduce(SessionAction::ClearPrincipal);
        assert!(Rc::ptr_eq(&slice, &next));
    }
}
