use super::session_state::SessionSlice;

/// Qué hace un guard de ruta con la sesión actual
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect,
}

pub fn guard_decision(slice: &SessionSlice) -> GuardDecision {
    if slice.is_loading {
        GuardDecision::Loading
    } else if slice.principal.is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Principal;
    use serde_json::json;

    #[test]
    fn loading_shows_placeholder() {
        let slice = SessionSlice { is_loading: true, principal: None };
        assert_eq!(guard_decision(&slice), GuardDecision::Loading);

        // Sigue cargando aunque quede un principal antiguo
        let slice = SessionSlice {
            is_loading: true,
            principal: Some(Principal::new(json!({"id": "u1"}))),
        };
        assert_eq!(guard_decision(&slice), GuardDecision::Loading);
    }

    #[test]
    fn settled_without_principal_redirects() {
        let slice = SessionSlice { is_loading: false, principal: None };
        assert_eq!(guard_decision(&slice), GuardDecision::Redirect);
    }

    #[test]
    fn settled_with_principal_renders_children() {
        let slice = SessionSlice {
            is_loading: false,
            principal: Some(Principal::new(json!({"id": "u1"}))),
        };
        assert_eq!(guard_decision(&slice), GuardDecision::Render);
    }
}
