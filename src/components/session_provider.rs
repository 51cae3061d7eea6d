// ============================================================================
// SESSION PROVIDER - Sesiones de rider y capitán como contexto
// ============================================================================
// Lanza las dos comprobaciones de sesión una vez al montarse. Los hijos leen
// las sesiones con `use_session_store()`.
// ============================================================================

use yew::prelude::*;

use crate::models::{ActorKind, Principal};
use crate::services::{bootstrap_sessions, ApiClient};
use crate::state::{SessionAction, SessionSlice};

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    rider: UseReducerHandle<SessionSlice>,
    captain: UseReducerHandle<SessionSlice>,
}

impl SessionContext {
    fn handle(&self, kind: ActorKind) -> &UseReducerHandle<SessionSlice> {
        match kind {
            ActorKind::Rider => &self.rider,
            ActorKind::Captain => &self.captain,
        }
    }

    pub fn slice(&self, kind: ActorKind) -> SessionSlice {
        (**self.handle(kind)).clone()
    }

    pub fn principal(&self, kind: ActorKind) -> Option<Principal> {
        self.handle(kind).principal.clone()
    }

    pub fn dispatch(&self, kind: ActorKind, action: SessionAction) {
        self.handle(kind).dispatch(action);
    }

    pub fn set_principal(&self, kind: ActorKind, principal: Principal) {
        self.dispatch(kind, SessionAction::SetPrincipal(principal));
    }

    pub fn clear_principal(&self, kind: ActorKind) {
        self.dispatch(kind, SessionAction::ClearPrincipal);
    }

    /// Ya terminaron las dos comprobaciones de arranque
    pub fn is_booted(&self) -> bool {
        !self.rider.is_loading && !self.captain.is_loading
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let rider = use_reducer(SessionSlice::default);
    let captain = use_reducer(SessionSlice::default);
    let context = SessionContext { rider, captain };

    {
        let context = context.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let api = ApiClient::new();
                bootstrap_sessions(&api, |kind, action| context.dispatch(kind, action)).await;
            });
            || ()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
