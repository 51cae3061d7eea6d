use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_session_store;
use crate::models::ActorKind;
use crate::routes::Route;
use crate::state::{guard_decision, GuardDecision};

/// Quién puede ver una ruta y adónde se manda al resto
#[derive(Clone, Debug, PartialEq)]
pub struct GuardDescriptor {
    pub kind: ActorKind,
    pub login_route: Route,
}

impl GuardDescriptor {
    pub fn for_kind(kind: ActorKind) -> Self {
        Self {
            kind,
            login_route: Route::login_for(kind),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub guard: GuardDescriptor,
    pub children: Children,
}

/// Muestra los hijos solo a un actor autenticado. Nunca lanza una comprobación
/// de sesión; espera la del arranque.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let sessions = use_session_store();
    let slice = sessions.slice(props.guard.kind);

    match guard_decision(&slice) {
        GuardDecision::Loading => html! { <h1>{"Loading..."}</h1> },
        GuardDecision::Render => html! { <>{props.children.clone()}</> },
        GuardDecision::Redirect => {
            log::info!("🔐 Sin sesión de {}, redirigiendo a {:?}", props.guard.kind, props.guard.login_route);
            html! { <Redirect<Route> to={props.guard.login_route.clone()} /> }
        }
    }
}
