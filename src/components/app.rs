use yew::prelude::*;
use yew_router::prelude::*;

use super::captain_home::CaptainHome;
use super::channel_provider::ChannelProvider;
use super::home::Home;
use super::login_screen::LoginScreen;
use super::logout::LogoutScreen;
use super::protected_route::{GuardDescriptor, ProtectedRoute};
use super::riding::Riding;
use super::session_provider::SessionProvider;
use super::signup_screen::SignupScreen;
use super::start::StartScreen;
use crate::hooks::use_session_store;
use crate::models::ActorKind;
use crate::routes::Route;

fn protected(kind: ActorKind, page: Html) -> Html {
    html! {
        <ProtectedRoute guard={GuardDescriptor::for_kind(kind)}>
            {page}
        </ProtectedRoute>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Start => html! { <StartScreen /> },
        Route::RiderLogin => html! { <LoginScreen kind={ActorKind::Rider} /> },
        Route::CaptainLogin => html! { <LoginScreen kind={ActorKind::Captain} /> },
        Route::RiderSignup => html! { <SignupScreen kind={ActorKind::Rider} /> },
        Route::CaptainSignup => html! { <SignupScreen kind={ActorKind::Captain} /> },
        Route::Home => protected(ActorKind::Rider, html! { <Home /> }),
        Route::Riding => protected(ActorKind::Rider, html! { <Riding /> }),
        Route::RiderLogout => protected(ActorKind::Rider, html! { <LogoutScreen kind={ActorKind::Rider} /> }),
        Route::CaptainHome => protected(ActorKind::Captain, html! { <CaptainHome /> }),
        Route::CaptainLogout => protected(ActorKind::Captain, html! { <LogoutScreen kind={ActorKind::Captain} /> }),
        Route::NotFound => html! { <Redirect<Route> to={Route::Start} /> },
    }
}

/// Las rutas se muestran cuando terminan las dos comprobaciones de sesión
#[function_component(Shell)]
fn shell() -> Html {
    let sessions = use_session_store();
    if !sessions.is_booted() {
        return html! { <div class="app-loading"><h1>{"Loading..."}</h1></div> };
    }
    html! { <Switch<Route> render={switch} /> }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <ChannelProvider>
                    <Shell />
                </ChannelProvider>
            </SessionProvider>
        </BrowserRouter>
    }
}
