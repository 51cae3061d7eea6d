use yew_router::prelude::*;

use crate::models::ActorKind;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Start,
    #[at("/login")]
    RiderLogin,
    #[at("/signup")]
    RiderSignup,
    #[at("/home")]
    Home,
    #[at("/riding")]
    Riding,
    #[at("/user/logout")]
    RiderLogout,
    #[at("/captain-login")]
    CaptainLogin,
    #[at("/captain-signup")]
    CaptainSignup,
    #[at("/captain-home")]
    CaptainHome,
    #[at("/captain/logout")]
    CaptainLogout,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn login_for(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Rider => Route::RiderLogin,
            ActorKind::Captain => Route::CaptainLogin,
        }
    }

    pub fn signup_for(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Rider => Route::RiderSignup,
            ActorKind::Captain => Route::CaptainSignup,
        }
    }

    pub fn home_for(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Rider => Route::Home,
            ActorKind::Captain => Route::CaptainHome,
        }
    }

    pub fn logout_for(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Rider => Route::RiderLogout,
            ActorKind::Captain => Route::CaptainLogout,
        }
    }
}
