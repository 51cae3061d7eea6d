use yew::prelude::*;
use yew_router::prelude::*;

use super::live_tracking::LiveTracking;
use crate::hooks::{use_channel, use_session_store};
use crate::models::ActorKind;
use crate::routes::Route;
use crate::services::realtime::Subscription;

#[function_component(CaptainHome)]
pub fn captain_home() -> Html {
    let sessions = use_session_store();
    let channel = use_channel();
    let captain = sessions.principal(ActorKind::Captain);
    let captain_id = captain.as_ref().and_then(|p| p.id().map(str::to_string));

    use_effect_with(captain_id, move |captain_id| {
        let subscription = captain_id.as_ref().and_then(|id| match channel.get_or_create() {
            Ok(handle) => Some(Subscription::join(handle, ActorKind::Captain, id)),
            Err(e) => {
                log::error!("❌ Canal en tiempo real no disponible: {}", e);
                None
            }
        });
        move || drop(subscription)
    });

    let name = captain
        .as_ref()
        .and_then(|p| p.display_name())
        .unwrap_or_else(|| "Captain".to_string());

    html! {
        <div class="captain-home">
            <Link<Route> to={Route::CaptainLogout} classes="btn-logout">{"Logout"}</Link<Route>>
            <div class="captain-map">
                <LiveTracking />
            </div>
            <div class="captain-details">
                <h4>{name}</h4>
                <p>{"Waiting for ride requests"}</p>
            </div>
        </div>
    }
}
