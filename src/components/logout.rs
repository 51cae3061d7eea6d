use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::{use_channel, use_session_store};
use crate::models::ActorKind;
use crate::routes::Route;
use crate::services::{auth_service, ApiClient};

#[derive(Properties, PartialEq)]
pub struct LogoutScreenProps {
    pub kind: ActorKind,
}

/// Cierra la sesión al montarse. El estado local se limpia conteste lo que
/// conteste el backend y después se muestra el login.
#[function_component(LogoutScreen)]
pub fn logout_screen(props: &LogoutScreenProps) -> Html {
    let kind = props.kind;
    let sessions = use_session_store();
    let channel = use_channel();
    let navigator = use_navigator();

    use_effect_with(kind, move |kind| {
        let kind = *kind;
        wasm_bindgen_futures::spawn_local(async move {
            auth_service::logout(&ApiClient::new(), kind).await;
            channel.close();
            sessions.clear_principal(kind);
            if let Some(navigator) = navigator {
                navigator.replace(&Route::login_for(kind));
            }
        });
        || ()
    });

    html! { <div class="logout-screen">{"Logging out..."}</div> }
}
