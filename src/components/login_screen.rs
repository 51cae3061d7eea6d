use yew::prelude::*;
use yew_router::prelude::*;
use web_sys::HtmlInputElement;

use crate::hooks::use_session_store;
use crate::models::ActorKind;
use crate::routes::Route;
use crate::services::{auth_service, ApiClient};

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub kind: ActorKind,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let kind = props.kind;
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);
    let sessions = use_session_store();
    let navigator = use_navigator();

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let email = email_input.value();
            let password = password_input.value();

            let error = error.clone();
            let submitting = submitting.clone();
            let sessions = sessions.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match auth_service::login(&ApiClient::new(), kind, &email, &password).await {
                    Ok(principal) => {
                        email_input.set_value("");
                        password_input.set_value("");
                        sessions.set_principal(kind, principal);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::home_for(kind));
                        }
                    }
                    Err(e) => {
                        log::error!("❌ Login de {} fallido: {}", kind, e);
                        error.set(Some(e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let (title, switch_route, switch_label) = match kind {
        ActorKind::Rider => ("Rider login", Route::CaptainLogin, "Sign in as Captain"),
        ActorKind::Captain => ("Captain login", Route::RiderLogin, "Sign in as User"),
    };

    html! {
        <div class="login-screen">
            <div class="login-container">
                <h1>{title}</h1>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"What's your email"}</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="email@example.com"
                            ref={email_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Enter Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="password"
                            ref={password_ref}
                            required=true
                        />
                    </div>

                    if let Some(message) = (*error).clone() {
                        <p class="login-error">{message}</p>
                    }

                    <button type="submit" class="btn-login" disabled={*submitting}>
                        {if *submitting { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="login-switch">
                    {"New here? "}
                    <Link<Route> to={Route::signup_for(kind)}>{"Create new Account"}</Link<Route>>
                </p>
            </div>

            <Link<Route> to={switch_route} classes="btn-switch-actor">{switch_label}</Link<Route>>
        </div>
    }
}
