// ============================================================================
// SIGNUP SCREEN - Registro de riders y capitanes
// ============================================================================
// Mismo flujo que el login: al registrarse se guarda el token, se rellena
// la sesión y se navega al home del actor.
// ============================================================================

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_session_store;
use crate::models::{ActorKind, FullName, SignupRequest, VehicleDetails, VEHICLE_TYPES};
use crate::routes::Route;
use crate::services::{auth_service, ApiClient};

fn input_text(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>().map(|input| input.value()).unwrap_or_default()
}

fn select_text(node: &NodeRef) -> String {
    node.cast::<HtmlSelectElement>().map(|select| select.value()).unwrap_or_default()
}

#[derive(Clone, Default, PartialEq)]
struct VehicleRefs {
    color: NodeRef,
    plate: NodeRef,
    capacity: NodeRef,
    vehicle_type: NodeRef,
}

impl VehicleRefs {
    fn read(&self) -> VehicleDetails {
        VehicleDetails {
            color: input_text(&self.color),
            plate: input_text(&self.plate),
            // Vacío o no numérico queda en 0 y lo rechaza la validación
            capacity: input_text(&self.capacity).trim().parse().unwrap_or(0),
            vehicle_type: select_text(&self.vehicle_type),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SignupScreenProps {
    pub kind: ActorKind,
}

#[function_component(SignupScreen)]
pub fn signup_screen(props: &SignupScreenProps) -> Html {
    let kind = props.kind;
    let firstname_ref = use_node_ref();
    let lastname_ref = use_node_ref();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let vehicle_refs = use_memo((), |_| VehicleRefs::default());
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);
    let sessions = use_session_store();
    let navigator = use_navigator();

    let on_submit = {
        let firstname_ref = firstname_ref.clone();
        let lastname_ref = lastname_ref.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let vehicle_refs = vehicle_refs.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let request = SignupRequest {
                fullname: FullName {
                    firstname: input_text(&firstname_ref),
                    lastname: input_text(&lastname_ref),
                },
                email: input_text(&email_ref),
                password: input_text(&password_ref),
                vehicle: (kind == ActorKind::Captain).then(|| vehicle_refs.read()),
            };

            let error = error.clone();
            let submitting = submitting.clone();
            let sessions = sessions.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match auth_service::signup(&ApiClient::new(), kind, request).await {
                    Ok(principal) => {
                        sessions.set_principal(kind, principal);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::home_for(kind));
                        }
                    }
                    Err(e) => {
                        log::error!("❌ Registro de {} fallido: {}", kind, e);
                        error.set(Some(e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let (title, switch_route, switch_label) = match kind {
        ActorKind::Rider => ("Create your account", Route::CaptainSignup, "Register as a Captain"),
        ActorKind::Captain => ("Register as a Captain", Route::RiderSignup, "Sign up as a User"),
    };

    html! {
        <div class="login-screen signup-screen">
            <div class="login-container">
                <h1>{title}</h1>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label>{"What's your name"}</label>
                        <div class="form-row">
                            <input type="text" placeholder="First name" ref={firstname_ref} required=true />
                            <input type="text" placeholder="Last name" ref={lastname_ref} />
                        </div>
                    </div>

                    <div class="form-group">
                        <label for="email">{"What's your email"}</label>
                        <input type="email" id="email" placeholder="email@example.com" ref={email_ref} required=true />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Enter Password"}</label>
                        <input type="password" id="password" placeholder="password" ref={password_ref} required=true />
                    </div>

                    if kind == ActorKind::Captain {
                        <div class="form-group">
                            <label>{"Vehicle Information"}</label>
                            <div class="form-row">
                                <input type="text" placeholder="Vehicle Color" ref={vehicle_refs.color.clone()} required=true />
                                <input type="text" placeholder="Vehicle Plate" ref={vehicle_refs.plate.clone()} required=true />
                            </div>
                            <div class="form-row">
                                <input type="number" min="1" placeholder="Vehicle Capacity" ref={vehicle_refs.capacity.clone()} required=true />
                                <select ref={vehicle_refs.vehicle_type.clone()} required=true>
                                    <option value="" selected=true disabled=true>{"Select Vehicle Type"}</option>
                                    { for VEHICLE_TYPES.iter().map(|vehicle| html! {
                                        <option value={*vehicle}>{*vehicle}</option>
                                    }) }
                                </select>
                            </div>
                        </div>
                    }

                    if let Some(message) = (*error).clone() {
                        <p class="login-error">{message}</p>
                    }

                    <button type="submit" class="btn-login" disabled={*submitting}>
                        {if *submitting { "Creating account..." } else { "Create account" }}
                    </button>
                </form>

                <p class="login-switch">
                    {"Already have an account? "}
                    <Link<Route> to={Route::login_for(kind)}>{"Login here"}</Link<Route>>
                </p>
            </div>

            <Link<Route> to={switch_route} classes="btn-switch-actor">{switch_label}</Link<Route>>
        </div>
    }
}
