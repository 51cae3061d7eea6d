use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(StartScreen)]
pub fn start_screen() -> Html {
    html! {
        <div class="start-screen">
            <h1 class="start-title">{"Ride"}</h1>
            <div class="start-actions">
                <h2>{"Get started"}</h2>
                <Link<Route> to={Route::RiderLogin} classes="btn btn-primary">{"Continue"}</Link<Route>>
                <Link<Route> to={Route::CaptainLogin} classes="btn btn-secondary">{"Sign in as Captain"}</Link<Route>>
            </div>
        </div>
    }
}
