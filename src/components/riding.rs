use yew::prelude::*;
use yew_router::prelude::*;

use super::live_tracking::LiveTracking;
use crate::models::Ride;
use crate::routes::Route;

/// Viaje en curso. El viaje llega como estado de navegación desde el home;
/// al recargar se pierde y solo queda el mapa.
#[function_component(Riding)]
pub fn riding() -> Html {
    let location = use_location();
    let ride = location.and_then(|l| l.state::<Ride>());

    let details = match ride {
        Some(ride) => html! {
            <div class="ride-details">
                <h3>{"On your way"}</h3>
                if let Some(destination) = ride.destination.clone() {
                    <p class="ride-destination">{destination}</p>
                }
                if let Some(fare) = ride.field_text("fare") {
                    <h3 class="ride-fare">{format!("₹{}", fare)}</h3>
                    <p>{"Cash"}</p>
                }
                if let Some(status) = ride.status.clone() {
                    <p class="ride-status">{status}</p>
                }
            </div>
        },
        None => html! { <p class="ride-details">{"Ride details unavailable"}</p> },
    };

    html! {
        <div class="riding-screen">
            <Link<Route> to={Route::Home} classes="btn-home">{"🏠"}</Link<Route>>
            <div class="riding-map">
                <LiveTracking />
            </div>
            {details}
        </div>
    }
}
