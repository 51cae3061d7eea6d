// ============================================================================
// HOME - Home del rider: búsqueda de viaje, vehículo y conductor
// ============================================================================

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use super::live_tracking::LiveTracking;
use super::ride_panels::{ConfirmRide, LocationSearchPanel, LookingForDriver, VehiclePanel, WaitingForDriver};
use crate::hooks::{use_autocomplete, use_ride_flow, use_session_store, SearchField};
use crate::models::ActorKind;
use crate::routes::Route;
use crate::state::{Panel, RideStage};

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[function_component(Home)]
pub fn home() -> Html {
    let sessions = use_session_store();
    let rider = sessions.principal(ActorKind::Rider);
    let ride_flow = use_ride_flow(rider);
    let autocomplete = use_autocomplete();
    let navigator = use_navigator();

    let pickup = use_state(String::new);
    let destination = use_state(String::new);
    let search_open = use_state(|| false);

    // ride-started: el viaje pasa a la pantalla de riding
    {
        let stage = ride_flow.flow.stage;
        let ride = ride_flow.flow.ride.clone();
        use_effect_with((stage, ride), move |(stage, ride)| {
            if let (RideStage::Riding, Some(ride), Some(navigator)) = (stage, ride, navigator) {
                log::info!("🚕 Viaje iniciado, cambiando a la pantalla de riding");
                navigator.push_with_state(&Route::Riding, ride.clone());
            }
            || ()
        });
    }

    let on_field_input = |field: SearchField, value: UseStateHandle<String>| {
        let query = autocomplete.query.clone();
        let search_open = search_open.clone();
        Callback::from(move |e: InputEvent| {
            let text = input_value(&e);
            value.set(text.clone());
            search_open.set(true);
            query.emit((field, text));
        })
    };
    let on_pickup_input = on_field_input(SearchField::Pickup, pickup.clone());
    let on_destination_input = on_field_input(SearchField::Destination, destination.clone());

    // Enfocar o pulsar un input lo hace activo aunque no se escriba nada
    let on_field_focus = |field: SearchField| {
        let focus = autocomplete.focus.clone();
        let search_open = search_open.clone();
        Callback::from(move |_: FocusEvent| {
            search_open.set(true);
            focus.emit(field);
        })
    };
    let on_field_click = |field: SearchField| {
        let focus = autocomplete.focus.clone();
        let search_open = search_open.clone();
        Callback::from(move |_: MouseEvent| {
            search_open.set(true);
            focus.emit(field);
        })
    };

    let on_pick = {
        let field = autocomplete.field;
        let pickup = pickup.clone();
        let destination = destination.clone();
        let clear = autocomplete.clear.clone();
        Callback::from(move |label: String| {
            let Some(field) = field else {
                return;
            };
            match field {
                SearchField::Pickup => pickup.set(label),
                SearchField::Destination => destination.set(label),
            }
            clear.emit(field);
        })
    };

    let on_find_trip = {
        let submit_trip = ride_flow.submit_trip.clone();
        let pickup = pickup.clone();
        let destination = destination.clone();
        let search_open = search_open.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            search_open.set(false);
            submit_trip.emit(((*pickup).clone(), (*destination).clone()));
        })
    };

    let on_close_search = {
        let search_open = search_open.clone();
        Callback::from(move |_: MouseEvent| search_open.set(false))
    };

    let flow = &*ride_flow.flow;
    let panel = match flow.panel() {
        Panel::Search if *search_open => html! {
            <LocationSearchPanel suggestions={autocomplete.suggestions.clone()} on_pick={on_pick} />
        },
        Panel::Search | Panel::None => html! {},
        Panel::Vehicles => html! {
            <VehiclePanel
                fares={flow.fares.clone().unwrap_or_default()}
                on_choose={ride_flow.choose_vehicle.clone()}
                on_close={ride_flow.reset.clone()}
            />
        },
        Panel::Confirm => html! {
            <ConfirmRide
                pickup={flow.pickup.clone()}
                destination={flow.destination.clone()}
                fare={flow.selected_fare().cloned()}
                on_confirm={ride_flow.confirm.clone()}
                on_close={ride_flow.reset.clone()}
            />
        },
        Panel::LookingForDriver => html! {
            <LookingForDriver
                pickup={flow.pickup.clone()}
                destination={flow.destination.clone()}
                fare={flow.selected_fare().cloned()}
                on_close={ride_flow.reset.clone()}
            />
        },
        Panel::WaitingForDriver => html! {
            <WaitingForDriver ride={flow.ride.clone()} on_close={ride_flow.reset.clone()} />
        },
    };

    html! {
        <div class="home-screen">
            <Link<Route> to={Route::RiderLogout} classes="btn-logout">{"Logout"}</Link<Route>>
            <div class="home-map">
                <LiveTracking />
            </div>

            <div class="trip-search">
                if *search_open {
                    <h5 class="panel-close" onclick={on_close_search}>{"⌄"}</h5>
                }
                <h4>{"Find a trip"}</h4>
                <form onsubmit={on_find_trip}>
                    <input
                        type="text"
                        placeholder="Add a pick-up location"
                        value={(*pickup).clone()}
                        oninput={on_pickup_input}
                        onfocus={on_field_focus(SearchField::Pickup)}
                        onclick={on_field_click(SearchField::Pickup)}
                    />
                    <input
                        type="text"
                        placeholder="Enter your destination"
                        value={(*destination).clone()}
                        oninput={on_destination_input}
                        onfocus={on_field_focus(SearchField::Destination)}
                        onclick={on_field_click(SearchField::Destination)}
                    />
                    <button type="submit" class="btn-find-trip">{"Find Trip"}</button>
                </form>
            </div>

            <div class="bottom-panel">{panel}</div>
        </div>
    }
}
