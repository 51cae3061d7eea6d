// ============================================================================
// RIDE PANELS - Paneles inferiores del home del rider
// ============================================================================

use yew::prelude::*;

use crate::models::{FareQuote, FareTable, Ride, Suggestion};

fn format_fare(quote: &FareQuote) -> String {
    format!("₹{}", quote.fare)
}

fn fare_details(quote: &FareQuote) -> String {
    let parts: Vec<String> = ["duration", "distance"].iter().filter_map(|key| quote.detail(key)).collect();
    if parts.is_empty() {
        "Cash".to_string()
    } else {
        format!("Cash • {}", parts.join(" • "))
    }
}

#[derive(Properties, PartialEq)]
pub struct CloseHandleProps {
    pub on_close: Callback<()>,
}

#[function_component(CloseHandle)]
fn close_handle(props: &CloseHandleProps) -> Html {
    html! {
        <h5 class="panel-close" onclick={props.on_close.reform(|_| ())}>{"⌄"}</h5>
    }
}

// ==== LOCATION SEARCH ====

#[derive(Properties, PartialEq)]
pub struct LocationSearchPanelProps {
    pub suggestions: Vec<Suggestion>,
    pub on_pick: Callback<String>,
}

#[function_component(LocationSearchPanel)]
pub fn location_search_panel(props: &LocationSearchPanelProps) -> Html {
    html! {
        <div class="location-search-panel">
            { for props.suggestions.iter().map(|suggestion| {
                let label = suggestion.label().to_string();
                let on_pick = props.on_pick.reform({
                    let label = label.clone();
                    move |_| label.clone()
                });
                html! {
                    <div class="suggestion" onclick={on_pick}>
                        <span class="suggestion-icon">{"📍"}</span>
                        <h4>{label}</h4>
                    </div>
                }
            }) }
        </div>
    }
}

// ==== VEHICLES ====

#[derive(Properties, PartialEq)]
pub struct VehiclePanelProps {
    pub fares: FareTable,
    pub on_choose: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component(VehiclePanel)]
pub fn vehicle_panel(props: &VehiclePanelProps) -> Html {
    html! {
        <div class="vehicle-panel">
            <CloseHandle on_close={props.on_close.clone()} />
            <h3>{"Choose a Vehicle"}</h3>
            { for props.fares.iter().map(|(vehicle, quote)| {
                let on_choose = props.on_choose.reform({
                    let vehicle = vehicle.clone();
                    move |_| vehicle.clone()
                });
                html! {
                    <div class="vehicle-option" onclick={on_choose}>
                        <h4 class="vehicle-name">{vehicle.clone()}</h4>
                        <p class="vehicle-details">{fare_details(quote)}</p>
                        <h2 class="vehicle-fare">{format_fare(quote)}</h2>
                    </div>
                }
            }) }
        </div>
    }
}

// ==== CONFIRM ====

#[derive(Properties, PartialEq)]
pub struct TripSummaryProps {
    pub pickup: String,
    pub destination: String,
    pub fare: Option<FareQuote>,
}

#[function_component(TripSummary)]
fn trip_summary(props: &TripSummaryProps) -> Html {
    html! {
        <div class="trip-summary">
            <div class="trip-row">
                <h3>{"Pick-up"}</h3>
                <p>{props.pickup.clone()}</p>
            </div>
            <div class="trip-row">
                <h3>{"Destination"}</h3>
                <p>{props.destination.clone()}</p>
            </div>
            if let Some(quote) = &props.fare {
                <div class="trip-row">
                    <h3>{format_fare(quote)}</h3>
                    <p>{fare_details(quote)}</p>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmRideProps {
    pub pickup: String,
    pub destination: String,
    pub fare: Option<FareQuote>,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ConfirmRide)]
pub fn confirm_ride(props: &ConfirmRideProps) -> Html {
    let Some(quote) = props.fare.clone() else {
        return html! {
            <div class="confirm-panel">
                <CloseHandle on_close={props.on_close.clone()} />
                <p>{"Loading ride details..."}</p>
            </div>
        };
    };

    html! {
        <div class="confirm-panel">
            <CloseHandle on_close={props.on_close.clone()} />
            <h3>{"Confirm your Ride"}</h3>
            <TripSummary
                pickup={props.pickup.clone()}
                destination={props.destination.clone()}
                fare={Some(quote)}
            />
            <button class="btn-confirm" onclick={props.on_confirm.reform(|_| ())}>{"Confirm"}</button>
        </div>
    }
}

// ==== LOOKING FOR DRIVER ====

#[derive(Properties, PartialEq)]
pub struct LookingForDriverProps {
    pub pickup: String,
    pub destination: String,
    pub fare: Option<FareQuote>,
    pub on_close: Callback<()>,
}

#[function_component(LookingForDriver)]
pub fn looking_for_driver(props: &LookingForDriverProps) -> Html {
    html! {
        <div class="looking-panel">
            <CloseHandle on_close={props.on_close.clone()} />
            <h3>{"Looking for a Driver"}</h3>
            <TripSummary
                pickup={props.pickup.clone()}
                destination={props.destination.clone()}
                fare={props.fare.clone()}
            />
        </div>
    }
}

// ==== WAITING FOR DRIVER ====

#[derive(Properties, PartialEq)]
pub struct WaitingForDriverProps {
    pub ride: Option<Ride>,
    pub on_close: Callback<()>,
}

#[function_component(WaitingForDriver)]
pub fn waiting_for_driver(props: &WaitingForDriverProps) -> Html {
    let Some(ride) = &props.ride else {
        return html! {};
    };

    html! {
        <div class="waiting-panel">
            <CloseHandle on_close={props.on_close.clone()} />
            <h3>{"Your driver is on the way"}</h3>
            if let Some(otp) = ride.field_text("otp") {
                <h1 class="ride-otp">{otp}</h1>
            }
            <TripSummary
                pickup={ride.pickup.clone().unwrap_or_default()}
                destination={ride.destination.clone().unwrap_or_default()}
                fare={None::<FareQuote>}
            />
            if let Some(fare) = ride.field_text("fare") {
                <p class="ride-fare">{format!("₹{}", fare)}</p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fare_details_list_what_the_backend_sent() {
        let quote: FareQuote = serde_json::from_value(json!({"fare": 193.2, "duration": "12 mins", "distance": "4 km"})).unwrap();
        assert_eq!(format_fare(&quote), "₹193.2");
        assert_eq!(fare_details(&quote), "Cash • 12 mins • 4 km");

        let bare: FareQuote = serde_json::from_value(json!({"fare": 80})).unwrap();
        assert_eq!(fare_details(&bare), "Cash");
    }
}
