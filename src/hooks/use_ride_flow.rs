// ============================================================================
// USE RIDE FLOW - Orquestación del home del rider (REST + eventos en tiempo real)
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_channel;
use crate::models::{ActorKind, CreateRideRequest, Principal};
use crate::services::realtime::Subscription;
use crate::services::ApiClient;
use crate::state::{ride_event_from_message, RideEvent, RideFlow, RideStage};

const RIDE_EVENTS: [&str; 2] = ["ride-confirmed", "ride-started"];

#[derive(Clone)]
pub struct UseRideFlowHandle {
    pub flow: UseReducerHandle<RideFlow>,
    pub submit_trip: Callback<(String, String)>,
    pub choose_vehicle: Callback<String>,
    pub confirm: Callback<()>,
    pub reset: Callback<()>,
}

#[hook]
pub fn use_ride_flow(rider: Option<Principal>) -> UseRideFlowHandle {
    let flow = use_reducer(RideFlow::default);
    let fare_seq = use_mut_ref(|| 0u32);
    let channel = use_channel();

    // Tiempo real: join como este rider y seguir el ciclo del viaje
    {
        let flow = flow.clone();
        let rider_id = rider.as_ref().and_then(|p| p.id().map(str::to_string));

        use_effect_with(rider_id, move |rider_id| {
            let subscription = rider_id.as_ref().and_then(|id| match channel.get_or_create() {
                Ok(handle) => {
                    let mut subscription = Subscription::join(handle, ActorKind::Rider, id);
                    for event in RIDE_EVENTS {
                        let flow = flow.clone();
                        subscription.listen(event, move |data| {
                            if let Some(action) = ride_event_from_message(event, data) {
                                flow.dispatch(action);
                            }
                        });
                    }
                    Some(subscription)
                }
                Err(e) => {
                    log::error!("❌ Canal en tiempo real no disponible: {}", e);
                    None
                }
            });

            // Solo se quitan los listeners de esta pantalla; el canal sigue abierto
            move || drop(subscription)
        });
    }

    let submit_trip = {
        let flow = flow.clone();
        let fare_seq = fare_seq.clone();
        Callback::from(move |(pickup, destination): (String, String)| {
            let request = {
                let mut seq = fare_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            flow.dispatch(RideEvent::TripSubmitted {
                request,
                pickup: pickup.clone(),
                destination: destination.clone(),
            });
            if pickup.trim().is_empty() || destination.trim().is_empty() {
                return;
            }

            let flow = flow.clone();
            spawn_local(async move {
                match ApiClient::new().get_fare(pickup.trim(), destination.trim()).await {
                    Ok(fares) => flow.dispatch(RideEvent::FareLoaded { request, fares }),
                    Err(e) => {
                        log::error!("❌ Error obteniendo tarifas: {}", e);
                        flow.dispatch(RideEvent::FareFailed { request });
                    }
                }
            });
        })
    };

    let choose_vehicle = {
        let flow = flow.clone();
        Callback::from(move |vehicle: String| flow.dispatch(RideEvent::VehicleChosen(vehicle)))
    };

    let confirm = {
        let flow = flow.clone();
        Callback::from(move |_| {
            if flow.stage != RideStage::VehicleSelected {
                return;
            }
            let Some(vehicle_type) = flow.vehicle_type.clone() else {
                return;
            };
            let request = CreateRideRequest {
                pickup: flow.pickup.clone(),
                destination: flow.destination.clone(),
                vehicle_type,
            };
            flow.dispatch(RideEvent::ConfirmRequested);

            let flow = flow.clone();
            spawn_local(async move {
                match ApiClient::new().create_ride(&request).await {
                    Ok(ride) => flow.dispatch(RideEvent::RideCreated(ride)),
                    Err(e) => {
                        log::error!("❌ Viaje no creado: {}", e);
                        flow.dispatch(RideEvent::RideCreateFailed);
                    }
                }
            });
        })
    };

    let reset = {
        let flow = flow.clone();
        Callback::from(move |_| flow.dispatch(RideEvent::Reset))
    };

    UseRideFlowHandle {
        flow,
        submit_trip,
        choose_vehicle,
        confirm,
        reset,
    }
}
