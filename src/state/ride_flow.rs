// ============================================================================
// RIDE FLOW - Máquina de estados del home del rider
// ============================================================================
// Idle -> FareRequested -> VehicleSelected -> Confirmed -> SearchingDriver
//      -> WaitingForDriver -> Riding
//
// Los eventos que no encajan en la etapa actual se ignoran; así se descartan
// también las respuestas tardías (tarifas, ride-create).
// ============================================================================

use serde_json::Value;
use std::rc::Rc;
use yew::Reducible;

use crate::models::{FareQuote, FareTable, Ride};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RideStage {
    #[default]
    Idle,
    FareRequested,
    VehicleSelected,
    Confirmed,
    SearchingDriver,
    WaitingForDriver,
    Riding,
}

/// Panel inferior visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Search,
    Vehicles,
    Confirm,
    LookingForDriver,
    WaitingForDriver,
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RideEvent {
    TripSubmitted {
        request: u32,
        pickup: String,
        destination: String,
    },
    FareLoaded {
        request: u32,
        fares: FareTable,
    },
    FareFailed {
        request: u32,
    },
    VehicleChosen(String),
    ConfirmRequested,
    RideCreated(Ride),
    RideCreateFailed,
    /// `ride-confirmed` en tiempo real
    RideConfirmed(Ride),
    /// `ride-started` en tiempo real
    RideStarted(Ride),
    Reset,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RideFlow {
    pub stage: RideStage,
    pub pickup: String,
    pub destination: String,
    pub fares: Option<FareTable>,
    pub vehicle_type: Option<String>,
    pub ride: Option<Ride>,
    /// Secuencia de la consulta de tarifas cuya respuesta aún se espera
    pub fare_request: u32,
}

impl RideFlow {
    /// Siguiente estado, o `None` si el evento no aplica en esta etapa
    pub fn apply(&self, event: RideEvent) -> Option<Self> {
        use RideStage::*;

        match (self.stage, event) {
            (Idle | FareRequested | VehicleSelected, RideEvent::TripSubmitted { request, pickup, destination }) => {
                let pickup = pickup.trim().to_string();
                let destination = destination.trim().to_string();
                if pickup.is_empty() || destination.is_empty() {
                    return None;
                }
                Some(Self {
                    stage: FareRequested,
                    pickup,
                    destination,
                    fares: None,
                    vehicle_type: None,
                    ride: None,
                    fare_request: request,
                })
            }
            (FareRequested, RideEvent::FareLoaded { request, fares }) if request == self.fare_request => Some(Self {
                fares: Some(fares),
                ..self.clone()
            }),
            (FareRequested, RideEvent::FareFailed { request }) if request == self.fare_request => Some(Self {
                stage: Idle,
                fares: None,
                ..self.clone()
            }),
            (FareRequested | VehicleSelected, RideEvent::VehicleChosen(vehicle)) => {
                let offered = self.fares.as_ref().is_some_and(|f| f.contains_key(&vehicle));
                if !offered {
                    return None;
                }
                Some(Self {
                    stage: VehicleSelected,
                    vehicle_type: Some(vehicle),
                    ..self.clone()
                })
            }
            (VehicleSelected, RideEvent::ConfirmRequested) => Some(Self {
                stage: Confirmed,
                ..self.clone()
            }),
            (Confirmed, RideEvent::RideCreated(ride)) => Some(Self {
                stage: SearchingDriver,
                ride: Some(ride),
                ..self.clone()
            }),
            (Confirmed, RideEvent::RideCreateFailed) => Some(Self {
                stage: VehicleSelected,
                ..self.clone()
            }),
            // El conductor puede aceptar antes de que vuelva la respuesta de create
            (Confirmed | SearchingDriver, RideEvent::RideConfirmed(ride)) => Some(Self {
                stage: WaitingForDriver,
                ride: Some(ride),
                ..self.clone()
            }),
            (WaitingForDriver, RideEvent::RideStarted(ride)) => Some(Self {
                stage: Riding,
                ride: Some(ride),
                ..self.clone()
            }),
            (Riding, RideEvent::Reset) => None,
            (_, RideEvent::Reset) => Some(Self {
                pickup: self.pickup.clone(),
                destination: self.destination.clone(),
                fare_request: self.fare_request,
                ..Self::default()
            }),
            _ => None,
        }
    }

    pub fn panel(&self) -> Panel {
        match self.stage {
            RideStage::Idle => Panel::Search,
            RideStage::FareRequested if self.fares.is_some() => Panel::Vehicles,
            RideStage::FareRequested => Panel::Search,
            RideStage::VehicleSelected => Panel::Confirm,
            RideStage::Confirmed | RideStage::SearchingDriver => Panel::LookingForDriver,
            RideStage::WaitingForDriver => Panel::WaitingForDriver,
            RideStage::Riding => Panel::None,
        }
    }

    pub fn selected_fare(&self) -> Option<&FareQuote> {
        let vehicle = self.vehicle_type.as_ref()?;
        self.fares.as_ref()?.get(vehicle)
    }
}

impl Reducible for RideFlow {
    type Action = RideEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let label = event_label(&action);
        match self.apply(action) {
            Some(next) => {
                log::info!("🚕 Flujo del viaje: {:?} -> {:?} ({})", self.stage, next.stage, label);
                Rc::new(next)
            }
            None => {
                log::warn!("⚠️ Flujo del viaje: se ignora {} en {:?}", label, self.stage);
                self
            }
        }
    }
}

fn event_label(event: &RideEvent) -> &'static str {
    match event {
        RideEvent::TripSubmitted { .. } => "trip-submitted",
        RideEvent::FareLoaded { .. } => "fare-loaded",
        RideEvent::FareFailed { .. } => "fare-failed",
        RideEvent::VehicleChosen(_) => "vehicle-chosen",
        RideEvent::ConfirmRequested => "confirm",
        RideEvent::RideCreated(_) => "ride-created",
        RideEvent::RideCreateFailed => "ride-create-failed",
        RideEvent::RideConfirmed(_) => "ride-confirmed",
        RideEvent::RideStarted(_) => "ride-started",
        RideEvent::Reset => "reset",
    }
}

/// Traduce un mensaje del canal a un evento del flujo
pub fn ride_event_from_message(event: &str, data: Value) -> Option<RideEvent> {
    let ride = || match Ride::from_value(data.clone()) {
        Ok(ride) => Some(ride),
        Err(e) => {
            log::error!("❌ Payload de {} mal formado: {}", event, e);
            None
        }
    };
    match event {
        "ride-confirmed" => ride().map(RideEvent::RideConfirmed),
        "ride-started" => ride().map(RideEvent::RideStarted),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fares() -> FareTable {
        serde_json::from_value(json!({
            "car": {"fare": 120, "eta": 3},
            "auto": {"fare": 80},
        }))
        .unwrap()
    }

    fn submit(flow: &RideFlow, request: u32) -> RideFlow {
        flow.apply(RideEvent::TripSubmitted {
            request,
            pickup: "A".into(),
            destination: "B".into(),
        })
        .unwrap()
    }

    fn ride(id: &str) -> Ride {
        Ride::from_value(json!({ "id": id })).unwrap()
    }

    #[test]
    fn full_happy_path() {
        let flow = submit(&RideFlow::default(), 1);
        assert_eq!(flow.stage, RideStage::FareRequested);
        assert_eq!(flow.panel(), Panel::Search);

        let flow = flow.apply(RideEvent::FareLoaded { request: 1, fares: fares() }).unwrap();
        assert_eq!(flow.panel(), Panel::Vehicles);
        assert_eq!(flow.fares.as_ref().unwrap()["car"].fare, 120.0);

        let flow = flow.apply(RideEvent::VehicleChosen("car".into())).unwrap();
        assert_eq!(flow.stage, RideStage::VehicleSelected);
        assert_eq!(flow.selected_fare().unwrap().fare, 120.0);

        let flow = flow.apply(RideEvent::ConfirmRequested).unwrap();
        assert_eq!(flow.panel(), Panel::LookingForDriver);

        let flow = flow.apply(RideEvent::RideCreated(ride("r0"))).unwrap();
        assert_eq!(flow.stage, RideStage::SearchingDriver);

        let flow = flow.apply(RideEvent::RideConfirmed(ride("r1"))).unwrap();
        assert_eq!(flow.stage, RideStage::WaitingForDriver);
        assert_eq!(flow.ride, Some(ride("r1")));

        let flow = flow.apply(RideEvent::RideStarted(ride("r1"))).unwrap();
        assert_eq!(flow.stage, RideStage::Riding);
        assert_eq!(flow.ride, Some(ride("r1")));
        assert_eq!(flow.panel(), Panel::None);
    }

    #[test]
    fn fare_failure_keeps_vehicle_panel_closed() {
        let flow = submit(&RideFlow::default(), 1);
        let flow = flow.apply(RideEvent::FareFailed { request: 1 }).unwrap();
        assert_eq!(flow.stage, RideStage::Idle);
        assert_eq!(flow.panel(), Panel::Search);
        assert!(flow.fares.is_none());
    }

    #[test]
    fn stale_fare_results_are_ignored() {
        let flow = submit(&RideFlow::default(), 1);
        let flow = submit(&flow, 2);
        assert!(flow.apply(RideEvent::FareLoaded { request: 1, fares: fares() }).is_none());
        assert!(flow.apply(RideEvent::FareFailed { request: 1 }).is_none());
        assert!(flow.apply(RideEvent::FareLoaded { request: 2, fares: fares() }).is_some());
    }

    #[test]
    fn blank_trip_is_rejected() {
        let flow = RideFlow::default();
        let next = flow.apply(RideEvent::TripSubmitted {
            request: 1,
            pickup: "  ".into(),
            destination: "B".into(),
        });
        assert!(next.is_none());
    }

    #[test]
    fn unknown_vehicle_cannot_be_chosen() {
        let flow = submit(&RideFlow::default(), 1)
            .apply(RideEvent::FareLoaded { request: 1, fares: fares() })
            .unwrap();
        assert!(flow.apply(RideEvent::VehicleChosen("helicopter".into())).is_none());
    }

    #[test]
    fn vehicle_cannot_be_chosen_before_fares_arrive() {
        let flow = submit(&RideFlow::default(), 1);
        assert!(flow.apply(RideEvent::VehicleChosen("car".into())).is_none());
    }

    #[test]
    fn create_failure_returns_to_confirmation() {
        let flow = submit(&RideFlow::default(), 1)
            .apply(RideEvent::FareLoaded { request: 1, fares: fares() })
            .and_then(|f| f.apply(RideEvent::VehicleChosen("auto".into())))
            .and_then(|f| f.apply(RideEvent::ConfirmRequested))
            .unwrap();

        let flow = flow.apply(RideEvent::RideCreateFailed).unwrap();
        assert_eq!(flow.stage, RideStage::VehicleSelected);
        assert_eq!(flow.panel(), Panel::Confirm);
        assert_eq!(flow.vehicle_type.as_deref(), Some("auto"));
    }

    #[test]
    fn driver_can_confirm_before_create_returns() {
        let flow = submit(&RideFlow::default(), 1)
            .apply(RideEvent::FareLoaded { request: 1, fares: fares() })
            .and_then(|f| f.apply(RideEvent::VehicleChosen("car".into())))
            .and_then(|f| f.apply(RideEvent::ConfirmRequested))
            .unwrap();

        let flow = flow.apply(RideEvent::RideConfirmed(ride("r1"))).unwrap();
        assert_eq!(flow.stage, RideStage::WaitingForDriver);

        // La respuesta tardía de create ya no aplica
        assert!(flow.apply(RideEvent::RideCreated(ride("r1"))).is_none());
    }

    #[test]
    fn realtime_events_out_of_stage_are_ignored() {
        let flow = RideFlow::default();
        assert!(flow.apply(RideEvent::RideConfirmed(ride("r1"))).is_none());
        assert!(flow.apply(RideEvent::RideStarted(ride("r1"))).is_none());
    }

    #[test]
    fn reset_keeps_typed_addresses() {
        let flow = submit(&RideFlow::default(), 4)
            .apply(RideEvent::FareLoaded { request: 4, fares: fares() })
            .unwrap();
        let flow = flow.apply(RideEvent::Reset).unwrap();
        assert_eq!(flow.stage, RideStage::Idle);
        assert_eq!(flow.pickup, "A");
        assert!(flow.fares.is_none());
        assert_eq!(flow.fare_request, 4);
    }

    #[test]
    fn channel_messages_map_to_events() {
        let event = ride_event_from_message("ride-confirmed", json!({"_id": "r1"})).unwrap();
        assert_eq!(event, RideEvent::RideConfirmed(ride("r1")));

        let event = ride_event_from_message("ride-started", json!({"id": "r1"})).unwrap();
        assert_eq!(event, RideEvent::RideStarted(ride("r1")));

        assert!(ride_event_from_message("ride-started", json!("oops")).is_none());
        assert!(ride_event_from_message("new-ride", json!({})).is_none());
    }
}
