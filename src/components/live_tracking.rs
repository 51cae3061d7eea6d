use yew::prelude::*;

use crate::hooks::use_live_position;

/// Mapa a pantalla completa que sigue la posición del dispositivo
#[function_component(LiveTracking)]
pub fn live_tracking() -> Html {
    let container = use_node_ref();
    let live = use_live_position(container.clone());

    html! {
        <div class="live-tracking">
            <div id="ola-map-container" class="map-container" ref={container}></div>
            if let Some(message) = live.map_error {
                <div class="map-error">{format!("Map unavailable: {}", message)}</div>
            }
        </div>
    }
}
