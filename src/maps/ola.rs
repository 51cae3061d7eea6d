// ============================================================================
// OLA MAPS - MapSurface sobre el SDK GL de Ola Maps (global `OlaMapsSDK`)
// ============================================================================

use serde::Serialize;
use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement};

use super::traits::{MapError, MapSurface};
use crate::config::MapConfig;
use crate::models::Position;

const SOURCE_ID: &str = "user-location-source";
const ACCURACY_LAYER_ID: &str = "accuracy-circle";
const MARKER_LAYER_ID: &str = "user-location";
const CAR_ICON_ID: &str = "car-icon";
const SDK_GLOBAL: &str = "OlaMapsSDK";

/// Coche mirando al norte; la rotación la aplica la capa con `heading`
const CAR_ICON_SVG: &str = r##"<svg width="32" height="32" viewBox="0 0 32 32" xmlns="http://www.w3.org/2000/svg"><ellipse cx="16" cy="26" rx="8" ry="3" fill="rgba(0,0,0,0.2)"/><path d="M8 20 L8 16 L10 12 L22 12 L24 16 L24 20 L22 22 L10 22 Z" fill="#000000" stroke="#FFFFFF" stroke-width="1"/><path d="M10 16 L11 13 L21 13 L22 16 Z" fill="#4A90E2"/><circle cx="11" cy="21" r="2" fill="#333333" stroke="#FFFFFF" stroke-width="1"/><circle cx="21" cy="21" r="2" fill="#333333" stroke="#FFFFFF" stroke-width="1"/><circle cx="16" cy="12" r="1" fill="#FFFF00"/></svg>"##;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = OlaMapsSDK)]
    type OlaMaps;

    #[wasm_bindgen(constructor, js_namespace = OlaMapsSDK, catch)]
    fn new(options: &JsValue) -> Result<OlaMaps, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn init(this: &OlaMaps, options: &JsValue) -> Result<MapHandle, JsValue>;

    #[derive(Clone)]
    type MapHandle;

    #[wasm_bindgen(method)]
    fn on(this: &MapHandle, event: &str, handler: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = getSource)]
    fn get_source(this: &MapHandle, id: &str) -> Option<GeoJsonSource>;

    #[wasm_bindgen(method, js_name = getLayer)]
    fn get_layer(this: &MapHandle, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    fn add_source(this: &MapHandle, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeSource)]
    fn remove_source(this: &MapHandle, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    fn add_layer(this: &MapHandle, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeLayer)]
    fn remove_layer(this: &MapHandle, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = hasImage)]
    fn has_image(this: &MapHandle, id: &str) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addImage)]
    fn add_image(this: &MapHandle, id: &str, image: &HtmlImageElement) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = easeTo)]
    fn ease_to(this: &MapHandle, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn remove(this: &MapHandle);

    type GeoJsonSource;

    #[wasm_bindgen(method, catch, js_name = setData)]
    fn set_data(this: &GeoJsonSource, data: &JsValue) -> Result<(), JsValue>;
}

fn to_js(value: &Value) -> Result<JsValue, MapError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| MapError::Encode(e.to_string()))
}

fn sdk_error(e: JsValue) -> MapError {
    MapError::Sdk(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), MapError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(sdk_error)
}

fn location_data(position: &Position) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "heading": position.heading_degrees.unwrap_or(0.0) },
            "geometry": { "type": "Point", "coordinates": position.lng_lat() }
        }]
    })
}

fn accuracy_layer() -> Value {
    json!({
        "id": ACCURACY_LAYER_ID,
        "type": "circle",
        "source": SOURCE_ID,
        "paint": {
            "circle-radius": 25,
            "circle-color": "#4A90E2",
            "circle-opacity": 0.1,
            "circle-stroke-color": "#4A90E2",
            "circle-stroke-width": 1,
            "circle-stroke-opacity": 0.3
        }
    })
}

/// Icono del coche girado con `properties.heading` de cada punto
fn marker_layer() -> Value {
    json!({
        "id": MARKER_LAYER_ID,
        "type": "symbol",
        "source": SOURCE_ID,
        "layout": {
            "icon-image": CAR_ICON_ID,
            "icon-size": 1,
            "icon-rotate": ["get", "heading"],
            "icon-rotation-alignment": "map",
            "icon-allow-overlap": true,
            "icon-ignore-placement": true
        }
    })
}

fn car_icon_url() -> String {
    format!("data:image/svg+xml;charset=utf-8,{}", String::from(js_sys::encode_uri_component(CAR_ICON_SVG)))
}

pub struct OlaMapSurface {
    map: Option<MapHandle>,
    ready: Rc<Cell<bool>>,
    easing: js_sys::Function,
    _on_load: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    car_icon: HtmlImageElement,
    _on_icon: Closure<dyn FnMut(JsValue)>,
}

impl OlaMapSurface {
    /// Crea el mapa dentro de `container`. `on_ready` se ejecuta al cargar el
    /// estilo; antes no se dibuja nada.
    pub fn mount<F>(container: &HtmlElement, config: &MapConfig, on_ready: F) -> Result<Self, MapError>
    where
        F: Fn() + 'static,
    {
        let sdk_loaded = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str(SDK_GLOBAL)).unwrap_or(false);
        if !sdk_loaded {
            return Err(MapError::SdkMissing);
        }

        let sdk = OlaMaps::new(&to_js(&json!({ "apiKey": config.api_key }))?).map_err(sdk_error)?;

        let options = to_js(&json!({
            "style": config.style_url,
            "center": [config.default_center_lng, config.default_center_lat],
            "zoom": config.default_zoom,
            "pitch": 45,
            "bearing": 0,
            "antialias": true
        }))?;
        set(&options, "container", container.as_ref())?;
        let map = sdk.init(&options).map_err(sdk_error)?;

        // El icono se registra una sola vez; la capa lo toma en cuanto existe
        let car_icon = HtmlImageElement::new_with_width_and_height(32, 32).map_err(sdk_error)?;
        let on_icon = {
            let map = map.clone();
            let car_icon = car_icon.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                if map.has_image(CAR_ICON_ID).unwrap_or(true) {
                    return;
                }
                match map.add_image(CAR_ICON_ID, &car_icon) {
                    Ok(()) => log::debug!("🚗 Icono del coche registrado"),
                    Err(e) => log::error!("❌ No se pudo registrar el icono: {:?}", e),
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        car_icon.set_onload(Some(on_icon.as_ref().unchecked_ref()));

        let ready = Rc::new(Cell::new(false));
        let on_load = {
            let ready = ready.clone();
            let car_icon = car_icon.clone();
            Closure::wrap(Box::new(move |_: JsValue| {
                log::info!("🗺️ Mapa cargado");
                ready.set(true);
                car_icon.set_src(&car_icon_url());
                on_ready();
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            log::error!("❌ Error del mapa: {:?}", e);
        }) as Box<dyn FnMut(JsValue)>);
        map.on("load", &on_load);
        map.on("error", &on_error);

        log::info!("🗺️ Mapa creado en {}, {}", config.default_center_lat, config.default_center_lng);
        Ok(Self {
            map: Some(map),
            ready,
            easing: js_sys::Function::new_with_args("t", "return t * (2 - t);"),
            _on_load: on_load,
            _on_error: on_error,
            car_icon,
            _on_icon: on_icon,
        })
    }

    fn map(&self) -> Result<&MapHandle, MapError> {
        match &self.map {
            Some(map) if self.ready.get() => Ok(map),
            _ => Err(MapError::NotReady),
        }
    }

    fn clear_marker(map: &MapHandle) -> Result<(), MapError> {
        for layer in [MARKER_LAYER_ID, ACCURACY_LAYER_ID] {
            if !map.get_layer(layer).is_undefined() {
                map.remove_layer(layer).map_err(sdk_error)?;
            }
        }
        if map.get_source(SOURCE_ID).is_some() {
            map.remove_source(SOURCE_ID).map_err(sdk_error)?;
        }
        Ok(())
    }
}

impl MapSurface for OlaMapSurface {
    fn is_ready(&self) -> bool {
        self.map.is_some() && self.ready.get()
    }

    fn has_marker(&self) -> bool {
        self.map().map(|m| m.get_source(SOURCE_ID).is_some()).unwrap_or(false)
    }

    fn add_marker(&mut self, position: &Position) -> Result<(), MapError> {
        let map = self.map()?;
        Self::clear_marker(map)?;

        let source = to_js(&json!({ "type": "geojson", "data": location_data(position) }))?;
        map.add_source(SOURCE_ID, &source).map_err(sdk_error)?;

        map.add_layer(&to_js(&accuracy_layer())?).map_err(sdk_error)?;
        map.add_layer(&to_js(&marker_layer())?).map_err(sdk_error)?;

        log::debug!("🗺️ Marcador de posición añadido");
        Ok(())
    }

    fn move_marker(&mut self, position: &Position) -> Result<(), MapError> {
        let source = self
            .map()?
            .get_source(SOURCE_ID)
            .ok_or_else(|| MapError::Sdk(format!("source {} missing", SOURCE_ID)))?;
        source.set_data(&to_js(&location_data(position))?).map_err(sdk_error)
    }

    fn ease_to(&mut self, center: [f64; 2], duration_ms: u32) -> Result<(), MapError> {
        let map = self.map()?;
        let options = to_js(&json!({ "center": center, "duration": duration_ms }))?;
        set(&options, "easing", self.easing.as_ref())?;
        map.ease_to(&options).map_err(sdk_error)
    }

    fn release(&mut self) {
        self.ready.set(false);
        self.car_icon.set_onload(None);
        if let Some(map) = self.map.take() {
            map.remove();
            log::info!("🗺️ Mapa eliminado");
        }
    }
}

impl Drop for OlaMapSurface {
    fn drop(&mut self) {
        self.release();
    }
}
