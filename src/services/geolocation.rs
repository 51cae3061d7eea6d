// ============================================================================
// GEOLOCATION - Wrappers de navigator.geolocation
// ============================================================================
// Las lecturas puntuales son futures (Promise + JsFuture, sin closures
// filtradas); el watch continuo es una suscripción RAII.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::TrackingConfig;
use crate::models::Position;

/// `GeolocationPositionError.TIMEOUT`
const TIMEOUT_CODE: u16 = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("location permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("timed out waiting for a position")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("geolocation error: {0}")]
    Other(String),
}

impl GeoError {
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            1 => GeoError::PermissionDenied(message),
            2 => GeoError::Unavailable(message),
            TIMEOUT_CODE => GeoError::Timeout,
            _ => GeoError::Other(message),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GeoError::Timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl GeoOptions {
    pub fn one_shot(cfg: &TrackingConfig) -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: cfg.one_shot_timeout_ms,
            maximum_age_ms: cfg.one_shot_maximum_age_ms,
        }
    }

    pub fn watch(cfg: &TrackingConfig) -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: cfg.watch_timeout_ms,
            maximum_age_ms: cfg.watch_maximum_age_ms,
        }
    }

    fn to_js(self) -> web_sys::PositionOptions {
        let options = web_sys::PositionOptions::new();
        options.set_enable_high_accuracy(self.high_accuracy);
        options.set_timeout(self.timeout_ms);
        options.set_maximum_age(self.maximum_age_ms);
        options
    }
}

fn geolocation() -> Result<web_sys::Geolocation, GeoError> {
    web_sys::window()
        .ok_or(GeoError::Unsupported)?
        .navigator()
        .geolocation()
        .map_err(|_| GeoError::Unsupported)
}

fn number(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// `GeolocationPosition` -> `Position` (leído con Reflect: importa la forma,
/// no el nombre del tipo de web-sys)
fn position_from_js(value: &JsValue) -> Result<Position, GeoError> {
    let coords = js_sys::Reflect::get(value, &JsValue::from_str("coords"))
        .map_err(|_| GeoError::Other("position without coords".into()))?;
    let latitude = number(&coords, "latitude").ok_or_else(|| GeoError::Other("missing latitude".into()))?;
    let longitude = number(&coords, "longitude").ok_or_else(|| GeoError::Other("missing longitude".into()))?;
    Ok(Position::new(latitude, longitude).with_heading(number(&coords, "heading")))
}

fn error_from_js(value: &JsValue) -> GeoError {
    let code = number(value, "code").unwrap_or(0.0) as u16;
    let message = js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_default();
    GeoError::from_code(code, message)
}

/// `getCurrentPosition` como future
pub async fn current_position(options: GeoOptions) -> Result<Position, GeoError> {
    let geo = geolocation()?;
    let js_options = options.to_js();
    let mut started = Ok(());
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        started = geo.get_current_position_with_error_callback_and_options(&resolve, Some(&reject), &js_options);
    });
    started.map_err(|e| error_from_js(&e))?;

    match JsFuture::from(promise).await {
        Ok(value) => position_from_js(&value),
        Err(e) => Err(error_from_js(&e)),
    }
}

/// `watchPosition` activo; se limpia en el drop
pub struct WatchSubscription {
    watch_id: i32,
    geo: web_sys::Geolocation,
    _on_success: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl WatchSubscription {
    pub fn start<F>(options: GeoOptions, callback: F) -> Result<Self, GeoError>
    where
        F: FnMut(Result<Position, GeoError>) + 'static,
    {
        let geo = geolocation()?;
        let callback = Rc::new(RefCell::new(callback));

        let on_success = {
            let callback = callback.clone();
            Closure::wrap(Box::new(move |value: JsValue| {
                (callback.borrow_mut())(position_from_js(&value));
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = Closure::wrap(Box::new(move |value: JsValue| {
            (callback.borrow_mut())(Err(error_from_js(&value)));
        }) as Box<dyn FnMut(JsValue)>);

        let watch_id = geo
            .watch_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &options.to_js(),
            )
            .map_err(|e| error_from_js(&e))?;

        log::info!("📍 Watch de posición iniciado (id {})", watch_id);
        Ok(Self {
            watch_id,
            geo,
            _on_success: on_success,
            _on_error: on_error,
        })
    }
}

impl Drop for WatchSubscription {
    fn drop(&mut self) {
        self.geo.clear_watch(self.watch_id);
        log::info!("📍 Watch de posición {} limpiado", self.watch_id);
    }
}
