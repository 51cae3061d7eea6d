// ============================================================================
// USE LIVE POSITION - Posición del dispositivo dibujada en un mapa Ola
// ============================================================================
// Al montar: crea el mapa en `container`, pide una posición y arranca el
// watch y el intervalo. Al desmontar: para los tres y libera el mapa.
// ============================================================================

use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::maps::OlaMapSurface;
use crate::models::Position;
use crate::services::{current_position, GeoError, GeoOptions, WatchSubscription};
use crate::state::{FeedConfig, FeedUpdate, PositionFeed, ReadingSource};

type ReadingSink = Rc<dyn Fn(ReadingSource, Result<Position, GeoError>)>;

#[derive(Clone, PartialEq)]
pub struct UseLivePositionHandle {
    pub position: Option<Position>,
    pub map_error: Option<String>,
}

#[hook]
pub fn use_live_position(container: NodeRef) -> UseLivePositionHandle {
    let position = use_state(|| None::<Position>);
    let map_error = use_state(|| None::<String>);

    {
        let position = position.clone();
        let map_error = map_error.clone();

        use_effect_with((), move |_| {
            let tracking = &CONFIG.tracking_config;
            let feed = Rc::new(RefCell::new(PositionFeed::<OlaMapSurface>::new(FeedConfig::from(tracking))));

            // Las lecturas solo tienen una referencia débil; tras el cleanup no llegan a nada
            let sink: ReadingSink = {
                let feed = Rc::downgrade(&feed);
                Rc::new(move |source, reading| {
                    let Some(feed) = feed.upgrade() else {
                        log::debug!("📍 Lectura {:?} tras el desmontaje descartada", source);
                        return;
                    };
                    let update = feed.borrow_mut().apply(source, reading);
                    if update == FeedUpdate::Applied {
                        position.set(feed.borrow().current());
                    }
                })
            };

            match container.cast::<HtmlElement>() {
                Some(element) => {
                    let weak = Rc::downgrade(&feed);
                    let mounted = OlaMapSurface::mount(&element, &CONFIG.map_config, move || {
                        if let Some(feed) = weak.upgrade() {
                            feed.borrow_mut().surface_ready();
                        }
                    });
                    match mounted {
                        Ok(surface) => feed.borrow_mut().attach_surface(surface),
                        Err(e) => {
                            log::error!("❌ Mapa no creado: {}", e);
                            map_error.set(Some(e.to_string()));
                        }
                    }
                }
                None => log::warn!("⚠️ Contenedor del mapa no renderizado, seguimiento sin mapa"),
            }

            let one_shot = GeoOptions::one_shot(tracking);
            {
                let sink = sink.clone();
                spawn_local(async move {
                    sink(ReadingSource::OneShot, current_position(one_shot).await);
                });
            }

            let watch = {
                let sink = sink.clone();
                match WatchSubscription::start(GeoOptions::watch(tracking), move |reading| {
                    sink(ReadingSource::Watch, reading)
                }) {
                    Ok(watch) => Some(watch),
                    Err(e) => {
                        log::error!("❌ Watch de posición no iniciado: {}", e);
                        None
                    }
                }
            };

            let interval = Interval::new(tracking.poll_interval_ms, move || {
                let sink = sink.clone();
                spawn_local(async move {
                    sink(ReadingSource::Poll, current_position(one_shot).await);
                });
            });

            move || {
                drop(interval);
                drop(watch);
                feed.borrow_mut().unmount();
                log::info!("📍 Posición en vivo detenida");
            }
        });
    }

    UseLivePositionHandle {
        position: *position,
        map_error: (*map_error).clone(),
    }
}
