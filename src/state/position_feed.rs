// ============================================================================
// POSITION FEED - Posición actual del dispositivo reflejada en un mapa
// ============================================================================
// Tres fuentes (puntual, watch, intervalo) escriben en un solo valor; gana la
// última lectura correcta. Los errores del sensor nunca borran la posición.
// ============================================================================

use crate::config::TrackingConfig;
use crate::maps::MapSurface;
use crate::models::Position;
use crate::services::geolocation::GeoError;

/// Origen de una lectura (solo para logs; no hay prioridad entre fuentes)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadingSource {
    OneShot,
    Watch,
    Poll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedUpdate {
    /// La posición cambió y el mapa se sincronizó
    Applied,
    /// Lectura igual a la actual, o error del sensor
    Kept,
    /// Feed desmontado, o lectura más antigua que la actual
    Discarded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub ease_duration_ms: u32,
    /// Descarta lecturas con `recorded_at` anterior a la posición actual
    pub reject_out_of_order: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ease_duration_ms: 1000,
            reject_out_of_order: false,
        }
    }
}

impl From<&TrackingConfig> for FeedConfig {
    fn from(cfg: &TrackingConfig) -> Self {
        Self {
            ease_duration_ms: cfg.ease_duration_ms,
            ..Self::default()
        }
    }
}

pub struct PositionFeed<S: MapSurface> {
    config: FeedConfig,
    surface: Option<S>,
    current: Option<Position>,
    mounted: bool,
}

impl<S: MapSurface> PositionFeed<S> {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            surface: None,
            current: None,
            mounted: true,
        }
    }

    pub fn current(&self) -> Option<Position> {
        self.current
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn attach_surface(&mut self, mut surface: S) {
        if !self.mounted {
            surface.release();
            return;
        }
        self.surface = Some(surface);
        self.sync_surface();
    }

    /// El mapa terminó de cargar; dibuja lo que ya sabemos
    pub fn surface_ready(&mut self) {
        if self.mounted {
            self.sync_surface();
        }
    }

    pub fn apply(&mut self, source: ReadingSource, reading: Result<Position, GeoError>) -> FeedUpdate {
        if !self.mounted {
            log::debug!("📍 Lectura {:?} tras desmontar descartada", source);
            return FeedUpdate::Discarded;
        }

        let reading = match reading {
            Ok(reading) => reading,
            Err(GeoError::Timeout) => {
                log::warn!("⚠️ Actualización de posición omitida ({:?}) - timeout del GPS", source);
                return FeedUpdate::Kept;
            }
            Err(e) => {
                log::error!("❌ Error leyendo posición ({:?}): {}", source, e);
                return FeedUpdate::Kept;
            }
        };

        let next = match self.current {
            Some(current) => {
                if self.config.reject_out_of_order && reading.recorded_at < current.recorded_at {
                    log::debug!("📍 Lectura {:?} fuera de orden descartada", source);
                    return FeedUpdate::Discarded;
                }
                // Sin heading del sensor se mantiene el último
                let heading = reading.heading_degrees.or(current.heading_degrees);
                let next = reading.with_heading(heading);
                if next.same_place(&current) && next.heading_degrees == current.heading_degrees {
                    self.current = Some(next);
                    return FeedUpdate::Kept;
                }
                next
            }
            None => reading,
        };

        log::debug!("📍 {:?}: {}, {}", source, next.latitude, next.longitude);
        self.current = Some(next);
        self.sync_surface();
        FeedUpdate::Applied
    }

    /// Deja de dibujar y libera el mapa. Las lecturas posteriores se descartan.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
    }

    fn sync_surface(&mut self) {
        let (Some(surface), Some(position)) = (self.surface.as_mut(), self.current) else {
            return;
        };
        if !surface.is_ready() {
            return;
        }

        let drawn = if surface.has_marker() {
            surface.move_marker(&position).or_else(|e| {
                log::error!("❌ Error actualizando el marcador: {}", e);
                surface.add_marker(&position)
            })
        } else {
            surface.add_marker(&position)
        };

        let result = drawn.and_then(|_| surface.ease_to(position.lng_lat(), self.config.ease_duration_ms));
        if let Err(e) = result {
            log::error!("❌ Marcador no mostrado: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MapError;
    use chrono::{Duration, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Debug)]
    struct Recorded {
        marker: Option<Position>,
        adds: usize,
        moves: usize,
        eases: Vec<[f64; 2]>,
        released: bool,
    }

    struct RecordingSurface {
        ready: bool,
        fail_adds: bool,
        log: Rc<RefCell<Recorded>>,
    }

    impl RecordingSurface {
        fn ready() -> (Self, Rc<RefCell<Recorded>>) {
            let log = Rc::new(RefCell::new(Recorded::default()));
            (Self { ready: true, fail_adds: false, log: log.clone() }, log)
        }
    }

    impl MapSurface for RecordingSurface {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn has_marker(&self) -> bool {
            self.log.borrow().marker.is_some()
        }

        fn add_marker(&mut self, position: &Position) -> Result<(), MapError> {
            if self.fail_adds {
                return Err(MapError::Sdk("addSource failed".into()));
            }
            let mut log = self.log.borrow_mut();
            log.adds += 1;
            log.marker = Some(*position);
            Ok(())
        }

        fn move_marker(&mut self, position: &Position) -> Result<(), MapError> {
            let mut log = self.log.borrow_mut();
            log.moves += 1;
            log.marker = Some(*position);
            Ok(())
        }

        fn ease_to(&mut self, center: [f64; 2], _duration_ms: u32) -> Result<(), MapError> {
            self.log.borrow_mut().eases.push(center);
            Ok(())
        }

        fn release(&mut self) {
            self.log.borrow_mut().released = true;
        }
    }

    fn at(lat: f64, lng: f64) -> Result<Position, GeoError> {
        Ok(Position::new(lat, lng))
    }

    fn marker(log: &Rc<RefCell<Recorded>>) -> Option<(f64, f64)> {
        log.borrow().marker.map(|p| (p.latitude, p.longitude))
    }

    #[test]
    fn last_reading_wins_and_timeout_keeps_marker() {
        let (surface, log) = RecordingSurface::ready();
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);

        assert_eq!(feed.apply(ReadingSource::Watch, at(17.40, 78.45)), FeedUpdate::Applied);
        assert_eq!(feed.apply(ReadingSource::Poll, at(17.41, 78.46)), FeedUpdate::Applied);
        assert_eq!(marker(&log), Some((17.41, 78.46)));

        assert_eq!(feed.apply(ReadingSource::Poll, Err(GeoError::Timeout)), FeedUpdate::Kept);
        assert_eq!(marker(&log), Some((17.41, 78.46)));
        assert_eq!(feed.current().map(|p| p.latitude), Some(17.41));
    }

    #[test]
    fn marker_is_created_once_then_moved() {
        let (surface, log) = RecordingSurface::ready();
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);

        feed.apply(ReadingSource::OneShot, at(17.40, 78.45));
        feed.apply(ReadingSource::Watch, at(17.42, 78.47));
        feed.apply(ReadingSource::Poll, at(17.43, 78.48));

        let log = log.borrow();
        assert_eq!(log.adds, 1);
        assert_eq!(log.moves, 2);
        assert_eq!(log.eases.last(), Some(&[78.48, 17.43]));
    }

    #[test]
    fn other_sensor_errors_also_keep_position() {
        let mut feed: PositionFeed<RecordingSurface> = PositionFeed::new(FeedConfig::default());
        feed.apply(ReadingSource::Watch, at(17.40, 78.45));
        let update = feed.apply(ReadingSource::Watch, Err(GeoError::Unavailable("no fix".into())));
        assert_eq!(update, FeedUpdate::Kept);
        assert!(feed.current().is_some());
    }

    #[test]
    fn heading_survives_readings_without_one() {
        let mut feed: PositionFeed<RecordingSurface> = PositionFeed::new(FeedConfig::default());
        feed.apply(ReadingSource::Watch, Ok(Position::new(17.40, 78.45).with_heading(Some(45.0))));
        feed.apply(ReadingSource::Poll, at(17.41, 78.46));
        assert_eq!(feed.current().and_then(|p| p.heading_degrees), Some(45.0));
    }

    #[test]
    fn heading_change_alone_redraws() {
        let (surface, log) = RecordingSurface::ready();
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);

        feed.apply(ReadingSource::Watch, at(17.40, 78.45));
        let update = feed.apply(ReadingSource::Watch, Ok(Position::new(17.40, 78.45).with_heading(Some(90.0))));
        assert_eq!(update, FeedUpdate::Applied);
        assert_eq!(log.borrow().eases.len(), 2);

        // Lectura idéntica: nada que redibujar
        let update = feed.apply(ReadingSource::Poll, Ok(Position::new(17.40, 78.45).with_heading(Some(90.0))));
        assert_eq!(update, FeedUpdate::Kept);
        assert_eq!(log.borrow().eases.len(), 2);
    }

    #[test]
    fn nothing_drawn_until_surface_ready() {
        let (mut surface, log) = RecordingSurface::ready();
        surface.ready = false;
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);

        feed.apply(ReadingSource::OneShot, at(17.40, 78.45));
        assert_eq!(marker(&log), None);

        if let Some(surface) = feed.surface.as_mut() {
            surface.ready = true;
        }
        feed.surface_ready();
        assert_eq!(marker(&log), Some((17.40, 78.45)));
    }

    #[test]
    fn map_errors_degrade_to_no_marker() {
        let (mut surface, log) = RecordingSurface::ready();
        surface.fail_adds = true;
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);

        assert_eq!(feed.apply(ReadingSource::Watch, at(17.40, 78.45)), FeedUpdate::Applied);
        assert_eq!(marker(&log), None);
        assert!(log.borrow().eases.is_empty());
        assert!(feed.current().is_some());
    }

    #[test]
    fn unmount_releases_surface_and_drops_late_readings() {
        let (surface, log) = RecordingSurface::ready();
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.attach_surface(surface);
        feed.apply(ReadingSource::Watch, at(17.40, 78.45));

        feed.unmount();
        assert!(log.borrow().released);

        // Una lectura pedida antes de desmontar llega después
        assert_eq!(feed.apply(ReadingSource::Poll, at(17.50, 78.50)), FeedUpdate::Discarded);
        assert_eq!(marker(&log), Some((17.40, 78.45)));
        assert_eq!(log.borrow().eases.len(), 1);
    }

    #[test]
    fn surface_attached_after_unmount_is_released_immediately() {
        let (surface, log) = RecordingSurface::ready();
        let mut feed = PositionFeed::new(FeedConfig::default());
        feed.unmount();
        feed.attach_surface(surface);
        assert!(log.borrow().released);
        assert!(feed.surface().is_none());
    }

    #[test]
    fn optional_ordering_guard_drops_older_readings() {
        let mut feed: PositionFeed<RecordingSurface> = PositionFeed::new(FeedConfig {
            reject_out_of_order: true,
            ..FeedConfig::default()
        });
        let now = Utc::now();
        feed.apply(ReadingSource::Watch, Ok(Position::new(17.41, 78.46).recorded_at(now)));
        let stale = Position::new(17.40, 78.45).recorded_at(now - Duration::seconds(5));
        assert_eq!(feed.apply(ReadingSource::Poll, Ok(stale)), FeedUpdate::Discarded);
        assert_eq!(feed.current().map(|p| p.latitude), Some(17.41));
    }
}
