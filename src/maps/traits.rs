use crate::models::Position;

/// Lo que el feed de posición necesita de un SDK de mapas: un marcador y una
/// cámara.
pub trait MapSurface {
    /// Estilo y tiles cargados; dibujar antes falla en casi todos los SDK
    fn is_ready(&self) -> bool;

    /// Si ya existe la fuente del marcador
    fn has_marker(&self) -> bool;

    /// Crea la fuente del marcador y sus capas en `position`
    fn add_marker(&mut self, position: &Position) -> Result<(), MapError>;

    /// Mueve el marcador existente
    fn move_marker(&mut self, position: &Position) -> Result<(), MapError>;

    /// Anima la cámara hasta `center` (`[lng, lat]`)
    fn ease_to(&mut self, center: [f64; 2], duration_ms: u32) -> Result<(), MapError>;

    /// Destruye el mapa. Después no se puede dibujar nada.
    fn release(&mut self);
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("map is not ready")]
    NotReady,
    #[error("map SDK is not loaded")]
    SdkMissing,
    #[error("map SDK call failed: {0}")]
    Sdk(String),
    #[error("could not encode map options: {0}")]
    Encode(String),
}
