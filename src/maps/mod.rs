// Superficies de mapa. El feed solo habla con `MapSurface`; `ola` es la
// implementación del navegador sobre el SDK GL de Ola Maps.

pub mod ola;
pub mod traits;

pub use ola::OlaMapSurface;
pub use traits::{MapError, MapSurface};
