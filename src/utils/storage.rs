use gloo_storage::{LocalStorage, Storage};

use crate::models::ActorKind;

// Los tokens se guardan en crudo (sin JSON), una clave por tipo de actor.

pub fn save_token(kind: ActorKind, token: &str) -> Result<(), String> {
    LocalStorage::raw()
        .set_item(kind.token_storage_key(), token)
        .map_err(|_| "Error writing token to localStorage".to_string())
}

pub fn load_token(kind: ActorKind) -> Option<String> {
    LocalStorage::raw()
        .get_item(kind.token_storage_key())
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

pub fn remove_token(kind: ActorKind) {
    if let Err(e) = LocalStorage::raw().remove_item(kind.token_storage_key()) {
        log::warn!("⚠️ No se pudo borrar el token de {}: {:?}", kind, e);
    }
}
