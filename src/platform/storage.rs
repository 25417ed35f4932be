//! Key/value persistence for small JSON documents
//!
//! The browser build reads and writes LocalStorage. Native builds keep values
//! in a per-thread map so the same load/save paths run in tests and on the CLI.
//! Every failure is logged and reported as "nothing stored".

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and parse a JSON value. Missing or corrupt entries yield `None`.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt '{}' entry: {}", key, e);
            None
        }
    }
}

/// Serialize and store a value. Returns false if it could not be written.
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => set_item(key, &json),
        Err(e) => {
            log::warn!("Failed to serialize '{}': {}", key, e);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> bool {
    let Some(storage) = local_storage() else {
        log::warn!("LocalStorage unavailable, '{}' not saved", key);
        return false;
    };
    if storage.set_item(key, value).is_err() {
        log::warn!("LocalStorage rejected '{}'", key);
        return false;
    }
    true
}

#[cfg(target_arch = "wasm32")]
pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local!(
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new())
);

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    MEMORY.with(|m| m.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) -> bool {
    MEMORY.with(|m| m.borrow_mut().insert(key.to_string(), value.to_string()));
    true
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_item(key: &str) {
    MEMORY.with(|m| m.borrow_mut().remove(key));
}
