use std::cell::RefCell;
use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use gloo_storage::Storage as _;
use serde::{de::DeserializeOwned, Serialize};

/// Superficie clave-valor síncrona (localStorage o memoria)
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
    fn clear(&self) -> Result<(), String>;
}

/// localStorage del navegador
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw().get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| "Error guardando en localStorage".to_string())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|_| "Error eliminando de localStorage".to_string())
    }

    fn clear(&self) -> Result<(), String> {
        gloo_storage::LocalStorage::raw()
            .clear()
            .map_err(|_| "Error limpiando localStorage".to_string())
    }
}

/// Almacenamiento en memoria (tests y entornos sin localStorage)
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

pub fn save_to_storage<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    storage.set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<T>, String> {
    match storage.get_item(key) {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| format!("Error deserializando '{}': {}", key, e)),
        None => Ok(None),
    }
}
