//! localStorage adapter

use log::warn;

use crate::platform::KeyValueStore;

pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("[storage] localStorage unavailable, sidebar state will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = &self.storage else { return };
        if let Err(e) = storage.set_item(key, value) {
            warn!("[storage] could not write {}: {:?}", key, e);
        }
    }
}
