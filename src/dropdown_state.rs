//! Dropdown State Persistence
//!
//! Mirrors the sidebar's expanded flags into one storage key.

use log::{debug, warn};

use crate::error::{ConsoleError, Result};
use crate::platform::KeyValueStore;
use crate::sidebar::{DropdownSnapshot, Sidebar};

pub struct DropdownState<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DropdownState<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the full snapshot of `sidebar`
    pub fn save(&self, sidebar: &Sidebar) {
        let snapshot = sidebar.snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => self.store.set(&self.key, &json),
            Err(e) => warn!("[dropdown] could not serialize snapshot: {}", e),
        }
    }

    /// Read the persisted snapshot without falling back
    pub fn load(&self) -> Result<DropdownSnapshot> {
        let raw = self
            .store
            .get(&self.key)
            .ok_or_else(|| ConsoleError::Storage(format!("no value under {}", self.key)))?;
        serde_json::from_str(&raw).map_err(|e| ConsoleError::Storage(e.to_string()))
    }

    /// Apply the persisted snapshot; absent or corrupt state means "all collapsed"
    pub fn restore(&self, sidebar: &mut Sidebar) {
        let snapshot = match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) if self.store.get(&self.key).is_none() => {
                debug!("[dropdown] starting from empty state: {}", e);
                DropdownSnapshot::new()
            }
            Err(e) => {
                warn!("[dropdown] discarding unreadable state: {}", e);
                DropdownSnapshot::new()
            }
        };
        sidebar.apply_snapshot(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    const KEY: &str = "dropdownState";

    fn sidebar() -> Sidebar {
        let mut sidebar = Sidebar::new();
        let reservations = sidebar.add_section("reservations", None);
        sidebar.add_section("archive", Some(reservations));
        sidebar.add_section("users", None);
        sidebar
    }

    #[test]
    fn restore_then_save_is_idempotent() {
        let stored = r#"{"archive":true,"reservations":true,"users":false}"#;
        let state = DropdownState::new(MemoryStore::with(KEY, stored), KEY);
        let mut sidebar = sidebar();

        state.restore(&mut sidebar);
        state.save(&sidebar);

        assert_eq!(state.store().value(KEY).as_deref(), Some(stored));
        assert!(sidebar.section("archive").unwrap().expanded);
    }

    #[test]
    fn corrupt_state_leaves_everything_collapsed() {
        let state = DropdownState::new(MemoryStore::with(KEY, "{not json"), KEY);
        let mut sidebar = sidebar();

        state.restore(&mut sidebar);

        assert!(sidebar.sections().iter().all(|s| !s.expanded));
        assert!(matches!(state.load(), Err(ConsoleError::Storage(_))));
    }

    #[test]
    fn missing_state_is_not_an_error_for_restore() {
        let state = DropdownState::new(MemoryStore::default(), KEY);
        let mut sidebar = sidebar();
        state.restore(&mut sidebar);
        assert!(sidebar.sections().iter().all(|s| !s.expanded));
    }

    #[test]
    fn save_writes_every_section() {
        let state = DropdownState::new(MemoryStore::default(), KEY);
        let mut sidebar = sidebar();
        sidebar.expand("users");

        state.save(&sidebar);

        let written: serde_json::Value = serde_json::from_str(&state.store().value(KEY).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"reservations": false, "archive": false, "users": true}));
    }
}
