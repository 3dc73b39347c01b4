//! Preference store: small named string settings over a key-value backend.

use crate::storage::{KeyValueStore, MemoryStorage};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Persisted preference keys. The stored key is the literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// `"light"` or `"dark"`
    Theme,
    /// Site dictionary language, e.g. `"en"`
    Lang,
    /// Translation widget language; empty means auto-detect
    PreferredLanguage,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Theme => "theme",
            PreferenceKey::Lang => "lang",
            PreferenceKey::PreferredLanguage => "preferredLanguage",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store shared between the site controller and tasks that read a
/// preference later, such as the widget language poll.
pub type SharedPreferences = Rc<RefCell<PreferenceStore>>;

/// Typed access to the visitor's saved settings.
pub struct PreferenceStore {
    storage: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Wrap the store so later readers see writes made after they were created.
    pub fn into_shared(self) -> SharedPreferences {
        Rc::new(RefCell::new(self))
    }

    /// The stored value, or `default` when nothing has been stored.
    pub fn get(&self, key: PreferenceKey, default: &str) -> String {
        self.storage
            .get_item(key.as_str())
            .unwrap_or_else(|| default.to_string())
    }

    /// Persist `value` under `key`.
    ///
    /// Write failures are logged and otherwise ignored; callers never depend
    /// on persistence succeeding.
    pub fn set(&mut self, key: PreferenceKey, value: &str) {
        match self.storage.set_item(key.as_str(), value) {
            Ok(()) => debug!("Stored preference {}={:?}", key, value),
            Err(e) => warn!("Could not persist preference {}: {}", key, e),
        }
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
