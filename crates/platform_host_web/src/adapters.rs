use platform_host::{KeyValueStore, MemoryKeyValueStore};

use crate::WebKeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters from `platform_host_web`.
    Browser,
    /// In-process placeholder used by desktop builds without a durable transport.
    DesktopStub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::DesktopStub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

impl HostStrategy {
    /// Returns the strategy as a stable string token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopStub => "desktop-stub",
        }
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().name()
}

/// Adapter enum that erases the concrete storage backend behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser-backed `localStorage` persistence.
    Browser(WebKeyValueStore),
    /// Process-local fallback used when desktop transport is intentionally stubbed.
    DesktopStub(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn load_raw(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.load_raw(key),
            Self::DesktopStub(store) => store.load_raw(key),
        }
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.save_raw(key, raw_json),
            Self::DesktopStub(store) => store.save_raw(key, raw_json),
        }
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.delete(key),
            Self::DesktopStub(store) => store.delete(key),
        }
    }
}

/// Builds the key/value store for the selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    key_value_store_for(selected_host_strategy())
}

/// Builds the key/value store backing `strategy`.
pub fn key_value_store_for(strategy: HostStrategy) -> KeyValueStoreAdapter {
    match strategy {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(WebKeyValueStore),
        HostStrategy::DesktopStub => {
            KeyValueStoreAdapter::DesktopStub(MemoryKeyValueStore::default())
        }
    }
}
