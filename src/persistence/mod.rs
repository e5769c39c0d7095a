//! Best-time persistence
//!
//! The simulation only ever sees a `u64` best time. Stores read it once at
//! startup and write it back when a round sets a new record; a store that
//! fails is logged and otherwise ignored.

pub mod envelope;

use std::fmt;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing storage (private browsing, native build, ...)
    Unavailable,
    Encode(String),
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Encode(msg) => write!(f, "failed to encode best time: {msg}"),
            Self::Write(msg) => write!(f, "failed to write best time: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Where the best time lives between sessions
pub trait BestTimeStore {
    /// Stored best time in whole seconds, 0 if none
    fn get_best_time(&self) -> u64;
    fn set_best_time(&mut self, seconds: u64) -> Result<(), StorageError>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value, as if read from disk
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl BestTimeStore for MemoryStore {
    fn get_best_time(&self) -> u64 {
        self.raw.as_deref().map(envelope::decode).unwrap_or(0)
    }

    fn set_best_time(&mut self, seconds: u64) -> Result<(), StorageError> {
        let json = envelope::encode(seconds).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.raw = Some(json);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{BestTimeStore, StorageError, envelope};

    /// Best time kept in the browser's LocalStorage
    #[derive(Debug, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "bounce_dodge_best_time";

        pub fn new() -> Self {
            Self
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl BestTimeStore for LocalStorageStore {
        fn get_best_time(&self) -> u64 {
            let Some(storage) = Self::storage() else {
                log::warn!("LocalStorage unavailable - best time starts at 0");
                return 0;
            };
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(raw)) => {
                    let best = envelope::decode(&raw);
                    log::info!("Loaded best time {}s", best);
                    best
                }
                _ => 0,
            }
        }

        fn set_best_time(&mut self, seconds: u64) -> Result<(), StorageError> {
            let storage = Self::storage().ok_or(StorageError::Unavailable)?;
            let json =
                envelope::encode(seconds).map_err(|e| StorageError::Encode(e.to_string()))?;
            storage
                .set_item(Self::STORAGE_KEY, &json)
                .map_err(|e| StorageError::Write(format!("{e:?}")))?;
            log::info!("Best time saved: {}s", seconds);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_best_time(), 0);
        store.set_best_time(31).expect("memory writes never fail");
        assert_eq!(store.get_best_time(), 31);
        assert_eq!(store.raw(), Some(r#"{"version":1,"best_time_secs":31}"#));
    }

    #[test]
    fn test_memory_store_reads_legacy_and_garbage() {
        assert_eq!(MemoryStore::with_raw("12").get_best_time(), 12);
        assert_eq!(MemoryStore::with_raw("nope").get_best_time(), 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        assert!(
            StorageError::Write("quota".into())
                .to_string()
                .contains("quota")
        );
    }
}
