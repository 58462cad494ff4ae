//! Key-value storage contract and adapters.
//!
//! Values are JSON text stored per key, matching what browser `localStorage` can hold.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors raised by [`KeyValueStore`] implementations and the typed helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store is not reachable on this target.
    #[error("storage unavailable")]
    Unavailable,
    /// The backing store rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// A value could not be encoded as JSON.
    #[error("serialize failed: {0}")]
    Serialize(String),
    /// A stored value could not be decoded.
    #[error("deserialize failed for `{key}`: {message}")]
    Deserialize {
        /// Key whose value failed to decode.
        key: String,
        /// Decoder message.
        message: String,
    },
}

/// Host service for small JSON values keyed by string.
pub trait KeyValueStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores raw JSON text under `key`, replacing any previous value.
    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), StorageError>;

    /// Removes `key`.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// No-op store for targets without persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn load_raw(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _raw_json: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, raw_json: &str) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and decodes a typed value.
///
/// # Errors
///
/// Returns an error when the store fails or the stored JSON does not decode as `T`.
pub fn load_typed<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.load_raw(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Deserialize {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Loads a typed value, returning `default` when it is missing or unreadable.
pub fn get_or<S, T>(store: &S, key: &str, default: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    load_typed(store, key).ok().flatten().unwrap_or(default)
}

/// Encodes and stores a typed value.
///
/// # Errors
///
/// Returns an error when encoding or the store write fails.
pub fn save_typed<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.save_raw(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Geometry {
        left: i32,
        top: i32,
    }

    #[test]
    fn memory_store_shares_state_between_clones() {
        let store = MemoryKeyValueStore::default();
        let other = store.clone();

        store.save_raw("k", "1").expect("save");
        assert_eq!(other.load_raw("k").expect("load"), Some("1".to_string()));

        other.delete("k").expect("delete");
        assert!(store.is_empty());
    }

    #[test]
    fn typed_helpers_round_trip_through_dyn_store() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        save_typed(store_obj, "geometry", &Geometry { left: 4, top: 9 }).expect("save");
        let loaded: Option<Geometry> = load_typed(store_obj, "geometry").expect("load");

        assert_eq!(loaded, Some(Geometry { left: 4, top: 9 }));
    }

    #[test]
    fn corrupt_values_report_the_key_and_fall_back_in_get_or() {
        let store = MemoryKeyValueStore::default();
        store.save_raw("geometry", "{not json").expect("save");

        let err = load_typed::<_, Geometry>(&store, "geometry").unwrap_err();
        assert!(matches!(err, StorageError::Deserialize { ref key, .. } if key == "geometry"));

        let fallback = get_or(&store, "geometry", Geometry { left: 1, top: 2 });
        assert_eq!(fallback, Geometry { left: 1, top: 2 });
        assert_eq!(get_or(&store, "missing", 7_u32), 7);
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.save_raw("k", "{}").expect("save");
        store.delete("k").expect("delete");
    }
}
