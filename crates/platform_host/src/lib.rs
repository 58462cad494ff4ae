//! Host-service contracts used by the desktop runtime.
//!
//! Nothing here touches the DOM. Browser-backed adapters live next to the runtime that owns the
//! browser handles, while this crate carries the contracts plus in-memory and no-op adapters used
//! by native targets and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod notifications;
pub mod storage;

pub use notifications::service::{
    Notification, NotificationLevel, NotificationService, NoopNotificationService,
    RecordingNotificationService, DEFAULT_NOTIFICATION_DURATION_MS,
};
pub use storage::kv::{
    get_or, load_typed, save_typed, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
    StorageError,
};
