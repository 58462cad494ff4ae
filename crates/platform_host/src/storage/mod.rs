//! Persistence contracts.

pub mod kv;
