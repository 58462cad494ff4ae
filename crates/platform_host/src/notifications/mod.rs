//! Notification contracts.

pub mod service;
