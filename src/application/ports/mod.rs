//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;

// Re-export common types
pub use clipboard::{ClipboardBackend, NativeHandle, FILE_COUNT_QUERY};
pub use config::ConfigStore;
