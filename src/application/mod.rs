//! Application layer - Use cases and port interfaces
//!
//! Contains the clipboard operations, the format registry and text catalog
//! they consult, and the trait definitions for the native clipboard and
//! configuration storage.

pub mod access;
pub mod ports;
pub mod registry;
pub mod text_formats;

// Re-export use cases
pub use access::{ClipboardAccess, FILE_PATH_CAPACITY};
pub use registry::FormatRegistry;
pub use text_formats::{TextFormatCatalog, TextFormats};
