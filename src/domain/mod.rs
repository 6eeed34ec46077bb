//! Domain layer - Core value objects
//!
//! Contains clipboard format descriptors, the file-list block layout,
//! retry policy, configuration and domain errors.
//! This layer has no dependencies on the operating system.

pub mod config;
pub mod error;
pub mod format;
pub mod retry;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use format::{
    CharacterSize, FileListBlock, FormatDescriptor, StandardFormat, TextFormatDescriptor,
    TextKind,
};
pub use retry::RetryPolicy;
