//! Clipboard infrastructure module
//!
//! The Win32 adapter on Windows, plus an in-process simulation usable
//! everywhere.

mod memory;
#[cfg(windows)]
mod win32;

pub use memory::MemoryClipboard;
#[cfg(windows)]
pub use win32::Win32Clipboard;

use crate::application::ports::ClipboardBackend;
use crate::application::{ClipboardAccess, FormatRegistry, TextFormatCatalog};
use crate::domain::error::ClipboardError;
use crate::domain::retry::RetryPolicy;

/// Clipboard access bound to the platform clipboard
pub type SystemClipboard = ClipboardAccess<Box<dyn ClipboardBackend>>;

/// Create clipboard access for the current platform.
///
/// Uses the process-wide format registry and text catalog.
pub fn system_clipboard(policy: RetryPolicy) -> Result<SystemClipboard, ClipboardError> {
    let backend = platform_backend()?;
    ClipboardAccess::with_state(
        backend,
        FormatRegistry::shared(),
        &TextFormatCatalog::shared(),
        policy,
    )
}

#[cfg(windows)]
fn platform_backend() -> Result<Box<dyn ClipboardBackend>, ClipboardError> {
    Ok(Box::new(Win32Clipboard::new()))
}

#[cfg(not(windows))]
fn platform_backend() -> Result<Box<dyn ClipboardBackend>, ClipboardError> {
    Err(ClipboardError::Unsupported(format!(
        "no native clipboard on {}",
        std::env::consts::OS
    )))
}
