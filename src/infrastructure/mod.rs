//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the Win32
//! clipboard, its in-process simulation, and the TOML config store.

pub mod clipboard;
pub mod config;

// Re-export adapters
pub use clipboard::{system_clipboard, MemoryClipboard, SystemClipboard};
#[cfg(windows)]
pub use clipboard::Win32Clipboard;
pub use config::XdgConfigStore;
