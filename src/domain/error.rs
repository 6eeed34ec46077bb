//! Domain error types

use thiserror::Error;

/// Win32 `ERROR_ACCESS_DENIED`, reported by `OpenClipboard` while another
/// process owns the clipboard.
pub const ERROR_ACCESS_DENIED: u32 = 5;

/// Win32 `ERROR_NOT_ENOUGH_MEMORY`
pub const ERROR_NOT_ENOUGH_MEMORY: u32 = 8;

/// Win32 `ERROR_INVALID_HANDLE`
pub const ERROR_INVALID_HANDLE: u32 = 6;

/// Win32 `ERROR_NO_UNICODE_TRANSLATION`, text the ANSI code page cannot hold
pub const ERROR_NO_UNICODE_TRANSLATION: u32 = 1113;

/// Win32 `ERROR_CLIPBOARD_NOT_OPEN`
pub const ERROR_CLIPBOARD_NOT_OPEN: u32 = 1418;

/// A failed native call: the platform error code plus its system message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (0x{code:X})")]
pub struct OsError {
    pub code: u32,
    pub message: String,
}

impl OsError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build an error from a raw Win32 code.
    ///
    /// Codes the clipboard layer raises itself carry their Win32 text on
    /// every platform; anything else falls back to the system table.
    pub fn from_code(code: u32) -> Self {
        let message = match win32_message(code) {
            Some(message) => message.to_string(),
            None => system_message(code),
        };
        Self { code, message }
    }

    /// True when the clipboard is held by another process.
    pub fn is_clipboard_busy(&self) -> bool {
        self.code == ERROR_ACCESS_DENIED
    }
}

/// Win32 message text for the codes the clipboard layer produces
fn win32_message(code: u32) -> Option<&'static str> {
    match code {
        ERROR_ACCESS_DENIED => Some("Access is denied."),
        ERROR_INVALID_HANDLE => Some("The handle is invalid."),
        ERROR_NOT_ENOUGH_MEMORY => {
            Some("Not enough memory resources are available to process this command.")
        }
        ERROR_NO_UNICODE_TRANSLATION => Some(
            "No mapping for the Unicode character exists in the target multi-byte code page.",
        ),
        ERROR_CLIPBOARD_NOT_OPEN => Some("Thread does not have a clipboard open."),
        _ => None,
    }
}

#[cfg(windows)]
fn system_message(code: u32) -> String {
    std::io::Error::from_raw_os_error(code as i32).to_string()
}

// Win32 codes are not errno values; don't look them up in the libc table.
#[cfg(not(windows))]
fn system_message(code: u32) -> String {
    format!("Unknown Win32 error {}", code)
}

/// Errors surfaced by the clipboard access layer
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Failed to {operation} the clipboard: {message} (0x{code:X})")]
    OsOperationFailed {
        operation: &'static str,
        code: u32,
        message: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    InternalConsistency(String),

    #[error("Failed to register clipboard format \"{0}\"")]
    FormatRegistration(String),

    #[error("Clipboard access is not supported: {0}")]
    Unsupported(String),
}

impl ClipboardError {
    /// Wrap a native failure with the operation that produced it.
    pub fn os(operation: &'static str, error: OsError) -> Self {
        Self::OsOperationFailed {
            operation,
            code: error.code,
            message: error.message,
        }
    }

    /// Platform error code, when the failure came from the OS.
    pub fn os_code(&self) -> Option<u32> {
        match self {
            Self::OsOperationFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Error when an unknown text format name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid text format: \"{input}\". Valid formats are: text, unicode, html, rtf, csv, csv-unicode, xml-spreadsheet, file-list")]
pub struct InvalidTextFormatError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
