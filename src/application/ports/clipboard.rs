//! Native clipboard port interface
//!
//! A thin, fallible mirror of the OS clipboard and global-memory API. The
//! facade in [`crate::application::access`] is the only caller; it owns
//! the session and lock discipline, so implementations stay pass-throughs.

use std::ptr::NonNull;

use crate::domain::error::OsError;
use crate::domain::retry::RetryPolicy;

/// Index passed to [`ClipboardBackend::query_file`] to ask for the file count
pub const FILE_COUNT_QUERY: u32 = u32::MAX;

/// Opaque handle to a movable native memory block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> usize {
        self.0
    }
}

/// Port for the OS clipboard subsystem
pub trait ClipboardBackend: Send + Sync {
    /// Try once to open the clipboard for this process.
    fn open(&self) -> Result<(), OsError>;

    /// Close the clipboard opened by [`open`](Self::open).
    fn close(&self);

    /// Whether data in `format` is on the clipboard. Needs no open session.
    fn is_format_available(&self, format: u32) -> bool;

    /// Handle to the data stored under `format`, if any.
    fn get_data(&self, format: u32) -> Option<NativeHandle>;

    /// Place `handle` on the clipboard under `format`.
    ///
    /// The clipboard takes ownership of `handle` only when this returns `Ok`;
    /// on error the caller still owns it and must free it.
    fn set_data(&self, format: u32, handle: NativeHandle) -> Result<(), OsError>;

    /// Empty the clipboard and take ownership of it.
    fn empty(&self) -> Result<(), OsError>;

    /// Next format after `previous` (start with 0); 0 marks the end.
    fn enumerate_formats(&self, previous: u32) -> u32;

    /// Register (or look up) a named format. Returns 0 on failure.
    fn register_format(&self, name: &str) -> u32;

    /// Name of a registered format; `None` for predefined or unknown ids.
    fn format_name(&self, format: u32) -> Option<String>;

    /// Allocate a zero-initialized movable block of `len` bytes.
    fn allocate(&self, len: usize) -> Result<NativeHandle, OsError>;

    /// Pin a block and return its address. Pair every success with `unlock`.
    fn lock(&self, handle: NativeHandle) -> Result<NonNull<u8>, OsError>;

    /// Release a pin taken by [`lock`](Self::lock).
    fn unlock(&self, handle: NativeHandle) -> bool;

    /// Free a block this process still owns.
    fn free(&self, handle: NativeHandle);

    /// Size of a block in bytes.
    fn size(&self, handle: NativeHandle) -> usize;

    /// Copy the path at `index` of a file-list block into `buffer`,
    /// NUL-terminated and truncated to fit. Returns the characters copied,
    /// or the file count when `index` is [`FILE_COUNT_QUERY`].
    fn query_file(&self, drop: NativeHandle, index: u32, buffer: Option<&mut [u16]>) -> u32;

    /// Encode text in the system ANSI code page (no terminator).
    fn ansi_encode(&self, text: &str) -> Result<Vec<u8>, OsError>;

    /// Decode bytes from the system ANSI code page.
    fn ansi_decode(&self, bytes: &[u8]) -> String;

    /// Open the clipboard, waiting out another owner.
    ///
    /// Only "access denied" (another process holds the clipboard) is
    /// retried; any other failure is returned at once.
    fn open_with_retry(&self, policy: &RetryPolicy) -> Result<(), OsError> {
        let mut attempt = 1;
        loop {
            match self.open() {
                Ok(()) => return Ok(()),
                Err(e) if e.is_clipboard_busy() && attempt < policy.attempts() => {
                    tracing::debug!(
                        attempt,
                        delay_ms = policy.delay().as_millis() as u64,
                        "clipboard busy, retrying"
                    );
                    std::thread::sleep(policy.delay());
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Blanket implementation for boxed backend types
impl ClipboardBackend for Box<dyn ClipboardBackend> {
    fn open(&self) -> Result<(), OsError> {
        self.as_ref().open()
    }

    fn close(&self) {
        self.as_ref().close()
    }

    fn is_format_available(&self, format: u32) -> bool {
        self.as_ref().is_format_available(format)
    }

    fn get_data(&self, format: u32) -> Option<NativeHandle> {
        self.as_ref().get_data(format)
    }

    fn set_data(&self, format: u32, handle: NativeHandle) -> Result<(), OsError> {
        self.as_ref().set_data(format, handle)
    }

    fn empty(&self) -> Result<(), OsError> {
        self.as_ref().empty()
    }

    fn enumerate_formats(&self, previous: u32) -> u32 {
        self.as_ref().enumerate_formats(previous)
    }

    fn register_format(&self, name: &str) -> u32 {
        self.as_ref().register_format(name)
    }

    fn format_name(&self, format: u32) -> Option<String> {
        self.as_ref().format_name(format)
    }

    fn allocate(&self, len: usize) -> Result<NativeHandle, OsError> {
        self.as_ref().allocate(len)
    }

    fn lock(&self, handle: NativeHandle) -> Result<NonNull<u8>, OsError> {
        self.as_ref().lock(handle)
    }

    fn unlock(&self, handle: NativeHandle) -> bool {
        self.as_ref().unlock(handle)
    }

    fn free(&self, handle: NativeHandle) {
        self.as_ref().free(handle)
    }

    fn size(&self, handle: NativeHandle) -> usize {
        self.as_ref().size(handle)
    }

    fn query_file(&self, drop: NativeHandle, index: u32, buffer: Option<&mut [u16]>) -> u32 {
        self.as_ref().query_file(drop, index, buffer)
    }

    fn ansi_encode(&self, text: &str) -> Result<Vec<u8>, OsError> {
        self.as_ref().ansi_encode(text)
    }

    fn ansi_decode(&self, bytes: &[u8]) -> String {
        self.as_ref().ansi_decode(bytes)
    }

    fn open_with_retry(&self, policy: &RetryPolicy) -> Result<(), OsError> {
        self.as_ref().open_with_retry(policy)
    }
}
