//! Clipboard access use case
//!
//! Every public operation opens the clipboard, performs one read or write,
//! and closes it again before returning, whether it succeeded or not.
//! Native memory is only touched through the guards below, so a pinned
//! block is always unlocked before the session that produced it closes.

use std::iter;
use std::ptr::NonNull;
use std::sync::Arc;

use crate::domain::error::{ClipboardError, OsError};
use crate::domain::format::{
    CharacterSize, FileListBlock, FormatDescriptor, TextFormatDescriptor,
};
use crate::domain::retry::RetryPolicy;

use super::ports::{ClipboardBackend, NativeHandle, FILE_COUNT_QUERY};
use super::registry::FormatRegistry;
use super::text_formats::{TextFormatCatalog, TextFormats};

/// Characters reserved per path when reading a file list; longer paths are truncated
pub const FILE_PATH_CAPACITY: usize = 1000;

/// An open clipboard. Closing happens on drop.
struct Session<'a, B: ClipboardBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ClipboardBackend + ?Sized> Session<'a, B> {
    fn open(backend: &'a B, policy: &RetryPolicy) -> Result<Self, ClipboardError> {
        backend
            .open_with_retry(policy)
            .map_err(|e| ClipboardError::os("open", e))?;
        Ok(Self { backend })
    }
}

impl<B: ClipboardBackend + ?Sized> Drop for Session<'_, B> {
    fn drop(&mut self) {
        self.backend.close();
    }
}

/// A pinned native block. Unlocked on drop.
struct LockedBlock<'a, B: ClipboardBackend + ?Sized> {
    backend: &'a B,
    handle: NativeHandle,
    ptr: NonNull<u8>,
    len: usize,
}

impl<'a, B: ClipboardBackend + ?Sized> LockedBlock<'a, B> {
    /// Pin `handle`, exposing its first `len` bytes.
    fn lock(backend: &'a B, handle: NativeHandle, len: usize) -> Result<Self, OsError> {
        let ptr = backend.lock(handle)?;
        Ok(Self {
            backend,
            handle,
            ptr,
            len,
        })
    }

    fn bytes(&self) -> &[u8] {
        // SAFETY: the backend keeps `len` bytes at `ptr` valid while the block is locked
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as in `bytes`; `&mut self` rules out a second view of the block
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<B: ClipboardBackend + ?Sized> Drop for LockedBlock<'_, B> {
    fn drop(&mut self) {
        self.backend.unlock(self.handle);
    }
}

/// A native block this process still owns. Freed on drop unless handed
/// to the clipboard.
struct OwnedBlock<'a, B: ClipboardBackend + ?Sized> {
    backend: &'a B,
    handle: NativeHandle,
    owned: bool,
}

impl<'a, B: ClipboardBackend + ?Sized> OwnedBlock<'a, B> {
    /// Allocate a block and copy `bytes` into it.
    fn copy_from(backend: &'a B, bytes: &[u8]) -> Result<Self, ClipboardError> {
        let handle = backend
            .allocate(bytes.len())
            .map_err(|e| ClipboardError::os("allocate memory for", e))?;
        let block = Self {
            backend,
            handle,
            owned: true,
        };

        let mut locked = LockedBlock::lock(backend, handle, bytes.len())
            .map_err(|e| ClipboardError::os("lock memory for", e))?;
        locked.bytes_mut().copy_from_slice(bytes);
        drop(locked);

        Ok(block)
    }

    /// Hand the block to the clipboard under `format`.
    fn transfer(mut self, format: u32) -> Result<(), ClipboardError> {
        self.backend
            .set_data(format, self.handle)
            .map_err(|e| ClipboardError::os("set", e))?;
        self.owned = false;
        Ok(())
    }
}

impl<B: ClipboardBackend + ?Sized> Drop for OwnedBlock<'_, B> {
    fn drop(&mut self) {
        if self.owned {
            self.backend.free(self.handle);
        }
    }
}

/// Typed access to the system clipboard over a [`ClipboardBackend`]
pub struct ClipboardAccess<B: ClipboardBackend> {
    backend: B,
    registry: Arc<FormatRegistry>,
    formats: TextFormats,
    policy: RetryPolicy,
}

impl<B: ClipboardBackend> ClipboardAccess<B> {
    /// Create an accessor with its own registry and catalog and the default
    /// retry policy.
    pub fn new(backend: B) -> Result<Self, ClipboardError> {
        Self::with_state(
            backend,
            Arc::new(FormatRegistry::new()),
            &TextFormatCatalog::new(),
            RetryPolicy::default(),
        )
    }

    /// Create an accessor over existing registry and catalog state,
    /// initializing the catalog if this is its first use.
    pub fn with_state(
        backend: B,
        registry: Arc<FormatRegistry>,
        catalog: &TextFormatCatalog,
        policy: RetryPolicy,
    ) -> Result<Self, ClipboardError> {
        let formats = catalog.initialize(&registry, &backend)?.clone();
        Ok(Self {
            backend,
            registry,
            formats,
            policy,
        })
    }

    /// Replace the open retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// The text formats this accessor reads and writes
    pub fn formats(&self) -> &TextFormats {
        &self.formats
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    fn open(&self) -> Result<Session<'_, B>, ClipboardError> {
        Session::open(&self.backend, &self.policy)
    }

    /// Whether the clipboard holds data in `format`. Does not open the clipboard.
    pub fn contains<F: AsRef<FormatDescriptor> + ?Sized>(&self, format: &F) -> bool {
        self.backend.is_format_available(format.as_ref().id())
    }

    /// Formats currently on the clipboard, in the order the OS reports them
    pub fn list_formats(&self) -> Result<Vec<FormatDescriptor>, ClipboardError> {
        let _session = self.open()?;

        let mut formats = Vec::new();
        let mut id = 0;
        loop {
            id = self.backend.enumerate_formats(id);
            if id == 0 {
                break;
            }
            formats.push(self.registry.resolve(&self.backend, id));
        }
        Ok(formats)
    }

    /// Read the clipboard as text in `format`.
    ///
    /// Returns `Ok(None)` when the clipboard has no data in that format or
    /// the data cannot be pinned.
    pub fn get_text(&self, format: &TextFormatDescriptor) -> Result<Option<String>, ClipboardError> {
        let _session = self.open()?;

        if !self.backend.is_format_available(format.id()) {
            return Ok(None);
        }
        let Some(handle) = self.backend.get_data(format.id()) else {
            return Ok(None);
        };
        let block = match LockedBlock::lock(&self.backend, handle, self.backend.size(handle)) {
            Ok(block) => block,
            Err(e) => {
                tracing::debug!(format = format.name(), error = %e, "clipboard data could not be locked");
                return Ok(None);
            }
        };

        Ok(Some(decode_text(
            &self.backend,
            block.bytes(),
            format.character_size(),
        )))
    }

    /// Put `value` on the clipboard as `format`.
    ///
    /// Existing data in other formats is left in place.
    pub fn set_text(&self, value: &str, format: &TextFormatDescriptor) -> Result<(), ClipboardError> {
        if value.is_empty() {
            return Err(ClipboardError::InvalidArgument(
                "text value must not be empty".to_string(),
            ));
        }

        let _session = self.open()?;
        let encoded = encode_text(&self.backend, value, format.character_size())
            .map_err(|e| ClipboardError::os("encode text for", e))?;
        let block = OwnedBlock::copy_from(&self.backend, &encoded)?;
        block.transfer(format.id())?;

        tracing::debug!(format = format.name(), bytes = encoded.len(), "clipboard text set");
        Ok(())
    }

    /// Paths in the clipboard's file list; empty when there is none.
    pub fn get_file_list(&self) -> Result<Vec<String>, ClipboardError> {
        let format = self.formats.file_list().id();
        let _session = self.open()?;

        if !self.backend.is_format_available(format) {
            return Ok(Vec::new());
        }
        let Some(hdrop) = self.backend.get_data(format) else {
            return Ok(Vec::new());
        };
        let count = self.backend.query_file(hdrop, FILE_COUNT_QUERY, None);
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0u16; FILE_PATH_CAPACITY];
        let mut files = Vec::with_capacity(count as usize);
        for index in 0..count {
            let chars = self.backend.query_file(hdrop, index, Some(&mut buffer)) as usize;
            if chars == 0 {
                tracing::warn!(index, count, "file list entry could not be read, stopping");
                break;
            }
            files.push(String::from_utf16_lossy(&buffer[..chars.min(buffer.len())]));
        }
        Ok(files)
    }

    /// Put `files` on the clipboard as a file list.
    pub fn set_file_list<S: AsRef<str>>(&self, files: &[S]) -> Result<(), ClipboardError> {
        let layout = FileListBlock::build(files);
        let block = OwnedBlock::copy_from(&self.backend, layout.as_bytes())?;

        let _session = self.open()?;
        block.transfer(FileListBlock::format_id())?;

        tracing::debug!(files = files.len(), bytes = layout.len(), "clipboard file list set");
        Ok(())
    }

    /// Empty the clipboard and take ownership of it.
    pub fn clear(&self) -> Result<(), ClipboardError> {
        let _session = self.open()?;
        self.backend
            .empty()
            .map_err(|e| ClipboardError::os("empty", e))
    }
}

/// Decode a pinned text buffer, stopping at the first terminator.
///
/// Narrow text goes through the code page twice: the raw bytes are decoded,
/// and the UTF-8 form of that result is decoded again.
fn decode_text<B: ClipboardBackend + ?Sized>(backend: &B, bytes: &[u8], size: CharacterSize) -> String {
    match size {
        CharacterSize::Narrow => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            let unencoded = backend.ansi_decode(&bytes[..end]);
            backend.ansi_decode(unencoded.as_bytes())
        }
        CharacterSize::Wide => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .take_while(|&u| u != 0)
                .collect();
            String::from_utf16_lossy(&units)
        }
    }
}

/// Encode `value` with a trailing terminator of the format's width.
fn encode_text<B: ClipboardBackend + ?Sized>(
    backend: &B,
    value: &str,
    size: CharacterSize,
) -> Result<Vec<u8>, OsError> {
    let mut bytes = match size {
        CharacterSize::Narrow => backend.ansi_encode(value)?,
        CharacterSize::Wide => value.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    };
    bytes.extend(iter::repeat(0).take(size.bytes()));
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{ERROR_ACCESS_DENIED, ERROR_NO_UNICODE_TRANSLATION};
    use crate::infrastructure::clipboard::MemoryClipboard;

    fn access() -> ClipboardAccess<MemoryClipboard> {
        ClipboardAccess::new(MemoryClipboard::new()).unwrap()
    }

    #[test]
    fn wide_encoding_appends_wide_terminator() {
        let backend = MemoryClipboard::new();
        assert_eq!(
            encode_text(&backend, "hi", CharacterSize::Wide).unwrap(),
            vec![b'h', 0, b'i', 0, 0, 0]
        );
    }

    #[test]
    fn narrow_encoding_appends_single_terminator() {
        let backend = MemoryClipboard::new();
        assert_eq!(
            encode_text(&backend, "hi", CharacterSize::Narrow).unwrap(),
            b"hi\0".to_vec()
        );
    }

    #[test]
    fn decoding_stops_at_terminator() {
        let backend = MemoryClipboard::new();
        assert_eq!(decode_text(&backend, b"abc\0junk", CharacterSize::Narrow), "abc");
        assert_eq!(
            decode_text(&backend, &[b'o', 0, b'k', 0, 0, 0, b'x', 0], CharacterSize::Wide),
            "ok"
        );
    }

    #[test]
    fn narrow_decoding_applies_code_page_twice() {
        let backend = MemoryClipboard::new();
        // 0xE9 is "é" in the simulated code page; its UTF-8 form decodes to two characters
        assert_eq!(decode_text(&backend, &[0xE9, 0], CharacterSize::Narrow), "\u{C3}\u{A9}");
    }

    #[test]
    fn get_text_missing_format_is_none() {
        let clipboard = access();
        let html = clipboard.formats().html().clone();
        assert_eq!(clipboard.get_text(&html).unwrap(), None);
        assert_eq!(clipboard.backend().opens(), clipboard.backend().closes());
    }

    #[test]
    fn set_text_rejects_empty_value() {
        let clipboard = access();
        let unicode = clipboard.formats().unicode().clone();
        let err = clipboard.set_text("", &unicode).unwrap_err();
        assert!(matches!(err, ClipboardError::InvalidArgument(_)));
        assert_eq!(clipboard.backend().opens(), 0);
    }

    #[test]
    fn lock_failure_reads_as_absent() {
        let clipboard = access();
        let unicode = clipboard.formats().unicode().clone();
        clipboard.set_text("pinned", &unicode).unwrap();

        clipboard.backend().fail_next_lock();
        assert_eq!(clipboard.get_text(&unicode).unwrap(), None);
        assert_eq!(clipboard.backend().outstanding_locks(), 0);
    }

    #[test]
    fn busy_clipboard_surfaces_access_denied() {
        let clipboard = access().with_policy(RetryPolicy::no_retry());
        clipboard.backend().hold_for_attempts(1);

        let err = clipboard.clear().unwrap_err();
        assert_eq!(err.os_code(), Some(ERROR_ACCESS_DENIED));
        assert_eq!(
            err.to_string(),
            "Failed to open the clipboard: Access is denied. (0x5)"
        );
        assert_eq!(clipboard.backend().closes(), 0);
    }

    #[test]
    fn code_page_failure_writes_nothing() {
        let clipboard = access();
        let text = clipboard.formats().text().clone();
        clipboard.backend().fail_next_encode();

        let err = clipboard.set_text("lost", &text).unwrap_err();
        assert_eq!(err.os_code(), Some(ERROR_NO_UNICODE_TRANSLATION));
        assert!(!clipboard.contains(&text));
        assert_eq!(clipboard.backend().live_allocations(), 0);
        assert_eq!(clipboard.backend().opens(), clipboard.backend().closes());
    }

    #[test]
    fn contains_does_not_open_clipboard() {
        let clipboard = access();
        assert!(!clipboard.contains(clipboard.formats().unicode()));
        assert_eq!(clipboard.backend().opens(), 0);
    }
}
