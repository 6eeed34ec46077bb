//! In-process clipboard simulation
//!
//! Behaves like the Win32 clipboard closely enough to drive
//! [`ClipboardAccess`](crate::application::ClipboardAccess) on any platform:
//! the open/close discipline is enforced, blocks move into clipboard
//! ownership on a successful `set_data`, and file lists are served through
//! the same block layout the OS uses. Counters and failure switches make
//! resource handling observable from tests.

use std::collections::HashMap;
use std::ptr::NonNull;

use parking_lot::Mutex;

use crate::application::ports::{ClipboardBackend, NativeHandle, FILE_COUNT_QUERY};
use crate::domain::error::{
    OsError, ERROR_ACCESS_DENIED, ERROR_CLIPBOARD_NOT_OPEN, ERROR_INVALID_HANDLE,
    ERROR_NOT_ENOUGH_MEMORY, ERROR_NO_UNICODE_TRANSLATION,
};
use crate::domain::format::FileListBlock;

/// First identifier handed out for registered format names
const FIRST_REGISTERED_FORMAT: u32 = 0xC000;

struct Block {
    bytes: Vec<u8>,
    locks: u32,
    /// Owned by the clipboard rather than the process
    on_clipboard: bool,
}

#[derive(Default)]
struct Failures {
    set_data: Option<u32>,
    empty: Option<u32>,
    allocate: Option<u32>,
    lock: bool,
    encode: bool,
    registrations: bool,
}

struct State {
    open: bool,
    busy_attempts: u32,
    blocks: HashMap<usize, Block>,
    next_handle: usize,
    /// Format data in the order it was set
    data: Vec<(u32, NativeHandle)>,
    names: Vec<String>,
    failures: Failures,
    opens: usize,
    closes: usize,
    name_queries: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            open: false,
            busy_attempts: 0,
            blocks: HashMap::new(),
            next_handle: 1,
            data: Vec::new(),
            names: Vec::new(),
            failures: Failures::default(),
            opens: 0,
            closes: 0,
            name_queries: 0,
        }
    }
}

impl State {
    fn require_open(&self) -> Result<(), OsError> {
        if self.open {
            Ok(())
        } else {
            Err(OsError::from_code(ERROR_CLIPBOARD_NOT_OPEN))
        }
    }

    fn insert_block(&mut self, bytes: Vec<u8>, on_clipboard: bool) -> NativeHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.blocks.insert(
            handle,
            Block {
                bytes,
                locks: 0,
                on_clipboard,
            },
        );
        NativeHandle::from_raw(handle)
    }

    fn store(&mut self, format: u32, handle: NativeHandle) {
        if let Some(slot) = self.data.iter_mut().find(|(f, _)| *f == format) {
            let previous = std::mem::replace(&mut slot.1, handle);
            self.blocks.remove(&previous.as_raw());
        } else {
            self.data.push((format, handle));
        }
    }

    fn handle_for(&self, format: u32) -> Option<NativeHandle> {
        self.data
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, handle)| *handle)
    }
}

/// Simulated clipboard backed by process memory.
///
/// The ANSI code page is Latin-1: characters above U+00FF encode as `?`.
#[derive(Default)]
pub struct MemoryClipboard {
    state: Mutex<State>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `attempts` opens fail as if another process held the clipboard.
    pub fn hold_for_attempts(&self, attempts: u32) {
        self.state.lock().busy_attempts = attempts;
    }

    /// Place `bytes` under `format` directly, as another application would.
    pub fn seed(&self, format: u32, bytes: &[u8]) {
        let mut state = self.state.lock();
        let handle = state.insert_block(bytes.to_vec(), true);
        state.store(format, handle);
    }

    pub fn fail_next_set_data(&self, code: u32) {
        self.state.lock().failures.set_data = Some(code);
    }

    pub fn fail_next_empty(&self, code: u32) {
        self.state.lock().failures.empty = Some(code);
    }

    pub fn fail_next_allocate(&self) {
        self.state.lock().failures.allocate = Some(ERROR_NOT_ENOUGH_MEMORY);
    }

    pub fn fail_next_lock(&self) {
        self.state.lock().failures.lock = true;
    }

    /// Make the next code-page conversion fail.
    pub fn fail_next_encode(&self) {
        self.state.lock().failures.encode = true;
    }

    /// Refuse every format registration from now on.
    pub fn fail_registrations(&self) {
        self.state.lock().failures.registrations = true;
    }

    /// Successful opens so far
    pub fn opens(&self) -> usize {
        self.state.lock().opens
    }

    pub fn closes(&self) -> usize {
        self.state.lock().closes
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Locks taken and not yet released, across all blocks
    pub fn outstanding_locks(&self) -> u32 {
        self.state.lock().blocks.values().map(|b| b.locks).sum()
    }

    /// Blocks allocated by the process and neither freed nor handed over
    pub fn live_allocations(&self) -> usize {
        self.state
            .lock()
            .blocks
            .values()
            .filter(|b| !b.on_clipboard)
            .count()
    }

    /// Calls to [`ClipboardBackend::format_name`]
    pub fn name_queries(&self) -> usize {
        self.state.lock().name_queries
    }

    /// Distinct format names registered
    pub fn registrations(&self) -> usize {
        self.state.lock().names.len()
    }

    /// Raw bytes stored under `format`
    pub fn raw_data(&self, format: u32) -> Option<Vec<u8>> {
        let state = self.state.lock();
        let handle = state.handle_for(format)?;
        state.blocks.get(&handle.as_raw()).map(|b| b.bytes.clone())
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn open(&self) -> Result<(), OsError> {
        let mut state = self.state.lock();
        if state.busy_attempts > 0 {
            state.busy_attempts -= 1;
            return Err(OsError::from_code(ERROR_ACCESS_DENIED));
        }
        if state.open {
            return Err(OsError::from_code(ERROR_ACCESS_DENIED));
        }
        state.open = true;
        state.opens += 1;
        Ok(())
    }

    fn close(&self) {
        let mut state = self.state.lock();
        if state.open {
            state.open = false;
            state.closes += 1;
        }
    }

    fn is_format_available(&self, format: u32) -> bool {
        self.state.lock().handle_for(format).is_some()
    }

    fn get_data(&self, format: u32) -> Option<NativeHandle> {
        let state = self.state.lock();
        state.require_open().ok()?;
        state.handle_for(format)
    }

    fn set_data(&self, format: u32, handle: NativeHandle) -> Result<(), OsError> {
        let mut state = self.state.lock();
        state.require_open()?;
        if let Some(code) = state.failures.set_data.take() {
            return Err(OsError::from_code(code));
        }
        match state.blocks.get_mut(&handle.as_raw()) {
            Some(block) if !block.on_clipboard => block.on_clipboard = true,
            _ => return Err(OsError::from_code(ERROR_INVALID_HANDLE)),
        }
        state.store(format, handle);
        Ok(())
    }

    fn empty(&self) -> Result<(), OsError> {
        let mut state = self.state.lock();
        state.require_open()?;
        if let Some(code) = state.failures.empty.take() {
            return Err(OsError::from_code(code));
        }
        let handles: Vec<NativeHandle> = state.data.drain(..).map(|(_, h)| h).collect();
        for handle in handles {
            state.blocks.remove(&handle.as_raw());
        }
        Ok(())
    }

    fn enumerate_formats(&self, previous: u32) -> u32 {
        let state = self.state.lock();
        if state.require_open().is_err() {
            return 0;
        }
        let next = if previous == 0 {
            Some(0)
        } else {
            state
                .data
                .iter()
                .position(|(f, _)| *f == previous)
                .map(|i| i + 1)
        };
        next.and_then(|i| state.data.get(i))
            .map_or(0, |(format, _)| *format)
    }

    fn register_format(&self, name: &str) -> u32 {
        let mut state = self.state.lock();
        if name.is_empty() || state.failures.registrations {
            return 0;
        }
        let index = match state
            .names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                state.names.push(name.to_string());
                state.names.len() - 1
            }
        };
        FIRST_REGISTERED_FORMAT + index as u32
    }

    fn format_name(&self, format: u32) -> Option<String> {
        let mut state = self.state.lock();
        state.name_queries += 1;
        let index = format.checked_sub(FIRST_REGISTERED_FORMAT)? as usize;
        state.names.get(index).cloned()
    }

    fn allocate(&self, len: usize) -> Result<NativeHandle, OsError> {
        let mut state = self.state.lock();
        if let Some(code) = state.failures.allocate.take() {
            return Err(OsError::from_code(code));
        }
        Ok(state.insert_block(vec![0; len], false))
    }

    fn lock(&self, handle: NativeHandle) -> Result<NonNull<u8>, OsError> {
        let mut state = self.state.lock();
        if std::mem::take(&mut state.failures.lock) {
            return Err(OsError::from_code(ERROR_INVALID_HANDLE));
        }
        let block = state
            .blocks
            .get_mut(&handle.as_raw())
            .ok_or_else(|| OsError::from_code(ERROR_INVALID_HANDLE))?;
        block.locks += 1;
        NonNull::new(block.bytes.as_mut_ptr()).ok_or_else(|| OsError::from_code(ERROR_INVALID_HANDLE))
    }

    fn unlock(&self, handle: NativeHandle) -> bool {
        let mut state = self.state.lock();
        match state.blocks.get_mut(&handle.as_raw()) {
            Some(block) if block.locks > 0 => {
                block.locks -= 1;
                true
            }
            _ => false,
        }
    }

    fn free(&self, handle: NativeHandle) {
        let mut state = self.state.lock();
        if state
            .blocks
            .get(&handle.as_raw())
            .is_some_and(|b| !b.on_clipboard)
        {
            state.blocks.remove(&handle.as_raw());
        }
    }

    fn size(&self, handle: NativeHandle) -> usize {
        self.state
            .lock()
            .blocks
            .get(&handle.as_raw())
            .map_or(0, |b| b.bytes.len())
    }

    fn query_file(&self, drop: NativeHandle, index: u32, buffer: Option<&mut [u16]>) -> u32 {
        let files = {
            let state = self.state.lock();
            match state
                .blocks
                .get(&drop.as_raw())
                .and_then(|b| FileListBlock::parse(&b.bytes))
            {
                Some(files) => files,
                None => return 0,
            }
        };

        if index == FILE_COUNT_QUERY {
            return files.len() as u32;
        }
        let Some(path) = files.get(index as usize) else {
            return 0;
        };
        let units: Vec<u16> = path.encode_utf16().collect();
        let Some(buffer) = buffer else {
            return units.len() as u32;
        };
        if buffer.is_empty() {
            return 0;
        }

        let copied = units.len().min(buffer.len() - 1);
        buffer[..copied].copy_from_slice(&units[..copied]);
        buffer[copied] = 0;
        copied as u32
    }

    fn ansi_encode(&self, text: &str) -> Result<Vec<u8>, OsError> {
        if std::mem::take(&mut self.state.lock().failures.encode) {
            return Err(OsError::from_code(ERROR_NO_UNICODE_TRANSLATION));
        }
        Ok(text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect())
    }

    fn ansi_decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| char::from(b)).collect()
    }
}
