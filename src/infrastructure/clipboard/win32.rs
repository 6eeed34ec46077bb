//! Win32 clipboard adapter
//!
//! Direct pass-throughs to `user32`, `kernel32` and `shell32`. Failures are
//! reported with the thread's last-error code.

use std::ffi::c_void;
use std::ptr::{self, NonNull};

use windows_sys::Win32::Foundation::{GetLastError, GlobalFree, HGLOBAL};
use windows_sys::Win32::Globalization::{MultiByteToWideChar, WideCharToMultiByte, CP_ACP};
use windows_sys::Win32::System::DataExchange::{
    CloseClipboard, EmptyClipboard, EnumClipboardFormats, GetClipboardData,
    GetClipboardFormatNameW, IsClipboardFormatAvailable, OpenClipboard,
    RegisterClipboardFormatW, SetClipboardData,
};
use windows_sys::Win32::System::Memory::{GlobalAlloc, GlobalLock, GlobalSize, GlobalUnlock, GHND};
use windows_sys::Win32::UI::Shell::DragQueryFileW;

use crate::application::ports::{ClipboardBackend, NativeHandle};
use crate::domain::error::OsError;

/// Longest format name `GetClipboardFormatNameW` is asked for
const FORMAT_NAME_CAPACITY: usize = 256;

fn last_error() -> OsError {
    // SAFETY: reads thread-local state only
    OsError::from_code(unsafe { GetLastError() })
}

fn as_global(handle: NativeHandle) -> HGLOBAL {
    handle.as_raw() as HGLOBAL
}

/// Clipboard adapter for the Windows desktop
pub struct Win32Clipboard;

impl Win32Clipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardBackend for Win32Clipboard {
    fn open(&self) -> Result<(), OsError> {
        // SAFETY: a null owner window associates the clipboard with this task
        if unsafe { OpenClipboard(ptr::null_mut()) } == 0 {
            return Err(last_error());
        }
        Ok(())
    }

    fn close(&self) {
        // SAFETY: no arguments; fails harmlessly if the clipboard is not open
        unsafe { CloseClipboard() };
    }

    fn is_format_available(&self, format: u32) -> bool {
        // SAFETY: plain value argument
        unsafe { IsClipboardFormatAvailable(format) != 0 }
    }

    fn get_data(&self, format: u32) -> Option<NativeHandle> {
        // SAFETY: plain value argument; the clipboard owns the returned handle
        let handle = unsafe { GetClipboardData(format) };
        (!handle.is_null()).then(|| NativeHandle::from_raw(handle as usize))
    }

    fn set_data(&self, format: u32, handle: NativeHandle) -> Result<(), OsError> {
        // SAFETY: `handle` is a GMEM_MOVEABLE block owned by this process
        let result = unsafe { SetClipboardData(format, as_global(handle)) };
        if result.is_null() {
            return Err(last_error());
        }
        Ok(())
    }

    fn empty(&self) -> Result<(), OsError> {
        // SAFETY: no arguments
        if unsafe { EmptyClipboard() } == 0 {
            return Err(last_error());
        }
        Ok(())
    }

    fn enumerate_formats(&self, previous: u32) -> u32 {
        // SAFETY: plain value argument
        unsafe { EnumClipboardFormats(previous) }
    }

    fn register_format(&self, name: &str) -> u32 {
        let wide: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: `wide` is NUL-terminated and outlives the call
        unsafe { RegisterClipboardFormatW(wide.as_ptr()) }
    }

    fn format_name(&self, format: u32) -> Option<String> {
        let mut buffer = [0u16; FORMAT_NAME_CAPACITY];
        // SAFETY: the capacity passed matches the buffer length
        let len = unsafe {
            GetClipboardFormatNameW(format, buffer.as_mut_ptr(), FORMAT_NAME_CAPACITY as i32)
        };
        (len > 0).then(|| String::from_utf16_lossy(&buffer[..len as usize]))
    }

    fn allocate(&self, len: usize) -> Result<NativeHandle, OsError> {
        // SAFETY: plain value arguments; GHND yields a zeroed movable block
        let handle = unsafe { GlobalAlloc(GHND, len) };
        if handle.is_null() {
            return Err(last_error());
        }
        Ok(NativeHandle::from_raw(handle as usize))
    }

    fn lock(&self, handle: NativeHandle) -> Result<NonNull<u8>, OsError> {
        // SAFETY: `handle` came from GlobalAlloc or GetClipboardData
        let ptr = unsafe { GlobalLock(as_global(handle)) };
        NonNull::new(ptr.cast::<u8>()).ok_or_else(last_error)
    }

    fn unlock(&self, handle: NativeHandle) -> bool {
        // SAFETY: paired with a successful GlobalLock on the same handle
        unsafe { GlobalUnlock(as_global(handle)) != 0 }
    }

    fn free(&self, handle: NativeHandle) {
        // SAFETY: the block is still owned by this process
        unsafe { GlobalFree(as_global(handle)) };
    }

    fn size(&self, handle: NativeHandle) -> usize {
        // SAFETY: `handle` is a valid global memory handle
        unsafe { GlobalSize(as_global(handle)) }
    }

    fn query_file(&self, drop: NativeHandle, index: u32, buffer: Option<&mut [u16]>) -> u32 {
        let (ptr, capacity) = match buffer {
            Some(buffer) => (buffer.as_mut_ptr(), buffer.len() as u32),
            None => (ptr::null_mut(), 0),
        };
        // SAFETY: `ptr` is null or points at `capacity` writable units
        unsafe { DragQueryFileW(drop.as_raw() as *mut c_void, index, ptr, capacity) }
    }

    fn ansi_encode(&self, text: &str) -> Result<Vec<u8>, OsError> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        if wide.is_empty() {
            return Ok(Vec::new());
        }
        // SAFETY: the first call only measures; the second writes at most `len` bytes
        unsafe {
            let len = WideCharToMultiByte(
                CP_ACP,
                0,
                wide.as_ptr(),
                wide.len() as i32,
                ptr::null_mut(),
                0,
                ptr::null(),
                ptr::null_mut(),
            );
            if len <= 0 {
                return Err(last_error());
            }
            let mut bytes = vec![0u8; len as usize];
            let written = WideCharToMultiByte(
                CP_ACP,
                0,
                wide.as_ptr(),
                wide.len() as i32,
                bytes.as_mut_ptr(),
                len,
                ptr::null(),
                ptr::null_mut(),
            );
            if written <= 0 {
                return Err(last_error());
            }
            bytes.truncate(written as usize);
            Ok(bytes)
        }
    }

    fn ansi_decode(&self, bytes: &[u8]) -> String {
        if bytes.is_empty() {
            return String::new();
        }
        // SAFETY: the first call only measures; the second writes at most `len` units
        unsafe {
            let len = MultiByteToWideChar(
                CP_ACP,
                0,
                bytes.as_ptr(),
                bytes.len() as i32,
                ptr::null_mut(),
                0,
            );
            if len <= 0 {
                return String::new();
            }
            let mut wide = vec![0u16; len as usize];
            let written = MultiByteToWideChar(
                CP_ACP,
                0,
                bytes.as_ptr(),
                bytes.len() as i32,
                wide.as_mut_ptr(),
                len,
            );
            wide.truncate(written.max(0) as usize);
            String::from_utf16_lossy(&wide)
        }
    }
}
