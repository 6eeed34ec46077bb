//! File-list (`CF_HDROP`) block layout
//!
//! The block is a `DROPFILES` header followed by wide-character paths, each
//! NUL-terminated, with one extra NUL closing the list:
//!
//! ```text
//! +--------------------+----------------+----------------+-----+----+
//! | header (20 bytes)  | path 0 \0      | path 1 \0      | ... | \0 |
//! +--------------------+----------------+----------------+-----+----+
//! ```
//!
//! Readers such as Explorer and `DragQueryFileW` rely on this layout
//! bit-for-bit.

use bytemuck::{Pod, Zeroable};

use super::standard::StandardFormat;

/// Size of the `DROPFILES` header in bytes
pub const DROP_FILES_HEADER_SIZE: usize = std::mem::size_of::<DropFilesHeader>();

const WIDE_CHAR_SIZE: usize = 2;

/// Native `DROPFILES` header
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
struct DropFilesHeader {
    /// Offset of the first path from the start of the block
    files_offset: i32,
    point_x: i32,
    point_y: i32,
    /// Drop point is in the non-client area
    non_client: i32,
    /// Paths are UTF-16 rather than ANSI
    wide: i32,
}

impl DropFilesHeader {
    fn wide() -> Self {
        Self {
            files_offset: DROP_FILES_HEADER_SIZE as i32,
            point_x: 0,
            point_y: 0,
            non_client: 0,
            wide: 1,
        }
    }
}

/// An owned, fully laid out file-list block ready to copy into native memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListBlock {
    bytes: Vec<u8>,
}

impl FileListBlock {
    /// Lay out `files` as a wide-character `DROPFILES` block.
    ///
    /// An empty list still produces a valid block: the header plus the
    /// closing terminator.
    pub fn build<S: AsRef<str>>(files: &[S]) -> Self {
        let encoded: Vec<Vec<u16>> = files
            .iter()
            .map(|f| f.as_ref().encode_utf16().collect())
            .collect();

        // every path plus its terminator, plus the list terminator
        let total_chars: usize = encoded.iter().map(|p| p.len() + 1).sum::<usize>() + 1;
        let mut bytes = vec![0u8; DROP_FILES_HEADER_SIZE + total_chars * WIDE_CHAR_SIZE];

        bytes[..DROP_FILES_HEADER_SIZE].copy_from_slice(bytemuck::bytes_of(&DropFilesHeader::wide()));

        let mut cursor = DROP_FILES_HEADER_SIZE;
        for path in &encoded {
            for (i, unit) in path.iter().enumerate() {
                let at = cursor + i * WIDE_CHAR_SIZE;
                bytes[at..at + WIDE_CHAR_SIZE].copy_from_slice(&unit.to_le_bytes());
            }
            cursor += (path.len() + 1) * WIDE_CHAR_SIZE;
        }

        Self { bytes }
    }

    /// Clipboard format this block is stored under
    pub const fn format_id() -> u32 {
        StandardFormat::HDrop.id()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read the paths back out of a native block.
    ///
    /// Returns `None` if the header is truncated, points outside the block,
    /// or describes ANSI paths.
    pub fn parse(bytes: &[u8]) -> Option<Vec<String>> {
        if bytes.len() < DROP_FILES_HEADER_SIZE {
            return None;
        }
        let header: DropFilesHeader = bytemuck::pod_read_unaligned(&bytes[..DROP_FILES_HEADER_SIZE]);
        if header.wide == 0 || header.files_offset < 0 {
            return None;
        }
        let start = header.files_offset as usize;
        if start > bytes.len() {
            return None;
        }

        let units: Vec<u16> = bytes[start..]
            .chunks_exact(WIDE_CHAR_SIZE)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();

        let mut files = Vec::new();
        let mut rest = units.as_slice();
        loop {
            let end = rest.iter().position(|&u| u == 0)?;
            if end == 0 {
                break;
            }
            files.push(String::from_utf16_lossy(&rest[..end]));
            rest = &rest[end + 1..];
        }
        Some(files)
    }
}
