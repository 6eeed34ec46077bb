//! Clipboard format value objects

pub mod descriptor;
pub mod file_list;
pub mod standard;
pub mod text;

pub use descriptor::{FormatDescriptor, UNKNOWN_FORMAT_NAME};
pub use file_list::{FileListBlock, DROP_FILES_HEADER_SIZE};
pub use standard::{StandardFormat, ALL_STANDARD_FORMATS};
pub use text::{CharacterSize, TextFormatDescriptor, TextKind, ALL_TEXT_KINDS};
