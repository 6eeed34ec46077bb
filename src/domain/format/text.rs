//! Text clipboard formats

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidTextFormatError;

use super::descriptor::FormatDescriptor;

/// All text kinds, in catalog order
pub const ALL_TEXT_KINDS: &[TextKind] = &[
    TextKind::PlainAnsi,
    TextKind::Unicode,
    TextKind::Html,
    TextKind::Rtf,
    TextKind::Csv,
    TextKind::CsvUnicode,
    TextKind::XmlSpreadsheet,
    TextKind::FileList,
];

/// Semantic kind of a text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextKind {
    PlainAnsi,
    #[default]
    Unicode,
    Html,
    Rtf,
    Csv,
    CsvUnicode,
    XmlSpreadsheet,
    FileList,
}

impl TextKind {
    /// Get the string identifier for this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlainAnsi => "text",
            Self::Unicode => "unicode",
            Self::Html => "html",
            Self::Rtf => "rtf",
            Self::Csv => "csv",
            Self::CsvUnicode => "csv-unicode",
            Self::XmlSpreadsheet => "xml-spreadsheet",
            Self::FileList => "file-list",
        }
    }
}

impl FromStr for TextKind {
    type Err = InvalidTextFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "text" | "ansi" => Ok(Self::PlainAnsi),
            "unicode" => Ok(Self::Unicode),
            "html" => Ok(Self::Html),
            "rtf" => Ok(Self::Rtf),
            "csv" => Ok(Self::Csv),
            "csv-unicode" => Ok(Self::CsvUnicode),
            "xml-spreadsheet" => Ok(Self::XmlSpreadsheet),
            "file-list" | "hdrop" => Ok(Self::FileList),
            _ => Err(InvalidTextFormatError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of one character in a text format's native buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSize {
    /// Code-page encoded bytes
    Narrow,
    /// UTF-16 code units
    Wide,
}

impl CharacterSize {
    pub const fn bytes(self) -> usize {
        match self {
            Self::Narrow => 1,
            Self::Wide => 2,
        }
    }
}

/// A clipboard format that carries text, with its encoding width.
///
/// Several text formats may share one native identifier (CSV and its
/// wide-character alias); they stay distinct by name and width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormatDescriptor {
    format: FormatDescriptor,
    character_size: CharacterSize,
    kind: TextKind,
}

impl TextFormatDescriptor {
    pub fn new(format: FormatDescriptor, character_size: CharacterSize, kind: TextKind) -> Self {
        Self {
            format,
            character_size,
            kind,
        }
    }

    /// Alias of `source` under a different name and width, same native id
    pub fn alias(
        source: &TextFormatDescriptor,
        name: &str,
        character_size: CharacterSize,
        kind: TextKind,
    ) -> Self {
        Self {
            format: FormatDescriptor::named(source.id(), name),
            character_size,
            kind,
        }
    }

    pub fn id(&self) -> u32 {
        self.format.id()
    }

    pub fn name(&self) -> &str {
        self.format.name()
    }

    pub fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    pub fn character_size(&self) -> CharacterSize {
        self.character_size
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }
}

impl AsRef<FormatDescriptor> for TextFormatDescriptor {
    fn as_ref(&self) -> &FormatDescriptor {
        &self.format
    }
}

impl fmt::Display for TextFormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format.name())
    }
}
