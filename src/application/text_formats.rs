//! Text format catalog
//!
//! The clipboard formats this crate can read and write as text, each with
//! its character width. Named formats are registered with the OS once, when
//! the catalog is first initialized.

use std::sync::{Arc, OnceLock};

use crate::domain::error::ClipboardError;
use crate::domain::format::{
    CharacterSize, FormatDescriptor, StandardFormat, TextFormatDescriptor, TextKind,
};

use super::ports::ClipboardBackend;
use super::registry::FormatRegistry;

const HTML_FORMAT_NAME: &str = "HTML Format";
const RTF_FORMAT_NAME: &str = "Rich Text Format";
const CSV_FORMAT_NAME: &str = "CSV";
const CSV_UNICODE_FORMAT_NAME: &str = "CSVUnicode";
const XML_SPREADSHEET_FORMAT_NAME: &str = "Xml Spreadsheet";

static SHARED: OnceLock<Arc<TextFormatCatalog>> = OnceLock::new();

/// The resolved set of text formats
#[derive(Debug, Clone)]
pub struct TextFormats {
    unicode: TextFormatDescriptor,
    text: TextFormatDescriptor,
    html: TextFormatDescriptor,
    rtf: TextFormatDescriptor,
    csv: TextFormatDescriptor,
    csv_unicode: TextFormatDescriptor,
    xml_spreadsheet: TextFormatDescriptor,
    file_list: TextFormatDescriptor,
}

impl TextFormats {
    /// UTF-16 text (`CF_UNICODETEXT`)
    pub fn unicode(&self) -> &TextFormatDescriptor {
        &self.unicode
    }

    /// ANSI code-page text (`CF_TEXT`)
    pub fn text(&self) -> &TextFormatDescriptor {
        &self.text
    }

    pub fn html(&self) -> &TextFormatDescriptor {
        &self.html
    }

    pub fn rtf(&self) -> &TextFormatDescriptor {
        &self.rtf
    }

    pub fn csv(&self) -> &TextFormatDescriptor {
        &self.csv
    }

    /// CSV read and written as UTF-16; same native id as [`csv`](Self::csv)
    pub fn csv_unicode(&self) -> &TextFormatDescriptor {
        &self.csv_unicode
    }

    pub fn xml_spreadsheet(&self) -> &TextFormatDescriptor {
        &self.xml_spreadsheet
    }

    /// File list (`CF_HDROP`)
    pub fn file_list(&self) -> &TextFormatDescriptor {
        &self.file_list
    }

    pub fn by_kind(&self, kind: TextKind) -> &TextFormatDescriptor {
        match kind {
            TextKind::PlainAnsi => &self.text,
            TextKind::Unicode => &self.unicode,
            TextKind::Html => &self.html,
            TextKind::Rtf => &self.rtf,
            TextKind::Csv => &self.csv,
            TextKind::CsvUnicode => &self.csv_unicode,
            TextKind::XmlSpreadsheet => &self.xml_spreadsheet,
            TextKind::FileList => &self.file_list,
        }
    }
}

/// Lazily initialized, process-wide text format catalog
#[derive(Default)]
pub struct TextFormatCatalog {
    formats: OnceLock<TextFormats>,
}

impl TextFormatCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalog used with the system clipboard
    pub fn shared() -> Arc<TextFormatCatalog> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(TextFormatCatalog::new())))
    }

    /// Formats, if [`initialize`](Self::initialize) has succeeded
    pub fn get(&self) -> Option<&TextFormats> {
        self.formats.get()
    }

    /// Register and resolve every text format. Later calls are no-ops.
    pub fn initialize<B: ClipboardBackend + ?Sized>(
        &self,
        registry: &FormatRegistry,
        backend: &B,
    ) -> Result<&TextFormats, ClipboardError> {
        if let Some(formats) = self.formats.get() {
            return Ok(formats);
        }

        let built = Self::build(registry, backend)?;
        Ok(self.formats.get_or_init(|| built))
    }

    fn build<B: ClipboardBackend + ?Sized>(
        registry: &FormatRegistry,
        backend: &B,
    ) -> Result<TextFormats, ClipboardError> {
        let named = |name: &str, kind: TextKind| -> Result<TextFormatDescriptor, ClipboardError> {
            let format = registry
                .resolve_by_name(backend, name)
                .ok_or_else(|| ClipboardError::FormatRegistration(name.to_string()))?;
            Ok(TextFormatDescriptor::new(
                FormatDescriptor::named(format.id(), name),
                CharacterSize::Narrow,
                kind,
            ))
        };
        let standard = |format: StandardFormat, size: CharacterSize, kind: TextKind| {
            TextFormatDescriptor::new(registry.resolve(backend, format.id()), size, kind)
        };

        let csv = named(CSV_FORMAT_NAME, TextKind::Csv)?;
        let csv_unicode = TextFormatDescriptor::alias(
            &csv,
            CSV_UNICODE_FORMAT_NAME,
            CharacterSize::Wide,
            TextKind::CsvUnicode,
        );

        let formats = TextFormats {
            html: named(HTML_FORMAT_NAME, TextKind::Html)?,
            rtf: named(RTF_FORMAT_NAME, TextKind::Rtf)?,
            csv,
            csv_unicode,
            xml_spreadsheet: named(XML_SPREADSHEET_FORMAT_NAME, TextKind::XmlSpreadsheet)?,
            unicode: standard(StandardFormat::Unicode, CharacterSize::Wide, TextKind::Unicode),
            text: standard(StandardFormat::Text, CharacterSize::Narrow, TextKind::PlainAnsi),
            file_list: standard(StandardFormat::HDrop, CharacterSize::Wide, TextKind::FileList),
        };
        tracing::debug!(
            html = formats.html.id(),
            rtf = formats.rtf.id(),
            csv = formats.csv.id(),
            xml_spreadsheet = formats.xml_spreadsheet.id(),
            "text formats initialized"
        );
        Ok(formats)
    }
}
