//! Clipboard format descriptor value object

use std::fmt;

use serde::Serialize;

use super::standard::StandardFormat;

/// Name given to formats whose identifier the OS could not name
pub const UNKNOWN_FORMAT_NAME: &str = "Unknown";

/// Name and identifier of a clipboard format.
///
/// Identity is the numeric `id`; two descriptors with the same id describe
/// the same native format even if their names differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    id: u32,
    name: String,
    has_name: bool,
}

impl FormatDescriptor {
    /// Descriptor with a resolved name
    pub fn named(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            has_name: true,
        }
    }

    /// Descriptor for an identifier the OS could not name
    pub fn unknown(id: u32) -> Self {
        Self {
            id,
            name: UNKNOWN_FORMAT_NAME.to_string(),
            has_name: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name was resolved rather than defaulted to "Unknown"
    pub fn has_name(&self) -> bool {
        self.has_name
    }
}

impl From<StandardFormat> for FormatDescriptor {
    fn from(format: StandardFormat) -> Self {
        Self::named(format.id(), format.name())
    }
}

impl AsRef<FormatDescriptor> for FormatDescriptor {
    fn as_ref(&self) -> &FormatDescriptor {
        self
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_descriptor_has_placeholder_name() {
        let format = FormatDescriptor::unknown(0xC123);
        assert_eq!(format.name(), "Unknown");
        assert!(!format.has_name());
    }

    #[test]
    fn standard_format_conversion() {
        let format = FormatDescriptor::from(StandardFormat::HDrop);
        assert_eq!(format.id(), 15);
        assert_eq!(format.name(), "HDrop");
        assert!(format.has_name());
    }

    #[test]
    fn serializes_for_json_listing() {
        let json = serde_json::to_string(&FormatDescriptor::named(1, "Text")).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Text","has_name":true}"#);
    }
}
