//! Predefined clipboard formats

/// Clipboard formats with fixed, well-known identifiers.
///
/// These never go through name resolution: the OS does not report names
/// for them, so the registry seeds them with the names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StandardFormat {
    None = 0,
    Text = 1,
    Bitmap = 2,
    MetaFilePict = 3,
    Sylk = 4,
    Dif = 5,
    Tiff = 6,
    OemText = 7,
    Dib = 8,
    Palette = 9,
    PenData = 10,
    Riff = 11,
    Wave = 12,
    Unicode = 13,
    EnhMetaFile = 14,
    HDrop = 15,
    Locale = 16,
    DibV5 = 17,
    OwnerDisplay = 0x0080,
    DspText = 0x0081,
    DspBitmap = 0x0082,
    DspMetaFilePict = 0x0083,
    DspEnhMetaFile = 0x008e,
    PrivateFirst = 0x0200,
    PrivateLast = 0x02ff,
    GdiObjFirst = 0x0300,
    GdiObjLast = 0x03ff,
}

/// All standard formats, in identifier order
pub const ALL_STANDARD_FORMATS: &[StandardFormat] = &[
    StandardFormat::None,
    StandardFormat::Text,
    StandardFormat::Bitmap,
    StandardFormat::MetaFilePict,
    StandardFormat::Sylk,
    StandardFormat::Dif,
    StandardFormat::Tiff,
    StandardFormat::OemText,
    StandardFormat::Dib,
    StandardFormat::Palette,
    StandardFormat::PenData,
    StandardFormat::Riff,
    StandardFormat::Wave,
    StandardFormat::Unicode,
    StandardFormat::EnhMetaFile,
    StandardFormat::HDrop,
    StandardFormat::Locale,
    StandardFormat::DibV5,
    StandardFormat::OwnerDisplay,
    StandardFormat::DspText,
    StandardFormat::DspBitmap,
    StandardFormat::DspMetaFilePict,
    StandardFormat::DspEnhMetaFile,
    StandardFormat::PrivateFirst,
    StandardFormat::PrivateLast,
    StandardFormat::GdiObjFirst,
    StandardFormat::GdiObjLast,
];

impl StandardFormat {
    /// Numeric clipboard format identifier
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Display name reported for this format
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Text => "Text",
            Self::Bitmap => "Bitmap",
            Self::MetaFilePict => "MetaFilePict",
            Self::Sylk => "Sylk",
            Self::Dif => "Dif",
            Self::Tiff => "Tiff",
            Self::OemText => "OemText",
            Self::Dib => "Dib",
            Self::Palette => "Palette",
            Self::PenData => "PenData",
            Self::Riff => "Riff",
            Self::Wave => "Wave",
            Self::Unicode => "Unicode",
            Self::EnhMetaFile => "ENHMetaFile",
            Self::HDrop => "HDrop",
            Self::Locale => "Locale",
            Self::DibV5 => "DIBV5",
            Self::OwnerDisplay => "OwnerDisplay",
            Self::DspText => "DspText",
            Self::DspBitmap => "DspBitmap",
            Self::DspMetaFilePict => "DspMetaFilePict",
            Self::DspEnhMetaFile => "DspEnhmetaFile",
            Self::PrivateFirst => "PrivateFirst",
            Self::PrivateLast => "PrivateLast",
            Self::GdiObjFirst => "GdiObjfirst",
            Self::GdiObjLast => "GdiObjLast",
        }
    }
}
