//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::error::ClipboardError;
use crate::domain::format::TextKind;

/// WinClip - typed access to the Windows clipboard
#[derive(Parser, Debug)]
#[command(name = "winclip")]
#[command(version)]
#[command(about = "Read and write the Windows clipboard as text or file lists")]
#[command(long_about = None)]
pub struct Cli {
    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the clipboard contents
    Get {
        /// Format to read; without it the first available of
        /// file-list, xml-spreadsheet, html, csv, unicode, rtf is printed
        #[arg(short = 'f', long, value_name = "FORMAT")]
        format: Option<FormatArg>,

        /// Read CSV as UTF-16 rather than code-page text (csv only)
        #[arg(long, requires = "format")]
        as_unicode: bool,
    },
    /// Put text or files on the clipboard
    Set {
        /// Format to write (default: config default_format, else unicode)
        #[arg(short = 'f', long, value_name = "FORMAT")]
        format: Option<FormatArg>,

        /// Write CSV as UTF-16 rather than code-page text (csv only)
        #[arg(long, requires = "format")]
        as_unicode: bool,

        /// Keep existing clipboard data instead of clearing it first
        #[arg(short = 'a', long)]
        append: bool,

        /// Text to write (joined with spaces), or paths for file-list
        #[arg(value_name = "VALUE")]
        values: Vec<String>,
    },
    /// Empty the clipboard
    Clear,
    /// List the formats currently on the clipboard
    Formats {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Clipboard format argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Unicode,
    Html,
    Rtf,
    Csv,
    XmlSpreadsheet,
    FileList,
}

impl FormatArg {
    /// Text kind selected by this argument and the `--as-unicode` switch.
    ///
    /// `--as-unicode` is only accepted together with CSV.
    pub fn kind(self, as_unicode: bool) -> Result<TextKind, ClipboardError> {
        match (TextKind::from(self), as_unicode) {
            (TextKind::Csv, true) => Ok(TextKind::CsvUnicode),
            (kind, false) => Ok(kind),
            (kind, true) => Err(ClipboardError::InvalidArgument(format!(
                "--as-unicode only applies to csv, not {}",
                kind
            ))),
        }
    }
}

impl From<FormatArg> for TextKind {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => TextKind::PlainAnsi,
            FormatArg::Unicode => TextKind::Unicode,
            FormatArg::Html => TextKind::Html,
            FormatArg::Rtf => TextKind::Rtf,
            FormatArg::Csv => TextKind::Csv,
            FormatArg::XmlSpreadsheet => TextKind::XmlSpreadsheet,
            FormatArg::FileList => TextKind::FileList,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["open_attempts", "retry_delay_ms", "default_format", "append"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
