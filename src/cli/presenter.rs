//! CLI presenter for output formatting

use colored::*;

use crate::domain::format::FormatDescriptor;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (clipboard contents)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print one line per format: identifier, then name
    pub fn formats(&self, formats: &[FormatDescriptor]) {
        for format in formats {
            println!("{}", self.format_line(format));
        }
    }

    /// Print formats as a JSON array
    pub fn formats_json(&self, formats: &[FormatDescriptor]) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(formats)?);
        Ok(())
    }

    /// Render a format listing line
    pub fn format_line(&self, format: &FormatDescriptor) -> String {
        let name = if format.has_name() {
            format.name().normal()
        } else {
            format.name().dimmed()
        };
        format!("{:>6} {}", format.id(), name)
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
