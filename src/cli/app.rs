//! Command runners
//!
//! The clipboard core is blocking, so each command runs on tokio's blocking
//! pool against the system clipboard. The read/write logic itself is plain
//! functions over [`ClipboardAccess`] so it can run against any backend.

use std::process::ExitCode;

use crate::application::ports::{ClipboardBackend, ConfigStore};
use crate::application::ClipboardAccess;
use crate::domain::config::AppConfig;
use crate::domain::error::ClipboardError;
use crate::domain::format::{FormatDescriptor, TextFormatDescriptor, TextKind};
use crate::domain::retry::RetryPolicy;
use crate::infrastructure::{system_clipboard, SystemClipboard, XdgConfigStore};

use super::args::ConfigAction;
use super::config_cmd::handle_config_command;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Formats tried, in order, when `get` is not given one
pub const DEFAULT_SEARCH_ORDER: &[TextKind] = &[
    TextKind::FileList,
    TextKind::XmlSpreadsheet,
    TextKind::Html,
    TextKind::Csv,
    TextKind::Unicode,
    TextKind::Rtf,
];

/// What a read found on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    Text { format: String, value: String },
    Files(Vec<String>),
    /// Nothing usable; carries the warning to show
    Missing(String),
}

/// Parsed `set` options
#[derive(Debug, Clone)]
pub struct SetOptions {
    pub kind: TextKind,
    pub append: bool,
    pub values: Vec<String>,
}

impl SetOptions {
    /// Text to write; values joined with spaces
    pub fn text(&self) -> String {
        self.values.join(" ")
    }

    /// Reject a write with nothing to write
    pub fn validate(&self) -> Result<(), ClipboardError> {
        let missing = match self.kind {
            TextKind::FileList => self.values.is_empty(),
            _ => self.text().is_empty(),
        };
        if missing {
            return Err(ClipboardError::InvalidArgument(
                "a value to set is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read the clipboard as `kind`, or search the default order when `None`.
pub fn read_contents<B: ClipboardBackend>(
    clipboard: &ClipboardAccess<B>,
    kind: Option<TextKind>,
) -> Result<Contents, ClipboardError> {
    match kind {
        Some(TextKind::FileList) => Ok(read_file_list(clipboard)?.unwrap_or_else(|| {
            Contents::Missing("The clipboard does not contain a file list".to_string())
        })),
        Some(kind) => {
            let format = clipboard.formats().by_kind(kind);
            Ok(read_text(clipboard, format)?.unwrap_or_else(|| {
                Contents::Missing(format!(
                    "The clipboard does not contain {} data",
                    format.name()
                ))
            }))
        }
        None => {
            let mut first_error = None;
            for kind in DEFAULT_SEARCH_ORDER {
                let found = match kind {
                    TextKind::FileList => read_file_list(clipboard),
                    kind => read_text(clipboard, clipboard.formats().by_kind(*kind)),
                };
                match found {
                    Ok(Some(contents)) => return Ok(contents),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(format = %kind, "skipping format: {e}");
                        first_error.get_or_insert(e);
                    }
                }
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(Contents::Missing(
                    "The clipboard does not contain a supported clipboard format".to_string(),
                )),
            }
        }
    }
}

fn read_file_list<B: ClipboardBackend>(
    clipboard: &ClipboardAccess<B>,
) -> Result<Option<Contents>, ClipboardError> {
    if !clipboard.contains(clipboard.formats().file_list()) {
        return Ok(None);
    }
    Ok(Some(Contents::Files(clipboard.get_file_list()?)))
}

fn read_text<B: ClipboardBackend>(
    clipboard: &ClipboardAccess<B>,
    format: &TextFormatDescriptor,
) -> Result<Option<Contents>, ClipboardError> {
    if !clipboard.contains(format) {
        return Ok(None);
    }
    let value = clipboard.get_text(format)?;
    if value.is_some() {
        tracing::debug!(format = format.name(), "found clipboard text");
    }
    Ok(value.map(|value| Contents::Text {
        format: format.name().to_string(),
        value,
    }))
}

/// Write `options.values` to the clipboard, clearing it first unless appending.
pub fn write_contents<B: ClipboardBackend>(
    clipboard: &ClipboardAccess<B>,
    options: &SetOptions,
) -> Result<(), ClipboardError> {
    options.validate()?;
    let text = options.text();

    if !options.append {
        clipboard.clear()?;
    }
    match options.kind {
        TextKind::FileList => clipboard.set_file_list(&options.values),
        kind => clipboard.set_text(&text, clipboard.formats().by_kind(kind)),
    }
}

/// Run `op` against the system clipboard on the blocking pool
pub async fn with_system_clipboard<T, F>(policy: RetryPolicy, op: F) -> Result<T, ClipboardError>
where
    T: Send + 'static,
    F: FnOnce(&SystemClipboard) -> Result<T, ClipboardError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let clipboard = system_clipboard(policy)?;
        op(&clipboard)
    })
    .await
    .map_err(|e| ClipboardError::InternalConsistency(format!("Task join error: {}", e)))?
}

/// Exit code for a failed clipboard command
pub fn exit_code_for(error: &ClipboardError) -> u8 {
    match error {
        ClipboardError::InvalidArgument(_) => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Report `error` and map it to its exit code
pub fn fail(presenter: &Presenter, error: &ClipboardError) -> ExitCode {
    presenter.error(&error.to_string());
    ExitCode::from(exit_code_for(error))
}

/// Run `get`
pub async fn run_get(kind: Option<TextKind>, config: &AppConfig, presenter: &Presenter) -> ExitCode {
    match with_system_clipboard(config.retry_policy(), move |c| read_contents(c, kind)).await {
        Ok(Contents::Text { value, .. }) => {
            presenter.output(&value);
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Contents::Files(files)) => {
            for file in &files {
                presenter.output(file);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Contents::Missing(warning)) => {
            presenter.warn(&warning);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => fail(presenter, &e),
    }
}

/// Run `set`
pub async fn run_set(options: SetOptions, config: &AppConfig, presenter: &Presenter) -> ExitCode {
    if let Err(e) = options.validate() {
        return fail(presenter, &e);
    }
    match with_system_clipboard(config.retry_policy(), move |c| write_contents(c, &options)).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail(presenter, &e),
    }
}

/// Run `clear`
pub async fn run_clear(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    match with_system_clipboard(config.retry_policy(), |c| c.clear()).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => fail(presenter, &e),
    }
}

/// Run `formats`
pub async fn run_formats(json: bool, config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let formats: Vec<FormatDescriptor> =
        match with_system_clipboard(config.retry_policy(), |c| c.list_formats()).await {
            Ok(formats) => formats,
            Err(e) => return fail(presenter, &e),
        };

    if !json {
        presenter.formats(&formats);
        return ExitCode::from(EXIT_SUCCESS);
    }
    match presenter.formats_json(&formats) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Failed to encode formats: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run `config`
pub async fn run_config(action: ConfigAction, presenter: &Presenter) -> ExitCode {
    match handle_config_command(action, &XdgConfigStore::new(), presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load configuration: defaults overlaid with the config file
pub async fn load_config() -> AppConfig {
    XdgConfigStore::new().load_effective().await
}
