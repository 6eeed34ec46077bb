//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

// Re-export commonly used types
pub use app::{
    fail, load_config, run_clear, run_config, run_formats, run_get, run_set, SetOptions,
    EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, FormatArg};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
