//! WinClip CLI entry point

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use winclip::cli::{
    fail, load_config, run_clear, run_config, run_formats, run_get, run_set, Cli, Commands,
    Presenter, SetOptions,
};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("winclip={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => run_config(action, &presenter).await,
        Commands::Get { format, as_unicode } => {
            let kind = match format.map(|f| f.kind(as_unicode)).transpose() {
                Ok(kind) => kind,
                Err(e) => return fail(&presenter, &e),
            };
            let config = load_config().await;
            run_get(kind, &config, &presenter).await
        }
        Commands::Set {
            format,
            as_unicode,
            append,
            values,
        } => {
            let config = load_config().await;
            let kind = match format {
                Some(f) => match f.kind(as_unicode) {
                    Ok(kind) => kind,
                    Err(e) => return fail(&presenter, &e),
                },
                None => config.default_format_or_default(),
            };
            let options = SetOptions {
                kind,
                append: append || config.append_or_default(),
                values,
            };
            run_set(options, &config, &presenter).await
        }
        Commands::Clear => run_clear(&load_config().await, &presenter).await,
        Commands::Formats { json } => run_formats(json, &load_config().await, &presenter).await,
    }
}
