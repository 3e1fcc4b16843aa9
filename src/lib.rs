//! Core library entry for the `fnscope` CLI.
//!
//! Given the files changed between two revisions, `fnscope` walks a file
//! reference graph outward from the changes and reports the deployable
//! function units that transitively depend on them.

pub mod adapters;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod graph;
pub mod names;
pub mod paths;
pub mod pipeline;
pub mod ports;
pub mod propagate;

use clap::error::ErrorKind;
use clap::Parser;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "FNSCOPE_LOG";

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    cli.command.settings_mut().keep_empty_patterns(|key| std::env::var_os(key));
    commands::dispatch(&cli.command)
}
