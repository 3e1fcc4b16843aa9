//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::pipeline::OutputFormat;

/// Top-level CLI parser for `fnscope`.
#[derive(Debug, Parser)]
#[command(
    name = "fnscope",
    version,
    about = "Find the deployable function units affected by a change"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the units affected between two revisions.
    Affected {
        /// Run settings.
        #[command(flatten)]
        settings: Settings,
        /// Output format of the result line.
        #[arg(long, value_enum, default_value_t = OutputFormat::Line)]
        format: OutputFormat,
    },
    /// Print the filtered reference graph of the unit files as JSON.
    Graph {
        /// Run settings.
        #[command(flatten)]
        settings: Settings,
    },
    /// Show how each path is classified.
    Classify {
        /// Run settings.
        #[command(flatten)]
        settings: Settings,
        /// Paths to classify.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

impl Command {
    /// Settings shared by every subcommand.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        match self {
            Self::Affected { settings, .. }
            | Self::Graph { settings }
            | Self::Classify { settings, .. } => settings,
        }
    }

    /// Mutable access to the settings shared by every subcommand.
    pub fn settings_mut(&mut self) -> &mut Settings {
        match self {
            Self::Affected { settings, .. }
            | Self::Graph { settings }
            | Self::Classify { settings, .. } => settings,
        }
    }
}
