//! Command-line argument definitions for the keyloom CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the keyboards root, the
//! configuration file and the logging verbosity; the [`Command`] picks
//! what to do with the layouts.

use clap::{Parser, Subcommand};

/// Command-line arguments for the keyloom layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding keyboards.xml, geometry/ and symbols/
    #[arg(short, long, global = true, value_name = "DIR")]
    pub keyboards_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

/// Layout subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the keyboards declared by the catalog
    List,

    /// Load one keyboard and print its sections, keys and symbols
    Show {
        /// Keyboard id; defaults to the configured default keyboard
        id: Option<String>,
    },

    /// Load keyboards and report every one that fails
    Check {
        /// Keyboard ids to check
        ids: Vec<String>,

        /// Check every keyboard in the catalog
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
}
