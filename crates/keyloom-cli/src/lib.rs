//! CLI logic for the keyloom layout tool.
//!
//! This module contains the core CLI logic: it loads the configuration,
//! builds a [`KeyboardLoader`] and runs the requested [`Command`].

pub mod error_adapter;

mod args;
mod config;
mod error;
mod report;

pub use args::{Args, Command};
pub use error::CliError;

use std::io::{self, Write};

use log::{info, warn};

use keyloom::KeyboardLoader;

/// Run the keyloom CLI application, writing to standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Catalog or keyboard loading errors
/// - Keyboards failing a `check`
/// - Output write errors
pub fn run(args: &Args) -> Result<(), CliError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the keyloom CLI application, writing to `out`.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    info!(command:? = args.command; "Running command");

    let config = config::load_config(args.config.as_ref())?;
    let mut loader_config = config.loader().clone();
    if let Some(dir) = &args.keyboards_dir {
        loader_config = loader_config.with_keyboards_dir(dir.as_str());
    }
    let loader = KeyboardLoader::new(loader_config);

    match &args.command {
        Command::List => {
            let keyboards = loader.list_keyboards()?;
            report::write_catalog(out, &keyboards)?;
        }
        Command::Show { id } => {
            let id = id.as_deref().unwrap_or(config.default_keyboard());
            let keyboard = loader.load(id)?;
            report::write_keyboard(out, &keyboard)?;
        }
        Command::Check { ids, all } => {
            let ids = if *all {
                loader
                    .list_keyboards()?
                    .iter()
                    .map(|keyboard| keyboard.id().to_string())
                    .collect()
            } else if ids.is_empty() {
                vec![config.default_keyboard().to_string()]
            } else {
                ids.clone()
            };
            check(&loader, &ids, out)?;
        }
    }

    Ok(())
}

/// Loads every keyboard in `ids`, reporting each one, and fails if any of
/// them did.
fn check(loader: &KeyboardLoader, ids: &[String], out: &mut impl Write) -> Result<(), CliError> {
    let mut failures = Vec::new();

    for id in ids {
        match loader.load(id) {
            Ok(keyboard) => writeln!(out, "ok    {id} ({} keys)", keyboard.keys().len())?,
            Err(err) => {
                writeln!(out, "FAIL  {id}: {}", err.root())?;
                warn!(keyboard = id.as_str(); "Keyboard failed to load");
                failures.push(err);
            }
        }
    }

    if failures.is_empty() {
        info!(checked = ids.len(); "All keyboards loaded");
        Ok(())
    } else {
        Err(CliError::Check {
            checked: ids.len(),
            failures,
        })
    }
}
