//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A failed `check` carries one [`KeyloomError`] per keyboard; each of them
//! is rendered independently, followed by the summary.

use std::{fmt, iter};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use keyloom::KeyloomError;
use keyloom_parser::error::ParseError;

use crate::{config::ConfigError, error::CliError};

/// Adapter for a single [`KeyloomError`].
///
/// Code and help come from the innermost error, so a keyboard load that
/// failed on a parse error reports the parser's error code.
pub struct KeyloomAdapter<'a>(pub &'a KeyloomError);

impl fmt::Debug for KeyloomAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for KeyloomAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for KeyloomAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for KeyloomAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0.root() {
            KeyloomError::Io { .. } => "keyloom::io",
            KeyloomError::Parse { err, .. } => {
                return Some(Box::new(format!("keyloom::parse::{}", err.code())));
            }
            KeyloomError::UnknownKeyboard(_) | KeyloomError::MissingSymbols(_) => {
                "keyloom::catalog"
            }
            KeyloomError::CyclicOrDuplicateInclude(_) => "keyloom::include",
            KeyloomError::DanglingOutlineRef { .. } => "keyloom::outline",
            KeyloomError::Keyboard { .. } => "keyloom",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0.root() {
            KeyloomError::Io { .. } => {
                "check --keyboards-dir or the KEYLOOM_KEYBOARDS_DIR environment variable"
            }
            KeyloomError::Parse { err, .. } => return parse_help(err),
            KeyloomError::UnknownKeyboard(_) => "run `keyloom list` to see the known keyboards",
            KeyloomError::MissingSymbols(_) => {
                "add a `symbols` attribute to the keyboard in keyboards.xml"
            }
            KeyloomError::CyclicOrDuplicateInclude(_) => {
                "each symbols document can be included once per keyboard"
            }
            KeyloomError::DanglingOutlineRef { .. } => {
                "define the outline in the geometry document or drop the `oref` attribute"
            }
            KeyloomError::Keyboard { .. } => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn parse_help(err: &ParseError) -> Option<Box<dyn fmt::Display + '_>> {
    err.help().map(|h| Box::new(h) as Box<dyn fmt::Display>)
}

/// Adapter for the [`CliError`] variants that do not wrap a [`KeyloomError`].
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Keyloom(_) => "keyloom",
            CliError::Config(_) => "keyloom::config",
            CliError::Output(_) => "keyloom::output",
            CliError::Check { .. } => "keyloom::check",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                Some(Box::new("pass an existing TOML file to --config"))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a keyboard loading error or a CLI error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A keyboard loading error.
    Keyloom(KeyloomAdapter<'a>),
    /// A CLI error such as a bad configuration file.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Keyloom(k) => fmt::Display::fmt(k, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Keyloom(k) => std::error::Error::source(k),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Keyloom(k) => k.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Keyloom(k) => k.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Keyloom(k) => k.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into one or more reportable errors.
///
/// A failed `check` yields one entry per failing keyboard and then the
/// summary; every other error yields a single entry.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Keyloom(err) => vec![Reportable::Keyloom(KeyloomAdapter(err))],
        CliError::Check { failures, .. } => failures
            .iter()
            .map(|failure| Reportable::Keyloom(KeyloomAdapter(failure)))
            .chain(iter::once(Reportable::Error(ErrorAdapter(err))))
            .collect(),
        other => vec![Reportable::Error(ErrorAdapter(other))],
    }
}
