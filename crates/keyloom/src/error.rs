//! Error types for keyboard loading.
//!
//! This module provides the main error type [`KeyloomError`], which wraps
//! document parse failures together with the cross-document problems that
//! only show up once several documents are linked into one keyboard.

use std::io;

use thiserror::Error;

use keyloom_parser::error::ParseError;

/// The main error type for keyloom operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant names the document that failed and carries the
/// structured [`ParseError`], including its error code.
///
/// The `Keyboard` variant wraps any other failure with the id of the
/// keyboard being loaded; use [`KeyloomError::root`] to get at the cause.
#[derive(Debug, Error)]
pub enum KeyloomError {
    #[error("cannot open {resource}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },

    #[error("{document}: {err}")]
    Parse { document: String, err: ParseError },

    #[error("no keyboard with id `{0}` in the catalog")]
    UnknownKeyboard(String),

    #[error("keyboard `{0}` does not name a symbols document")]
    MissingSymbols(String),

    #[error("symbols document `{0}` is included more than once")]
    CyclicOrDuplicateInclude(String),

    #[error("key `{key}` uses outline `{oref}`, which is not defined")]
    DanglingOutlineRef { key: String, oref: String },

    #[error("cannot load keyboard `{keyboard}`")]
    Keyboard {
        keyboard: String,
        source: Box<KeyloomError>,
    },
}

impl KeyloomError {
    /// Create a new `Parse` error for the named document.
    pub fn new_parse_error(err: ParseError, document: impl Into<String>) -> Self {
        Self::Parse {
            err,
            document: document.into(),
        }
    }

    /// Returns the innermost error, skipping `Keyboard` wrappers.
    pub fn root(&self) -> &KeyloomError {
        match self {
            Self::Keyboard { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_keyboard_context() {
        let err = KeyloomError::Keyboard {
            keyboard: "us".to_string(),
            source: Box::new(KeyloomError::MissingSymbols("us".to_string())),
        };

        assert_eq!(err.to_string(), "cannot load keyboard `us`");
        assert!(matches!(err.root(), KeyloomError::MissingSymbols(id) if id == "us"));
    }

    #[test]
    fn test_parse_error_names_document() {
        let err = KeyloomError::new_parse_error(ParseError::EmptyInclude, "symbols/us.xml");
        assert!(err.to_string().starts_with("symbols/us.xml: "));
        assert!(matches!(err.root(), KeyloomError::Parse { .. }));
    }
}
