//! The [`ParseError`] type returned by every document parser.

use std::io;

use thiserror::Error;

use crate::error::ErrorCode;

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error raised while parsing a single layout document.
///
/// Parsing stops at the first error; no partially built content is exposed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed markup at byte {offset}: {message}")]
    Markup { offset: usize, message: String },

    #[error("`{element}` cannot appear as `{path}`")]
    Grammar { element: String, path: String },

    #[error("no `{attribute}` attribute for `{element}`")]
    MissingAttribute { element: String, attribute: String },

    #[error("invalid `{attribute}` value `{value}` for `{element}`")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("no such key `{0}`")]
    UnknownKeyReference(String),

    #[error("keyboard `{0}` is listed more than once")]
    DuplicateKeyboard(String),

    #[error("keycode {keycode} of `{key}` is already used by `{other}`")]
    DuplicateKeycode {
        keycode: u32,
        key: String,
        other: String,
    },

    #[error("`include` does not name a document")]
    EmptyInclude,
}

impl ParseError {
    /// Create a new `Markup` error at the given byte offset.
    pub fn markup(offset: usize, message: impl Into<String>) -> Self {
        Self::Markup {
            offset,
            message: message.into(),
        }
    }

    /// Returns the stable code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Io(_) => ErrorCode::E000,
            ParseError::Markup { .. } => ErrorCode::E001,
            ParseError::Grammar { .. } => ErrorCode::E100,
            ParseError::MissingAttribute { .. } => ErrorCode::E200,
            ParseError::InvalidAttribute { .. } => ErrorCode::E201,
            ParseError::UnknownKeyReference(_) => ErrorCode::E300,
            ParseError::DuplicateKeyboard(_) => ErrorCode::E301,
            ParseError::DuplicateKeycode { .. } => ErrorCode::E302,
            ParseError::EmptyInclude => ErrorCode::E303,
        }
    }

    /// Returns a hint on how to fix the document, if there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::Grammar { .. } => {
                Some("check the element nesting against the document kind")
            }
            ParseError::UnknownKeyReference(_) => {
                Some("every bound key must be introduced by the geometry document")
            }
            ParseError::DuplicateKeycode { .. } => {
                Some("explicit keycodes must not collide with automatically assigned ones")
            }
            ParseError::EmptyInclude => Some("put the included document name inside `include`"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_phases() {
        let markup = ParseError::markup(12, "mismatched end tag");
        assert_eq!(markup.code(), ErrorCode::E001);
        assert_eq!(
            markup.to_string(),
            "malformed markup at byte 12: mismatched end tag"
        );

        let grammar = ParseError::Grammar {
            element: "key".to_string(),
            path: "key/geometry".to_string(),
        };
        assert_eq!(grammar.code(), ErrorCode::E100);
        assert_eq!(grammar.to_string(), "`key` cannot appear as `key/geometry`");

        assert_eq!(
            ParseError::UnknownKeyReference("AC01".to_string()).code(),
            ErrorCode::E300
        );
    }

    #[test]
    fn test_help() {
        assert!(ParseError::EmptyInclude.help().is_some());
        assert!(ParseError::markup(0, "x").help().is_none());
    }
}
