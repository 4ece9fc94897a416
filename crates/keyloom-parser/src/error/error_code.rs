//! Error codes for layout document errors.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Reading and markup errors
//! - `E1xx` - Grammar errors
//! - `E2xx` - Attribute errors
//! - `E3xx` - Linking errors

use std::fmt;

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Reading and Markup Errors (E0xx)
    // =========================================================================
    /// Unreadable document.
    ///
    /// The underlying stream failed while the document was being read.
    E000,

    /// Malformed markup.
    ///
    /// The document is not well-formed: a tag, comment or entity is broken,
    /// end tags do not match, or content appears outside the root element.
    E001,

    // =========================================================================
    // Grammar Errors (E1xx)
    // =========================================================================
    /// Element in a disallowed position.
    ///
    /// The element is well-formed but its nesting path is not one the
    /// document kind allows.
    E100,

    // =========================================================================
    // Attribute Errors (E2xx)
    // =========================================================================
    /// Missing required attribute.
    E200,

    /// Invalid attribute value.
    ///
    /// A numeric attribute could not be parsed, or is out of range.
    E201,

    // =========================================================================
    // Linking Errors (E3xx)
    // =========================================================================
    /// Unknown key reference.
    ///
    /// A symbols document binds a key the geometry never introduced.
    E300,

    /// Duplicate keyboard id.
    ///
    /// Two catalog entries share the same `id`.
    E301,

    /// Duplicate keycode.
    ///
    /// Two keys of one geometry document ended up with the same keycode.
    E302,

    /// Empty include.
    ///
    /// An `include` element has no document name.
    E303,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Reading and markup errors
            ErrorCode::E000 => "E000",
            ErrorCode::E001 => "E001",
            // Grammar errors
            ErrorCode::E100 => "E100",
            // Attribute errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            // Linking errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Reading and markup errors
            ErrorCode::E000 => "unreadable document",
            ErrorCode::E001 => "malformed markup",
            // Grammar errors
            ErrorCode::E100 => "element in disallowed position",
            // Attribute errors
            ErrorCode::E200 => "missing required attribute",
            ErrorCode::E201 => "invalid attribute value",
            // Linking errors
            ErrorCode::E300 => "unknown key reference",
            ErrorCode::E301 => "duplicate keyboard id",
            ErrorCode::E302 => "duplicate keycode",
            ErrorCode::E303 => "empty include",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E000.as_str(), "E000");
        assert_eq!(ErrorCode::E303.as_str(), "E303");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed markup");
        assert_eq!(ErrorCode::E201.description(), "invalid attribute value");
        assert_eq!(ErrorCode::E302.description(), "duplicate keycode");
    }
}
