//! Error types for parsing one layout document.
//!
//! Every failure while reading a catalog, geometry or symbols document is a
//! [`ParseError`]. Each variant carries a stable [`ErrorCode`] so reports can
//! be searched and documented.
//!
//! # Example
//!
//! ```
//! # use keyloom_parser::error::{ErrorCode, ParseError};
//! let err = ParseError::MissingAttribute {
//!     element: "keyboard".to_string(),
//!     attribute: "id".to_string(),
//! };
//!
//! assert_eq!(err.code(), ErrorCode::E200);
//! assert_eq!(err.to_string(), "no `id` attribute for `keyboard`");
//! ```

mod error_code;
mod parse_error;

pub use error_code::ErrorCode;
pub use parse_error::{ParseError, Result};
