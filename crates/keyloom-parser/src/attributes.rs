//! Attribute access for markup elements.
//!
//! [`Attributes`] keeps attributes in document order and offers typed
//! accessors that turn absent or unparsable values into [`ParseError`]s
//! naming the element and attribute involved.

use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{ParseError, Result};

/// Attributes of one element, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute. Returns false if the name was already present, in
    /// which case the first value is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value.into());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns a required attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingAttribute`] if the attribute is absent.
    pub fn required(&self, element: &str, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| ParseError::MissingAttribute {
            element: element.to_string(),
            attribute: name.to_string(),
        })
    }

    /// Parses an optional attribute with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidAttribute`] if the attribute is present
    /// but does not parse.
    pub fn parse<T: FromStr>(&self, element: &str, name: &str) -> Result<Option<T>> {
        self.get(name)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(element, name, value))
            })
            .transpose()
    }

    /// Parses a required attribute with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingAttribute`] if the attribute is absent,
    /// or [`ParseError::InvalidAttribute`] if it does not parse.
    pub fn parse_required<T: FromStr>(&self, element: &str, name: &str) -> Result<T> {
        let value = self.required(element, name)?;
        value
            .trim()
            .parse()
            .map_err(|_| invalid(element, name, value))
    }

    /// Parses an optional unsigned integer written with a C-style prefix:
    /// `0x` for hexadecimal, a leading `0` for octal, decimal otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidAttribute`] if the value is not such an
    /// integer or does not fit in `u32`.
    pub fn parse_prefixed_u32(&self, element: &str, name: &str) -> Result<Option<u32>> {
        self.get(name)
            .map(|value| parse_prefixed_u32(value).ok_or_else(|| invalid(element, name, value)))
            .transpose()
    }
}

fn invalid(element: &str, name: &str, value: &str) -> ParseError {
    ParseError::InvalidAttribute {
        element: element.to_string(),
        attribute: name.to_string(),
        value: value.to_string(),
    }
}

/// Parses an unsigned integer, choosing the radix from its prefix.
pub fn parse_prefixed_u32(value: &str) -> Option<u32> {
    let value = value.trim();
    let (digits, radix) = if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        (hex, 16)
    } else if value.len() > 1 && value.starts_with('0') {
        (&value[1..], 8)
    } else {
        (value, 10)
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
