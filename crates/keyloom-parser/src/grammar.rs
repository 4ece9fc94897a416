//! Element nesting rules for each kind of layout document.
//!
//! A path is written innermost element first, joined with `/`, so a point
//! inside an outline of a geometry document is `point/outline/geometry`.
//! Only paths explicitly listed for a document kind are accepted.

use std::fmt;

use crate::error::{ParseError, Result};

const CATALOG_PATHS: &[&str] = &["keyboards", "keyboard/keyboards"];

const GEOMETRY_PATHS: &[&str] = &[
    "geometry",
    "bounds/geometry",
    "section/geometry",
    "bounds/section/geometry",
    "button/section/geometry",
    "button/geometry",
    "outline/geometry",
    "point/outline/geometry",
];

const SYMBOLS_PATHS: &[&str] = &[
    "symbols",
    "include/symbols",
    "key/symbols",
    "symbol/key/symbols",
    "keysym/key/symbols",
    "text/key/symbols",
    "invalid/key/symbols",
];

/// The kinds of document the loader reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// The keyboard catalog.
    Catalog,
    /// A geometry document.
    Geometry,
    /// A symbols document, read in full.
    Symbols,
    /// A symbols document, scanned for its includes only.
    Prerequisites,
}

impl DocumentKind {
    /// Returns every element path allowed in this kind of document.
    pub fn allowed_paths(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Catalog => CATALOG_PATHS,
            DocumentKind::Geometry => GEOMETRY_PATHS,
            DocumentKind::Symbols | DocumentKind::Prerequisites => SYMBOLS_PATHS,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Catalog => "catalog",
            DocumentKind::Geometry => "geometry",
            DocumentKind::Symbols => "symbols",
            DocumentKind::Prerequisites => "prerequisites",
        };
        f.write_str(name)
    }
}

/// Builds the path of `name` opened inside `open` (outermost first).
pub fn element_path(open: &[String], name: &str) -> String {
    let mut path = String::from(name);
    for parent in open.iter().rev() {
        path.push('/');
        path.push_str(parent);
    }
    path
}

/// Checks that `name` may be opened inside `open` in a document of `kind`.
///
/// # Errors
///
/// Returns [`ParseError::Grammar`] naming the element and its path when the
/// path is not allowed.
pub fn validate(kind: DocumentKind, open: &[String], name: &str) -> Result<()> {
    let path = element_path(open, name);
    if kind.allowed_paths().contains(&path.as_str()) {
        Ok(())
    } else {
        Err(ParseError::Grammar {
            element: name.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_element_path_is_innermost_first() {
        assert_eq!(element_path(&[], "geometry"), "geometry");
        assert_eq!(
            element_path(&open(&["geometry", "outline"]), "point"),
            "point/outline/geometry"
        );
    }

    #[test]
    fn test_geometry_paths() {
        let kind = DocumentKind::Geometry;
        assert!(validate(kind, &[], "geometry").is_ok());
        assert!(validate(kind, &open(&["geometry"]), "section").is_ok());
        assert!(validate(kind, &open(&["geometry", "section"]), "button").is_ok());
        assert!(validate(kind, &open(&["geometry", "section"]), "bounds").is_ok());
        assert!(validate(kind, &open(&["geometry", "outline"]), "point").is_ok());

        assert!(validate(kind, &[], "symbols").is_err());
        assert!(validate(kind, &open(&["geometry"]), "point").is_err());
        assert!(validate(kind, &open(&["geometry", "section"]), "section").is_err());
    }

    #[test]
    fn test_rejection_names_path() {
        let err = validate(DocumentKind::Symbols, &open(&["symbols"]), "text").unwrap_err();
        match err {
            ParseError::Grammar { element, path } => {
                assert_eq!(element, "text");
                assert_eq!(path, "text/symbols");
            }
            other => panic!("expected grammar error, got {other:?}"),
        }
    }

    #[test]
    fn test_catalog_and_symbols_paths() {
        assert!(validate(DocumentKind::Catalog, &open(&["keyboards"]), "keyboard").is_ok());
        assert!(validate(DocumentKind::Catalog, &open(&["keyboards", "keyboard"]), "keyboard").is_err());

        let symbols = open(&["symbols", "key"]);
        for child in ["symbol", "keysym", "text", "invalid"] {
            assert!(validate(DocumentKind::Symbols, &symbols, child).is_ok());
            assert!(validate(DocumentKind::Prerequisites, &symbols, child).is_ok());
        }
        assert!(validate(DocumentKind::Symbols, &symbols, "include").is_err());
    }
}
