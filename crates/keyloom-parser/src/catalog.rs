//! Keyboard catalog documents.
//!
//! A catalog lists every selectable keyboard:
//!
//! ```xml
//! <keyboards>
//!   <keyboard id="us" name="English (US)" geometry="compact" symbols="us"
//!             longname="English" language="en"/>
//! </keyboards>
//! ```

use std::{collections::HashSet, io::Read};

use log::debug;

use keyloom_core::descriptor::KeyboardDescriptor;

use crate::{
    attributes::Attributes,
    error::{ParseError, Result},
    grammar::{self, DocumentKind},
    markup::{self, MarkupHandler},
};

/// Parses a catalog into its descriptors, in document order.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup, disallowed nesting, a
/// `keyboard` without `id` or `geometry`, or a repeated `id`.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<KeyboardDescriptor>> {
    let mut handler = CatalogHandler::default();
    markup::parse_reader(reader, &mut handler)?;

    debug!(keyboards = handler.keyboards.len(); "Catalog parsed");
    Ok(handler.keyboards)
}

#[derive(Default)]
struct CatalogHandler {
    keyboards: Vec<KeyboardDescriptor>,
    ids: HashSet<String>,
}

impl MarkupHandler for CatalogHandler {
    fn start_element(&mut self, name: &str, attributes: &Attributes, open: &[String]) -> Result<()> {
        grammar::validate(DocumentKind::Catalog, open, name)?;
        if name != "keyboard" {
            return Ok(());
        }

        let id = attributes.required(name, "id")?;
        let geometry = attributes.required(name, "geometry")?;
        if !self.ids.insert(id.to_string()) {
            return Err(ParseError::DuplicateKeyboard(id.to_string()));
        }

        let mut descriptor = KeyboardDescriptor::new(id, geometry);
        if let Some(symbols) = attributes.get("symbols") {
            descriptor = descriptor.with_symbols(symbols);
        }
        if let Some(display_name) = attributes.get("name") {
            descriptor = descriptor.with_display_name(display_name);
        }
        if let Some(long_name) = attributes.get("longname") {
            descriptor = descriptor.with_long_name(long_name);
        }
        if let Some(language) = attributes.get("language") {
            descriptor = descriptor.with_language(language);
        }

        self.keyboards.push(descriptor);
        Ok(())
    }

    fn end_element(&mut self, _name: &str, _open: &[String]) -> Result<()> {
        Ok(())
    }

    fn text(&mut self, _text: &str, _open: &[String]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_in_order() {
        let source = r#"<keyboards>
            <keyboard id="us" name="English" geometry="compact" symbols="us" language="en"/>
            <keyboard id="number" geometry="numbers" symbols="number" longname="Digits"/>
            <keyboard id="draft" geometry="compact"/>
        </keyboards>"#;
        let keyboards = parse_catalog(source.as_bytes()).unwrap();

        let ids: Vec<_> = keyboards.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec!["us", "number", "draft"]);
        assert_eq!(keyboards[0].display_name(), Some("English"));
        assert_eq!(keyboards[0].language(), Some("en"));
        assert_eq!(keyboards[1].geometry(), "numbers");
        assert_eq!(keyboards[1].long_name(), Some("Digits"));
        assert_eq!(keyboards[2].symbols(), None);
    }

    #[test]
    fn test_missing_required_attributes() {
        let missing_id = r#"<keyboards><keyboard geometry="compact"/></keyboards>"#;
        assert!(matches!(
            parse_catalog(missing_id.as_bytes()),
            Err(ParseError::MissingAttribute { ref attribute, .. }) if attribute == "id"
        ));

        let missing_geometry = r#"<keyboards><keyboard id="us"/></keyboards>"#;
        assert!(matches!(
            parse_catalog(missing_geometry.as_bytes()),
            Err(ParseError::MissingAttribute { ref attribute, .. }) if attribute == "geometry"
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let source = r#"<keyboards>
            <keyboard id="us" geometry="a"/><keyboard id="us" geometry="b"/>
        </keyboards>"#;
        assert!(matches!(
            parse_catalog(source.as_bytes()),
            Err(ParseError::DuplicateKeyboard(ref id)) if id == "us"
        ));
    }

    #[test]
    fn test_wrong_root() {
        assert!(matches!(
            parse_catalog("<geometry/>".as_bytes()),
            Err(ParseError::Grammar { .. })
        ));
    }
}
