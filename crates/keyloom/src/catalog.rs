//! The list of selectable keyboards.

use log::debug;

use keyloom_core::descriptor::KeyboardDescriptor;
use keyloom_parser::parse_catalog;

use crate::{KeyloomError, resource::ResourceName};

/// Keyboards declared by a catalog document, in document order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    keyboards: Vec<KeyboardDescriptor>,
}

impl Catalog {
    /// Reads `keyboards.xml` below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyloomError::Io`] when the catalog cannot be opened and
    /// [`KeyloomError::Parse`] when it is malformed.
    pub fn load(root: &ResourceName) -> Result<Self, KeyloomError> {
        let resource = root.catalog();
        let keyboards = resource.read_with(parse_catalog)?;
        debug!(catalog:% = resource, keyboards = keyboards.len(); "Catalog loaded");
        Ok(Self { keyboards })
    }

    pub fn from_descriptors(keyboards: Vec<KeyboardDescriptor>) -> Self {
        Self { keyboards }
    }

    /// Returns the descriptor with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`KeyloomError::UnknownKeyboard`] when no keyboard has that id.
    pub fn resolve(&self, id: &str) -> Result<&KeyboardDescriptor, KeyloomError> {
        self.keyboards
            .iter()
            .find(|keyboard| keyboard.id() == id)
            .ok_or_else(|| KeyloomError::UnknownKeyboard(id.to_string()))
    }

    pub fn list(&self) -> &[KeyboardDescriptor] {
        &self.keyboards
    }

    pub fn len(&self) -> usize {
        self.keyboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyboards.is_empty()
    }
}
