//! Catalog entries describing selectable keyboards.

/// One keyboard listed in a catalog.
///
/// `id` is unique within its catalog. The symbols reference is optional at
/// catalog level; loading the keyboard requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardDescriptor {
    id: String,
    display_name: Option<String>,
    geometry: String,
    symbols: Option<String>,
    long_name: Option<String>,
    language: Option<String>,
}

impl KeyboardDescriptor {
    /// Creates a descriptor from its required fields.
    ///
    /// # Arguments
    ///
    /// * `id` - Catalog-unique keyboard id.
    /// * `geometry` - Name of the geometry document.
    pub fn new(id: impl Into<String>, geometry: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            geometry: geometry.into(),
            symbols: None,
            long_name: None,
            language: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.symbols = Some(symbols.into());
        self
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn geometry(&self) -> &str {
        &self.geometry
    }

    pub fn symbols(&self) -> Option<&str> {
        self.symbols.as_deref()
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
