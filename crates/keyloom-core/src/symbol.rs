//! Symbols a key can produce.
//!
//! A key's symbol matrix is a sequence of [`SymbolLevel`]s, each addressed by
//! a `(group, level)` pair. Groups and levels are numbered in the order the
//! symbols document declared them.

/// Optional presentation attached to a [`Symbol`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    label: Option<String>,
    icon: Option<String>,
    tooltip: Option<String>,
}

impl Decoration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Returns true if no decoration is set
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.icon.is_none() && self.tooltip.is_none()
    }
}

/// The three kinds of symbol a key binding can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Literal text submitted as-is.
    Text(String),
    /// A keysym referenced by its name.
    Keysym(String),
    /// A keysym given by its numeric value, optionally with a name.
    Keyval { keyval: u32, name: Option<String> },
}

/// One symbol with its decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    kind: SymbolKind,
    decoration: Decoration,
}

impl Symbol {
    pub fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            decoration: Decoration::default(),
        }
    }

    /// Creates a literal text symbol.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(SymbolKind::Text(text.into()))
    }

    /// Creates a keysym-by-name symbol.
    pub fn keysym(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::Keysym(name.into()))
    }

    /// Creates a keysym-by-value symbol.
    pub fn keyval(keyval: u32, name: Option<String>) -> Self {
        Self::new(SymbolKind::Keyval { keyval, name })
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    /// Returns the text to show on a key for this symbol.
    ///
    /// The `label` decoration wins; otherwise the literal text or keysym name
    /// is used. A keysym given only by value has no label.
    pub fn label(&self) -> Option<&str> {
        if let Some(label) = self.decoration.label() {
            return Some(label);
        }
        match &self.kind {
            SymbolKind::Text(text) => Some(text),
            SymbolKind::Keysym(name) => Some(name),
            SymbolKind::Keyval { name, .. } => name.as_deref(),
        }
    }
}

/// The symbols bound at one `(group, level)` position of a key.
///
/// An empty level marks a slot that explicitly has no binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLevel {
    group: usize,
    level: usize,
    symbols: Vec<Symbol>,
}

impl SymbolLevel {
    pub fn new(group: usize, level: usize, symbols: Vec<Symbol>) -> Self {
        Self {
            group,
            level,
            symbols,
        }
    }

    /// Creates a level with no binding.
    pub fn empty(group: usize, level: usize) -> Self {
        Self::new(group, level, Vec::new())
    }

    pub fn group(&self) -> usize {
        self.group
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
