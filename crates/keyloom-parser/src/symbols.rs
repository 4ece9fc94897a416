//! Symbols documents: what each key produces.
//!
//! ```xml
//! <symbols>
//!   <include>common</include>
//!   <key name="AC01" groups="2">
//!     <text label="a">a</text>
//!     <text>A</text>
//!     <keysym keyval="0xe6">ae</keysym>
//!     <invalid/>
//!   </key>
//! </symbols>
//! ```
//!
//! The children of one `key` element are its slots. They are spread over the
//! block's `groups` count, group-major: with `n` slots every group holds
//! `ceil(n / groups)` levels. A block's groups are numbered after the groups
//! the key already has, so binding the same key twice adds groups.
//!
//! Includes are not followed here. [`scan_includes`] lists them so the caller
//! can load included documents first.

use std::{
    collections::{HashMap, hash_map::Entry},
    io::Read,
};

use log::debug;

use keyloom_core::{
    key::KeyId,
    symbol::{Decoration, Symbol, SymbolLevel},
};

use crate::{
    attributes::Attributes,
    error::{ParseError, Result},
    geometry::GeometryResult,
    grammar::{self, DocumentKind},
    markup::{self, MarkupHandler},
};

/// Parses a symbols document and binds its symbols to keys of `geometry`.
///
/// Bindings are applied only if the whole document parses; on error
/// `geometry` is left untouched.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup, disallowed nesting,
/// missing or invalid attributes, or a `key` naming no geometry key.
pub fn parse_symbols<R: Read>(reader: R, geometry: &mut GeometryResult) -> Result<()> {
    let staged = {
        let mut handler = SymbolsHandler::new(geometry);
        markup::parse_reader(reader, &mut handler)?;
        handler.staged
    };

    let mut bound = 0;
    for (id, levels) in staged {
        if let Some(key) = geometry.key_mut(id) {
            bound += levels.len();
            key.extend_levels(levels);
        }
    }
    debug!(levels = bound; "Symbols bound");
    Ok(())
}

/// Lists the documents a symbols document includes, in document order.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup, disallowed nesting, or an
/// `include` without a document name.
pub fn scan_includes<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut handler = PrerequisitesHandler::default();
    markup::parse_reader(reader, &mut handler)?;
    Ok(handler.includes)
}

struct KeyBlock {
    key: KeyId,
    groups: usize,
    slots: Vec<Option<Symbol>>,
}

struct PendingSymbol {
    keyval: Option<u32>,
    decoration: Decoration,
}

struct SymbolsHandler<'g> {
    geometry: &'g GeometryResult,
    staged: Vec<(KeyId, Vec<SymbolLevel>)>,
    /// Next free group per key, counting groups staged by this document.
    next_group: HashMap<KeyId, usize>,
    block: Option<KeyBlock>,
    symbol: Option<PendingSymbol>,
    text: String,
}

impl<'g> SymbolsHandler<'g> {
    fn new(geometry: &'g GeometryResult) -> Self {
        Self {
            geometry,
            staged: Vec::new(),
            next_group: HashMap::new(),
            block: None,
            symbol: None,
            text: String::new(),
        }
    }

    fn start_key(&mut self, attributes: &Attributes) -> Result<()> {
        let element = "key";
        let name = attributes.required(element, "name")?;
        let key = self
            .geometry
            .find_key(name)
            .ok_or_else(|| ParseError::UnknownKeyReference(name.to_string()))?;

        let groups = attributes.parse::<usize>(element, "groups")?.unwrap_or(1);
        if groups == 0 {
            return Err(ParseError::InvalidAttribute {
                element: element.to_string(),
                attribute: "groups".to_string(),
                value: "0".to_string(),
            });
        }

        self.block = Some(KeyBlock {
            key,
            groups,
            slots: Vec::new(),
        });
        Ok(())
    }

    fn start_symbol(&mut self, name: &str, attributes: &Attributes) -> Result<()> {
        let keyval = if name == "keysym" {
            let keyval = attributes.parse_prefixed_u32(name, "keyval")?;
            Some(keyval.ok_or_else(|| ParseError::MissingAttribute {
                element: name.to_string(),
                attribute: "keyval".to_string(),
            })?)
        } else {
            None
        };

        let mut decoration = Decoration::new();
        if let Some(label) = attributes.get("label") {
            decoration = decoration.with_label(label);
        }
        if let Some(icon) = attributes.get("icon") {
            decoration = decoration.with_icon(icon);
        }
        if let Some(tooltip) = attributes.get("tooltip") {
            decoration = decoration.with_tooltip(tooltip);
        }

        self.symbol = Some(PendingSymbol { keyval, decoration });
        self.text.clear();
        Ok(())
    }

    fn end_symbol(&mut self, name: &str) {
        let Some(pending) = self.symbol.take() else {
            return;
        };
        let text = std::mem::take(&mut self.text);

        let symbol = match (name, pending.keyval) {
            ("keysym", Some(keyval)) => {
                let label = text.trim();
                Symbol::keyval(keyval, (!label.is_empty()).then(|| label.to_string()))
            }
            ("symbol", _) => Symbol::keysym(text.trim()),
            _ => Symbol::text(text),
        };

        if let Some(block) = self.block.as_mut() {
            block
                .slots
                .push(Some(symbol.with_decoration(pending.decoration)));
        }
    }

    fn end_key(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        if block.slots.is_empty() {
            return;
        }

        let geometry = self.geometry;
        let next_group = match self.next_group.entry(block.key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(geometry.key(block.key).map_or(0, |key| key.groups()))
            }
        };

        let base = *next_group;
        let levels_per_group = block.slots.len().div_ceil(block.groups);
        let levels: Vec<_> = block
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                let group = base + index / levels_per_group;
                let level = index % levels_per_group;
                SymbolLevel::new(group, level, slot.into_iter().collect())
            })
            .collect();

        if let Some(last) = levels.last() {
            *next_group = last.group() + 1;
        }
        self.staged.push((block.key, levels));
    }
}

impl MarkupHandler for SymbolsHandler<'_> {
    fn start_element(&mut self, name: &str, attributes: &Attributes, open: &[String]) -> Result<()> {
        grammar::validate(DocumentKind::Symbols, open, name)?;

        match name {
            "key" => self.start_key(attributes),
            "symbol" | "keysym" | "text" => self.start_symbol(name, attributes),
            _ => Ok(()),
        }
    }

    fn end_element(&mut self, name: &str, _open: &[String]) -> Result<()> {
        match name {
            "key" => self.end_key(),
            "symbol" | "keysym" | "text" => self.end_symbol(name),
            "invalid" => {
                if let Some(block) = self.block.as_mut() {
                    block.slots.push(None);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str, _open: &[String]) -> Result<()> {
        if self.symbol.is_some() {
            self.text.push_str(text);
        }
        Ok(())
    }
}

#[derive(Default)]
struct PrerequisitesHandler {
    includes: Vec<String>,
    text: Option<String>,
}

impl MarkupHandler for PrerequisitesHandler {
    fn start_element(&mut self, name: &str, _attributes: &Attributes, open: &[String]) -> Result<()> {
        grammar::validate(DocumentKind::Prerequisites, open, name)?;
        if name == "include" {
            self.text = Some(String::new());
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str, _open: &[String]) -> Result<()> {
        if name != "include" {
            return Ok(());
        }
        let text = self.text.take().unwrap_or_default();
        let include = text.trim();
        if include.is_empty() {
            return Err(ParseError::EmptyInclude);
        }
        self.includes.push(include.to_string());
        Ok(())
    }

    fn text(&mut self, text: &str, _open: &[String]) -> Result<()> {
        if let Some(buffer) = self.text.as_mut() {
            buffer.push_str(text);
        }
        Ok(())
    }
}
