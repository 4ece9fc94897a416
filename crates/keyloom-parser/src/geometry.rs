//! Geometry documents: sections, buttons and outlines.
//!
//! ```xml
//! <geometry>
//!   <bounds x="0" y="0" width="410" height="229"/>
//!   <section id="top" angle="0">
//!     q w e r t y
//!     a s d f g h
//!     <button name="space" oref="space"/>
//!   </section>
//!   <button name="q" keycode="24"/>
//!   <outline id="default" corner-radius="2">
//!     <point x="0" y="0"/><point x="37" y="52"/>
//!   </outline>
//! </geometry>
//! ```
//!
//! Keys are created on their first mention, by section text or by a
//! `button`, and draw their keycode from one counter shared by the whole
//! document, starting at [`FIRST_KEYCODE`]. Later mentions never create a
//! second key with the same name; a `button` only overrides the outline
//! reference and keycode. Outline references stay unresolved names until the
//! keyboard is assembled.

use std::{
    collections::{HashMap, hash_map::Entry},
    io::Read,
};

use indexmap::IndexMap;
use log::{debug, warn};

use keyloom_core::{
    geometry::{Bounds, Point},
    key::KeyId,
    outline::Outline,
    section::{Row, Section},
    symbol::SymbolLevel,
};

use crate::{
    attributes::Attributes,
    error::{ParseError, Result},
    grammar::{self, DocumentKind},
    markup::{self, MarkupHandler},
};

/// The first automatically assigned keycode.
pub const FIRST_KEYCODE: u32 = 8;

/// The outline used by keys that do not name one.
pub const DEFAULT_OUTLINE: &str = "default";

/// A key as read from a geometry document, before its outline is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDraft {
    name: String,
    keycode: u32,
    oref: String,
    levels: Vec<SymbolLevel>,
    placed: bool,
}

impl KeyDraft {
    fn new(name: &str, keycode: u32) -> Self {
        Self {
            name: name.to_string(),
            keycode,
            oref: DEFAULT_OUTLINE.to_string(),
            levels: Vec::new(),
            placed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keycode(&self) -> u32 {
        self.keycode
    }

    /// Returns the id of the outline this key refers to.
    pub fn oref(&self) -> &str {
        &self.oref
    }

    /// Returns the symbol levels bound so far.
    pub fn levels(&self) -> &[SymbolLevel] {
        &self.levels
    }

    /// Returns the number of groups bound so far.
    pub fn groups(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.group() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns true if some section lists this key.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub(crate) fn extend_levels(&mut self, levels: Vec<SymbolLevel>) {
        self.levels.extend(levels);
    }

    /// Takes the draft apart into name, keycode, outline reference and levels.
    pub fn into_parts(self) -> (String, u32, String, Vec<SymbolLevel>) {
        (self.name, self.keycode, self.oref, self.levels)
    }
}

/// Everything a geometry document defines.
///
/// Keys live in one arena indexed by [`KeyId`]; sections refer to them by id
/// and a name index maps key names to ids.
#[derive(Debug, Clone, Default)]
pub struct GeometryResult {
    bounds: Option<Bounds>,
    sections: Vec<Section>,
    keys: Vec<KeyDraft>,
    names: HashMap<String, KeyId>,
    outlines: IndexMap<String, Outline>,
}

/// The owned parts of a [`GeometryResult`].
#[derive(Debug)]
pub struct GeometryParts {
    pub bounds: Option<Bounds>,
    pub sections: Vec<Section>,
    pub keys: Vec<KeyDraft>,
    pub outlines: IndexMap<String, Outline>,
}

impl GeometryResult {
    /// Returns the keyboard bounds, if the document sets them.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Returns the sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns every key in creation order.
    pub fn keys(&self) -> &[KeyDraft] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&KeyDraft> {
        self.keys.get(id.index())
    }

    pub(crate) fn key_mut(&mut self, id: KeyId) -> Option<&mut KeyDraft> {
        self.keys.get_mut(id.index())
    }

    /// Looks up a key by name.
    pub fn find_key(&self, name: &str) -> Option<KeyId> {
        self.names.get(name).copied()
    }

    /// Returns the outlines by id, in definition order.
    pub fn outlines(&self) -> &IndexMap<String, Outline> {
        &self.outlines
    }

    /// Returns `(key, oref)` for every key whose outline is not defined.
    pub fn unresolved_outline_refs(&self) -> Vec<(&str, &str)> {
        self.keys
            .iter()
            .filter(|key| !self.outlines.contains_key(key.oref()))
            .map(|key| (key.name(), key.oref()))
            .collect()
    }

    pub fn into_parts(self) -> GeometryParts {
        GeometryParts {
            bounds: self.bounds,
            sections: self.sections,
            keys: self.keys,
            outlines: self.outlines,
        }
    }
}

/// Parses a geometry document.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup, disallowed nesting,
/// missing or invalid attributes, or keycodes that collide.
pub fn parse_geometry<R: Read>(reader: R) -> Result<GeometryResult> {
    let mut handler = GeometryHandler::new();
    markup::parse_reader(reader, &mut handler)?;
    handler.finish()
}

struct SectionDraft {
    section: Section,
    rows: Vec<Row>,
    row: Row,
    text: String,
}

impl SectionDraft {
    fn end_row(&mut self) {
        if !self.row.is_empty() {
            self.rows.push(std::mem::take(&mut self.row));
        }
    }
}

struct OutlineDraft {
    id: String,
    corner_radius: f64,
    points: Vec<Point>,
}

struct GeometryHandler {
    result: GeometryResult,
    next_keycode: u32,
    section: Option<SectionDraft>,
    outline: Option<OutlineDraft>,
}

impl GeometryHandler {
    fn new() -> Self {
        Self {
            result: GeometryResult::default(),
            next_keycode: FIRST_KEYCODE,
            section: None,
            outline: None,
        }
    }

    /// Returns the key named `name`, creating it on first mention.
    fn introduce(&mut self, name: &str) -> KeyId {
        if let Some(id) = self.result.find_key(name) {
            return id;
        }

        let id = KeyId::new(self.result.keys.len());
        self.result.keys.push(KeyDraft::new(name, self.next_keycode));
        self.result.names.insert(name.to_string(), id);
        self.next_keycode += 1;
        id
    }

    /// Appends a key to the current row of the open section, unless another
    /// section already holds it.
    fn place(&mut self, id: KeyId) {
        let Some(draft) = self.section.as_mut() else {
            return;
        };
        let key = &mut self.result.keys[id.index()];
        if key.placed {
            warn!(key = key.name.as_str(); "Key is already placed in a section, skipping");
            return;
        }
        key.placed = true;
        draft.row.push(id);
    }

    /// Turns buffered section text into keys: lines are rows and whitespace
    /// separates key names.
    fn flush_section_text(&mut self) {
        let Some(text) = self.section.as_mut().map(|draft| std::mem::take(&mut draft.text)) else {
            return;
        };

        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                if let Some(draft) = self.section.as_mut() {
                    draft.end_row();
                }
            }
            for name in line.split_whitespace() {
                let id = self.introduce(name);
                self.place(id);
            }
        }
    }

    fn start_bounds(&mut self, attributes: &Attributes, open: &[String]) -> Result<()> {
        let element = "bounds";
        let bounds = Bounds::new(
            attributes.parse_required(element, "x")?,
            attributes.parse_required(element, "y")?,
            attributes.parse_required(element, "width")?,
            attributes.parse_required(element, "height")?,
        );

        match (open.last().map(String::as_str), self.section.as_mut()) {
            (Some("section"), Some(draft)) => {
                draft.section = std::mem::take(&mut draft.section).with_bounds(bounds);
            }
            _ => self.result.bounds = Some(bounds),
        }
        Ok(())
    }

    fn start_section(&mut self, attributes: &Attributes) -> Result<()> {
        let mut section = Section::new();
        if let Some(name) = attributes.get("id") {
            section = section.with_name(name);
        }
        if let Some(angle) = attributes.parse::<i32>("section", "angle")? {
            section = section.with_angle(angle);
        }

        self.section = Some(SectionDraft {
            section,
            rows: Vec::new(),
            row: Row::default(),
            text: String::new(),
        });
        Ok(())
    }

    fn start_button(&mut self, attributes: &Attributes, open: &[String]) -> Result<()> {
        let element = "button";
        let name = attributes.required(element, "name")?;
        let keycode = attributes.parse::<u32>(element, "keycode")?;
        if let Some(keycode) = keycode.filter(|&keycode| keycode < FIRST_KEYCODE) {
            return Err(ParseError::InvalidAttribute {
                element: element.to_string(),
                attribute: "keycode".to_string(),
                value: keycode.to_string(),
            });
        }

        let id = self.introduce(name);
        let key = &mut self.result.keys[id.index()];
        if let Some(oref) = attributes.get("oref") {
            key.oref = oref.to_string();
        }
        if let Some(keycode) = keycode {
            key.keycode = keycode;
        }

        if open.last().map(String::as_str) == Some("section") && !key.placed {
            self.place(id);
        }
        Ok(())
    }

    fn start_outline(&mut self, attributes: &Attributes) -> Result<()> {
        let element = "outline";
        let id = attributes.required(element, "id")?;
        let corner_radius = attributes
            .parse::<f64>(element, "corner-radius")?
            .unwrap_or(0.0);

        self.outline = Some(OutlineDraft {
            id: id.to_string(),
            corner_radius,
            points: Vec::new(),
        });
        Ok(())
    }

    fn start_point(&mut self, attributes: &Attributes) -> Result<()> {
        let element = "point";
        let point = Point::new(
            attributes.parse_required(element, "x")?,
            attributes.parse_required(element, "y")?,
        );
        if let Some(outline) = self.outline.as_mut() {
            outline.points.push(point);
        }
        Ok(())
    }

    fn end_section(&mut self) {
        self.flush_section_text();
        if let Some(mut draft) = self.section.take() {
            draft.end_row();
            self.result.sections.push(draft.section.with_rows(draft.rows));
        }
    }

    fn end_outline(&mut self) {
        let Some(draft) = self.outline.take() else {
            return;
        };
        let outline = Outline::new(draft.corner_radius, draft.points);
        if self.result.outlines.insert(draft.id.clone(), outline).is_some() {
            warn!(outline = draft.id.as_str(); "Outline redefined, replacing the earlier one");
        }
    }

    /// Checks document-wide invariants once every element has been read.
    fn finish(self) -> Result<GeometryResult> {
        let result = self.result;

        let mut keycodes: HashMap<u32, &str> = HashMap::new();
        for key in &result.keys {
            match keycodes.entry(key.keycode) {
                Entry::Occupied(other) => {
                    return Err(ParseError::DuplicateKeycode {
                        keycode: key.keycode,
                        key: key.name.clone(),
                        other: other.get().to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(&key.name);
                }
            }
        }

        for key in result.keys.iter().filter(|key| !key.placed) {
            warn!(key = key.name.as_str(); "Key is not placed in any section");
        }
        for (key, oref) in result.unresolved_outline_refs() {
            debug!(key, oref; "Outline reference not defined in this document");
        }
        debug!(
            sections = result.sections.len(),
            keys = result.keys.len(),
            outlines = result.outlines.len();
            "Geometry parsed"
        );

        Ok(result)
    }
}

impl MarkupHandler for GeometryHandler {
    fn start_element(&mut self, name: &str, attributes: &Attributes, open: &[String]) -> Result<()> {
        grammar::validate(DocumentKind::Geometry, open, name)?;
        if open.last().map(String::as_str) == Some("section") {
            self.flush_section_text();
        }

        match name {
            "bounds" => self.start_bounds(attributes, open),
            "section" => self.start_section(attributes),
            "button" => self.start_button(attributes, open),
            "outline" => self.start_outline(attributes),
            "point" => self.start_point(attributes),
            _ => Ok(()),
        }
    }

    fn end_element(&mut self, name: &str, _open: &[String]) -> Result<()> {
        match name {
            "section" => self.end_section(),
            "outline" => self.end_outline(),
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str, open: &[String]) -> Result<()> {
        if open.last().map(String::as_str) != Some("section") {
            return Ok(());
        }
        if let Some(draft) = self.section.as_mut() {
            draft.text.push_str(text);
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// One entry of a generated section: a legacy text name or a button.
    #[derive(Debug, Clone)]
    enum Mention {
        Text(usize),
        Button(usize),
        Newline,
    }

    fn mention_strategy() -> impl Strategy<Value = Mention> {
        prop_oneof![
            (0usize..24).prop_map(Mention::Text),
            (0usize..24).prop_map(Mention::Button),
            Just(Mention::Newline),
        ]
    }

    fn render(sections: &[Vec<Mention>]) -> String {
        let mut source = String::from("<geometry>\n");
        for section in sections {
            source.push_str("<section>");
            for mention in section {
                match mention {
                    Mention::Text(n) => source.push_str(&format!(" k{n} ")),
                    Mention::Button(n) => source.push_str(&format!("<button name=\"k{n}\"/>")),
                    Mention::Newline => source.push('\n'),
                }
            }
            source.push_str("</section>\n");
        }
        source.push_str("</geometry>\n");
        source
    }

    /// Every created key gets a distinct keycode of at least 8, and every
    /// mentioned name maps to exactly one key.
    fn check_auto_keycodes_unique(sections: Vec<Vec<Mention>>) -> std::result::Result<(), TestCaseError> {
        let result = parse_geometry(render(&sections).as_bytes()).unwrap();

        let keycodes: HashSet<_> = result.keys().iter().map(|key| key.keycode()).collect();
        prop_assert_eq!(keycodes.len(), result.keys().len());
        prop_assert!(keycodes.iter().all(|&keycode| keycode >= FIRST_KEYCODE));

        let mentioned: HashSet<_> = sections
            .iter()
            .flatten()
            .filter_map(|mention| match mention {
                Mention::Text(n) | Mention::Button(n) => Some(format!("k{n}")),
                Mention::Newline => None,
            })
            .collect();
        prop_assert_eq!(mentioned.len(), result.keys().len());

        let placed: usize = result.sections().iter().map(|s| s.keys().count()).sum();
        prop_assert_eq!(placed, result.keys().len());
        Ok(())
    }

    proptest! {
        #[test]
        fn auto_keycodes_unique(
            sections in prop::collection::vec(prop::collection::vec(mention_strategy(), 0..12), 1..5)
        ) {
            check_auto_keycodes_unique(sections)?;
        }
    }
}
