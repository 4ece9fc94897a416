//! Sections group keys into rows.

use crate::{geometry::Bounds, key::KeyId};

/// One row of a section, holding keys in layout order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    keys: Vec<KeyId>,
}

impl Row {
    pub fn new(keys: Vec<KeyId>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[KeyId] {
        &self.keys
    }

    pub fn push(&mut self, key: KeyId) {
        self.keys.push(key);
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A named, optionally rotated group of key rows.
///
/// # Examples
///
/// ```
/// use keyloom_core::{key::KeyId, section::{Row, Section}};
///
/// let section = Section::new()
///     .with_name("top")
///     .with_angle(-10)
///     .with_rows(vec![Row::new(vec![KeyId::new(0), KeyId::new(1)])]);
///
/// assert_eq!(section.name(), Some("top"));
/// assert_eq!(section.keys().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    name: Option<String>,
    angle: i32,
    bounds: Option<Bounds>,
    rows: Vec<Row>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the rotation angle, as written in the geometry document.
    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over every key of the section, row by row.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.rows.iter().flat_map(|row| row.keys().iter().copied())
    }
}
