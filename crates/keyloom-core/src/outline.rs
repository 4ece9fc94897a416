//! Key outlines and the table that interns them.
//!
//! Many keys share one silhouette, so an assembled keyboard stores every
//! [`Outline`] once in an [`OutlineTable`] and keys refer to it through a
//! dense [`OutlineHandle`].
//!
//! # Example
//!
//! ```
//! use keyloom_core::{geometry::Point, outline::{Outline, OutlineTable}};
//!
//! let mut table = OutlineTable::new();
//! let handle = table.intern("default", Outline::new(3.0, vec![Point::new(0.0, 0.0)]));
//!
//! assert_eq!(table.handle("default"), Some(handle));
//! assert_eq!(table.id(handle), Some("default"));
//! ```

use std::{collections::HashMap, fmt};

use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::geometry::{Bounds, Point};

/// A rounded polygon used as the silhouette of one or more keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    corner_radius: f64,
    points: Vec<Point>,
}

impl Outline {
    /// Creates a new outline.
    ///
    /// # Arguments
    ///
    /// * `corner_radius` - Radius applied to every corner when drawing.
    /// * `points` - Polygon points in the order they were declared.
    pub fn new(corner_radius: f64, points: Vec<Point>) -> Self {
        Self {
            corner_radius,
            points,
        }
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the rectangle enclosing all points, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(&self.points)
    }
}

/// Dense index of an outline inside an [`OutlineTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutlineHandle(usize);

impl OutlineHandle {
    /// Returns the position of the outline in its table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interning table mapping outline ids to dense handles.
///
/// Handles are assigned in first-insertion order starting at zero and are
/// never reused. Re-interning an id that is already present replaces the
/// outline but keeps the original handle.
pub struct OutlineTable {
    ids: DefaultStringInterner,
    entries: Vec<(DefaultSymbol, Outline)>,
    by_id: HashMap<DefaultSymbol, OutlineHandle>,
}

impl OutlineTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            ids: DefaultStringInterner::new(),
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Stores `outline` under `id` and returns its handle.
    pub fn intern(&mut self, id: &str, outline: Outline) -> OutlineHandle {
        let symbol = self.ids.get_or_intern(id);
        if let Some(&handle) = self.by_id.get(&symbol) {
            self.entries[handle.0].1 = outline;
            return handle;
        }

        let handle = OutlineHandle(self.entries.len());
        self.entries.push((symbol, outline));
        self.by_id.insert(symbol, handle);
        handle
    }

    /// Looks up the handle interned for `id`.
    pub fn handle(&self, id: &str) -> Option<OutlineHandle> {
        let symbol = self.ids.get(id)?;
        self.by_id.get(&symbol).copied()
    }

    /// Returns the outline behind `handle`.
    pub fn get(&self, handle: OutlineHandle) -> Option<&Outline> {
        self.entries.get(handle.0).map(|(_, outline)| outline)
    }

    /// Returns the id `handle` was interned under.
    pub fn id(&self, handle: OutlineHandle) -> Option<&str> {
        let (symbol, _) = self.entries.get(handle.0)?;
        self.ids.resolve(*symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(handle, id, outline)` in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (OutlineHandle, &str, &Outline)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, (symbol, outline))| {
                let id = self.ids.resolve(*symbol)?;
                Some((OutlineHandle(index), id, outline))
            })
    }
}

impl Default for OutlineTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OutlineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(_, id, outline)| (id, outline)))
            .finish()
    }
}
