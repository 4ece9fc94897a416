//! Keys of an assembled keyboard.

use crate::{
    outline::OutlineHandle,
    symbol::{Symbol, SymbolLevel},
};

/// Index of a key in its keyboard's key arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(usize);

impl KeyId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A single key: its identity, outline and symbol matrix.
///
/// Everything except the `pressed` and `locked` flags is fixed once the
/// keyboard is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    name: String,
    keycode: u32,
    outline: OutlineHandle,
    levels: Vec<SymbolLevel>,
    pressed: bool,
    locked: bool,
}

impl Key {
    /// Creates a new released, unlocked key.
    ///
    /// # Arguments
    ///
    /// * `name` - Name shared by the geometry and symbols documents.
    /// * `keycode` - Keycode unique within the keyboard.
    /// * `outline` - Handle into the keyboard's outline table.
    /// * `levels` - Symbol matrix, group-major then level-minor.
    pub fn new(
        name: impl Into<String>,
        keycode: u32,
        outline: OutlineHandle,
        levels: Vec<SymbolLevel>,
    ) -> Self {
        Self {
            name: name.into(),
            keycode,
            outline,
            levels,
            pressed: false,
            locked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keycode(&self) -> u32 {
        self.keycode
    }

    pub fn outline(&self) -> OutlineHandle {
        self.outline
    }

    pub fn levels(&self) -> &[SymbolLevel] {
        &self.levels
    }

    /// Returns the number of groups in the symbol matrix.
    pub fn groups(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.group() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the levels of one group in declaration order.
    pub fn levels_in(&self, group: usize) -> impl Iterator<Item = &SymbolLevel> {
        self.levels
            .iter()
            .filter(move |level| level.group() == group)
    }

    /// Returns the first symbol bound at `(group, level)`.
    pub fn symbol_at(&self, group: usize, level: usize) -> Option<&Symbol> {
        self.levels
            .iter()
            .find(|entry| entry.group() == group && entry.level() == level)
            .and_then(|entry| entry.symbols().first())
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}
