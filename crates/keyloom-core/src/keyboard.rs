//! The assembled keyboard model.
//!
//! A [`KeyboardModel`] owns every key of one keyboard in an arena addressed by
//! [`KeyId`], the sections referencing those keys in document order, and the
//! interned outlines the keys point at. Only the per-key `pressed` and
//! `locked` flags may change after assembly.

use std::{collections::HashMap, fmt};

use crate::{
    descriptor::KeyboardDescriptor,
    geometry::Bounds,
    key::{Key, KeyId},
    outline::{Outline, OutlineTable},
    section::Section,
};

/// A modifier bit mask in the X11 modifier numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierMask(u32);

impl ModifierMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const LOCK: Self = Self(1 << 1);
    pub const CONTROL: Self = Self(1 << 2);
    pub const MOD1: Self = Self(1 << 3);
    pub const MOD2: Self = Self(1 << 4);
    pub const MOD3: Self = Self(1 << 5);
    pub const MOD4: Self = Self(1 << 6);
    pub const MOD5: Self = Self(1 << 7);
    pub const BUTTON1: Self = Self(1 << 8);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Display for ModifierMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Num-lock modifier assigned to every assembled keyboard.
pub const DEFAULT_NUM_LOCK_MASK: ModifierMask = ModifierMask::MOD2;

/// Alt-gr modifier assigned to every assembled keyboard.
pub const DEFAULT_ALT_GR_MASK: ModifierMask = ModifierMask::BUTTON1;

/// A fully linked keyboard.
#[derive(Debug)]
pub struct KeyboardModel {
    descriptor: KeyboardDescriptor,
    bounds: Option<Bounds>,
    sections: Vec<Section>,
    keys: Vec<Key>,
    names: HashMap<String, KeyId>,
    outlines: OutlineTable,
    num_lock_mask: ModifierMask,
    alt_gr_mask: ModifierMask,
}

impl KeyboardModel {
    /// Creates a keyboard model from already linked parts.
    ///
    /// Every [`KeyId`] in `sections` must index into `keys` and every key's
    /// outline handle must come from `outlines`. The modifier masks are set
    /// to [`DEFAULT_NUM_LOCK_MASK`] and [`DEFAULT_ALT_GR_MASK`].
    pub fn new(
        descriptor: KeyboardDescriptor,
        bounds: Option<Bounds>,
        sections: Vec<Section>,
        keys: Vec<Key>,
        outlines: OutlineTable,
    ) -> Self {
        let names = keys
            .iter()
            .enumerate()
            .map(|(index, key)| (key.name().to_string(), KeyId::new(index)))
            .collect();

        Self {
            descriptor,
            bounds,
            sections,
            keys,
            names,
            outlines,
            num_lock_mask: DEFAULT_NUM_LOCK_MASK,
            alt_gr_mask: DEFAULT_ALT_GR_MASK,
        }
    }

    pub fn descriptor(&self) -> &KeyboardDescriptor {
        &self.descriptor
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Returns the sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns every key, including keys that no section places.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.index())
    }

    /// Looks up a key by name.
    pub fn find_key(&self, name: &str) -> Option<KeyId> {
        self.names.get(name).copied()
    }

    /// Iterates over the keys of `section` in row order.
    pub fn keys_in<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Key> + 'a {
        section.keys().filter_map(|id| self.key(id))
    }

    pub fn outlines(&self) -> &OutlineTable {
        &self.outlines
    }

    /// Returns the outline of a key.
    pub fn outline_of(&self, id: KeyId) -> Option<&Outline> {
        let key = self.key(id)?;
        self.outlines.get(key.outline())
    }

    pub fn num_lock_mask(&self) -> ModifierMask {
        self.num_lock_mask
    }

    pub fn alt_gr_mask(&self) -> ModifierMask {
        self.alt_gr_mask
    }

    /// Sets the runtime pressed flag of a key. Returns false for an unknown id.
    pub fn set_pressed(&mut self, id: KeyId, pressed: bool) -> bool {
        match self.keys.get_mut(id.index()) {
            Some(key) => {
                key.set_pressed(pressed);
                true
            }
            None => false,
        }
    }

    /// Sets the runtime locked flag of a key. Returns false for an unknown id.
    pub fn set_locked(&mut self, id: KeyId, locked: bool) -> bool {
        match self.keys.get_mut(id.index()) {
            Some(key) => {
                key.set_locked(locked);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        geometry::Point,
        section::Row,
        symbol::{Symbol, SymbolLevel},
    };

    use super::*;

    fn sample_model() -> KeyboardModel {
        let mut outlines = OutlineTable::new();
        let default = outlines.intern(
            "default",
            Outline::new(3.0, vec![Point::new(0.0, 0.0), Point::new(37.0, 52.0)]),
        );
        let wide = outlines.intern("wide", Outline::new(1.0, vec![Point::new(0.0, 0.0)]));

        let keys = vec![
            Key::new(
                "AC01",
                8,
                default,
                vec![SymbolLevel::new(0, 0, vec![Symbol::text("a")])],
            ),
            Key::new("AC02", 9, default, Vec::new()),
            Key::new("SPCE", 10, wide, Vec::new()),
        ];
        let sections = vec![
            Section::new()
                .with_name("letters")
                .with_rows(vec![Row::new(vec![KeyId::new(0), KeyId::new(1)])]),
            Section::new().with_rows(vec![Row::new(vec![KeyId::new(2)])]),
        ];

        KeyboardModel::new(
            KeyboardDescriptor::new("us", "compact").with_symbols("us"),
            Some(Bounds::new(0.0, 0.0, 410.0, 229.0)),
            sections,
            keys,
            outlines,
        )
    }

    #[test]
    fn test_default_modifier_masks() {
        let model = sample_model();
        assert_eq!(model.num_lock_mask().bits(), 1 << 4);
        assert_eq!(model.alt_gr_mask().bits(), 1 << 8);
        assert!(model.num_lock_mask().contains(ModifierMask::MOD2));
        assert!(!model.alt_gr_mask().contains(ModifierMask::MOD2));
    }

    #[test]
    fn test_find_key_and_outline() {
        let model = sample_model();
        let id = model.find_key("SPCE").unwrap();
        assert_eq!(model.key(id).unwrap().keycode(), 10);
        assert_approx_eq!(f64, model.outline_of(id).unwrap().corner_radius(), 1.0);
        assert!(model.find_key("AB01").is_none());
    }

    #[test]
    fn test_keys_in_section_order() {
        let model = sample_model();
        let names: Vec<_> = model
            .keys_in(&model.sections()[0])
            .map(|key| key.name())
            .collect();
        assert_eq!(names, vec!["AC01", "AC02"]);
    }

    #[test]
    fn test_runtime_flags() {
        let mut model = sample_model();
        let id = model.find_key("AC02").unwrap();

        assert!(model.set_pressed(id, true));
        assert!(model.set_locked(id, true));
        assert!(model.key(id).unwrap().is_pressed());
        assert!(model.key(id).unwrap().is_locked());

        assert!(!model.set_pressed(KeyId::new(99), true));
    }

    #[test]
    fn test_modifier_mask_display() {
        assert_eq!(ModifierMask::BUTTON1.to_string(), "0x0100");
    }
}
