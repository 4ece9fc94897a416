//! Plain-text rendering of catalogs and keyboards.

use std::io::{self, Write};

use keyloom::{
    descriptor::KeyboardDescriptor,
    key::Key,
    keyboard::KeyboardModel,
    symbol::{SymbolKind, SymbolLevel},
};

/// Writes one line per keyboard: id, display name, language, long name,
/// geometry and symbols.
pub fn write_catalog(out: &mut impl Write, keyboards: &[KeyboardDescriptor]) -> io::Result<()> {
    let width = keyboards
        .iter()
        .map(|keyboard| keyboard.id().len())
        .max()
        .unwrap_or(0);

    for keyboard in keyboards {
        writeln!(
            out,
            "{:width$}  {:24}  {:8}  {:16}  geometry={} symbols={}",
            keyboard.id(),
            keyboard.display_name().unwrap_or("-"),
            keyboard.language().unwrap_or("-"),
            keyboard.long_name().unwrap_or("-"),
            keyboard.geometry(),
            keyboard.symbols().unwrap_or("-"),
        )?;
    }
    Ok(())
}

/// Writes the sections, rows and keys of a keyboard.
///
/// Each key line shows the name, keycode, outline and the labels of every
/// level, with groups separated by `|`. Keys outside every section are
/// listed last.
pub fn write_keyboard(out: &mut impl Write, keyboard: &KeyboardModel) -> io::Result<()> {
    let descriptor = keyboard.descriptor();
    match descriptor.display_name() {
        Some(name) => writeln!(out, "Keyboard {} ({name})", descriptor.id())?,
        None => writeln!(out, "Keyboard {}", descriptor.id())?,
    }
    writeln!(
        out,
        "Geometry {}, symbols {}",
        descriptor.geometry(),
        descriptor.symbols().unwrap_or("-")
    )?;
    if let Some(bounds) = keyboard.bounds() {
        writeln!(
            out,
            "Bounds {} {} {}x{}",
            bounds.x(),
            bounds.y(),
            bounds.width(),
            bounds.height()
        )?;
    }
    writeln!(
        out,
        "Modifiers num-lock={} alt-gr={}",
        keyboard.num_lock_mask(),
        keyboard.alt_gr_mask()
    )?;

    let mut placed = vec![false; keyboard.keys().len()];
    for section in keyboard.sections() {
        writeln!(
            out,
            "Section {} (angle {})",
            section.name().unwrap_or("-"),
            section.angle()
        )?;
        for (index, row) in section.rows().iter().enumerate() {
            writeln!(out, "  Row {}", index + 1)?;
            for &id in row.keys() {
                if let Some(key) = keyboard.key(id) {
                    placed[id.index()] = true;
                    write_key(out, keyboard, key)?;
                }
            }
        }
    }

    let unplaced: Vec<&Key> = keyboard
        .keys()
        .iter()
        .zip(&placed)
        .filter(|(_, placed)| !**placed)
        .map(|(key, _)| key)
        .collect();
    if !unplaced.is_empty() {
        writeln!(out, "Unplaced")?;
        for key in unplaced {
            write_key(out, keyboard, key)?;
        }
    }
    Ok(())
}

fn write_key(out: &mut impl Write, keyboard: &KeyboardModel, key: &Key) -> io::Result<()> {
    let outline = keyboard.outlines().id(key.outline()).unwrap_or("?");
    let groups: Vec<String> = (0..key.groups())
        .map(|group| {
            key.levels_in(group)
                .map(level_label)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    writeln!(
        out,
        "    {:6} {:>4}  {:10} {}",
        key.name(),
        key.keycode(),
        outline,
        groups.join(" | ")
    )
}

fn level_label(level: &SymbolLevel) -> String {
    let Some(symbol) = level.symbols().first() else {
        return "-".to_string();
    };
    if let Some(label) = symbol.label() {
        return match label.trim() {
            "" => format!("{label:?}"),
            trimmed => trimmed.to_string(),
        };
    }
    match symbol.kind() {
        SymbolKind::Keyval { keyval, .. } => format!("{keyval:#06x}"),
        _ => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use keyloom::{
        geometry::Point,
        key::KeyId,
        outline::{Outline, OutlineTable},
        section::{Row, Section},
        symbol::Symbol,
    };

    use super::*;

    fn keyboard() -> KeyboardModel {
        let mut outlines = OutlineTable::new();
        let handle = outlines.intern("default", Outline::new(0.0, vec![Point::new(0.0, 0.0)]));
        let keys = vec![
            Key::new(
                "AC01",
                8,
                handle,
                vec![
                    SymbolLevel::new(0, 0, vec![Symbol::text("a")]),
                    SymbolLevel::new(0, 1, vec![Symbol::text("A")]),
                    SymbolLevel::new(1, 0, vec![Symbol::keyval(0xe4, None)]),
                    SymbolLevel::empty(1, 1),
                ],
            ),
            Key::new("SPCE", 9, handle, vec![SymbolLevel::new(0, 0, vec![Symbol::text(" ")])]),
        ];
        let sections = vec![
            Section::new()
                .with_name("letters")
                .with_rows(vec![Row::new(vec![KeyId::new(0)])]),
        ];
        KeyboardModel::new(
            KeyboardDescriptor::new("test", "compact").with_symbols("test"),
            None,
            sections,
            keys,
            outlines,
        )
    }

    #[test]
    fn test_write_keyboard() {
        let mut out = Vec::new();
        write_keyboard(&mut out, &keyboard()).expect("Writing to a Vec is infallible");
        let text = String::from_utf8(out).expect("Output is UTF-8");

        assert!(text.starts_with("Keyboard test\n"));
        assert!(text.contains("Section letters (angle 0)\n  Row 1\n"));
        assert!(text.contains("AC01"));
        assert!(text.contains("a A | 0x00e4 -"));
        assert!(text.contains("Unplaced\n"));
        assert!(text.contains("\" \""));
    }

    #[test]
    fn test_write_catalog() {
        let keyboards = vec![
            KeyboardDescriptor::new("us", "compact")
                .with_display_name("English (US)")
                .with_symbols("us")
                .with_language("en")
                .with_long_name("English"),
            KeyboardDescriptor::new("bare", "compact"),
        ];
        let mut out = Vec::new();
        write_catalog(&mut out, &keyboards).expect("Writing to a Vec is infallible");
        let text = String::from_utf8(out).expect("Output is UTF-8");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("us    English (US)"));
        assert!(lines[0].contains("  en        English  "));
        assert!(lines[1].ends_with("geometry=compact symbols=-"));
    }
}
