//! Linking a parsed geometry into a [`KeyboardModel`].

use log::{debug, warn};

use keyloom_core::{
    descriptor::KeyboardDescriptor,
    key::Key,
    keyboard::KeyboardModel,
    outline::OutlineTable,
};
use keyloom_parser::GeometryResult;

use crate::KeyloomError;

/// Interns the outlines of `geometry` and resolves every key's outline
/// reference against them.
///
/// # Errors
///
/// Returns [`KeyloomError::DanglingOutlineRef`] for the first key, in
/// keycode assignment order, whose outline is not defined.
pub(crate) fn assemble(
    descriptor: KeyboardDescriptor,
    geometry: GeometryResult,
) -> Result<KeyboardModel, KeyloomError> {
    let parts = geometry.into_parts();

    let mut outlines = OutlineTable::new();
    for (id, outline) in parts.outlines {
        outlines.intern(&id, outline);
    }

    let keys = parts
        .keys
        .into_iter()
        .map(|draft| {
            let (name, keycode, oref, levels) = draft.into_parts();
            let outline = outlines
                .handle(&oref)
                .ok_or_else(|| KeyloomError::DanglingOutlineRef {
                    key: name.clone(),
                    oref,
                })?;
            if levels.is_empty() {
                warn!(key = name.as_str(); "Key has no symbols");
            }
            Ok(Key::new(name, keycode, outline, levels))
        })
        .collect::<Result<Vec<_>, KeyloomError>>()?;

    let model = KeyboardModel::new(descriptor, parts.bounds, parts.sections, keys, outlines);
    debug!(
        keyboard = model.descriptor().id(),
        keys = model.keys().len(),
        outlines = model.outlines().len();
        "Keyboard assembled"
    );
    Ok(model)
}
