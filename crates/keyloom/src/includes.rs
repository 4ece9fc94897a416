//! Following `include` elements between symbols documents.

use std::collections::HashSet;

use log::debug;

use keyloom_parser::{GeometryResult, parse_symbols, scan_includes};

use crate::{KeyloomError, resource::ResourceName};

/// Loads the symbols document `name` into `geometry`, prerequisites first.
///
/// Every document named by an `include` is applied, recursively, before the
/// document that includes it. `loaded` holds the names already visited for
/// the current keyboard; meeting one of them again fails the load, which
/// covers both include cycles and a document included twice.
pub(crate) fn load_symbols_with_prerequisites(
    root: &ResourceName,
    name: &str,
    geometry: &mut GeometryResult,
    loaded: &mut HashSet<String>,
) -> Result<(), KeyloomError> {
    load(root, name, geometry, loaded, 0)
}

fn load(
    root: &ResourceName,
    name: &str,
    geometry: &mut GeometryResult,
    loaded: &mut HashSet<String>,
    depth: usize,
) -> Result<(), KeyloomError> {
    if !loaded.insert(name.to_string()) {
        return Err(KeyloomError::CyclicOrDuplicateInclude(name.to_string()));
    }

    let resource = root.symbols(name);
    let includes = resource.read_with(scan_includes)?;
    debug!(symbols = name, depth, includes = includes.len(); "Loading symbols");

    for include in &includes {
        load(root, include, geometry, loaded, depth + 1)?;
    }

    resource.read_with(|reader| parse_symbols(reader, geometry))?;
    debug!(symbols = name, depth; "Symbols applied");
    Ok(())
}
