//! Entity and character reference expansion.

use std::borrow::Cow;

/// Expands the predefined entities and numeric character references in `raw`.
///
/// Returns the input unchanged when it contains no `&`.
///
/// # Errors
///
/// Returns a message describing the first unknown, malformed or
/// unterminated reference.
pub(crate) fn unescape(raw: &str) -> Result<Cow<'_, str>, String> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            return Err("unterminated entity reference".to_string());
        };
        let name = &after[..semi];
        out.push(resolve(name)?);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn resolve(name: &str) -> Result<char, String> {
    match name {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                return Err(format!("unknown entity `&{name};`"));
            };
            code.and_then(char::from_u32)
                .ok_or_else(|| format!("invalid character reference `&{name};`"))
        }
    }
}
