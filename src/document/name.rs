//! Node-name micro-format
//!
//! Design nodes may carry extra tags in their display name after an `@`:
//! `"List@multiItems, Spacer"` has the display name `"List"` and the tags
//! `["multiitems", "spacer"]`.

/// Separates the display name from the tag list
pub const PARAMETER_DELIMITER: char = '@';

/// The part of a node name before the parameter delimiter
pub fn simple_name(name: &str) -> &str {
    match name.split_once(PARAMETER_DELIMITER) {
        Some((simple, _)) => simple,
        None => name,
    }
}

/// Lowercased, trimmed tags after the parameter delimiter
///
/// Anything after a second delimiter is ignored, and empty entries are
/// dropped, so a malformed tag list degrades to fewer (or no) tags.
pub fn parameters(name: &str) -> Vec<String> {
    let Some((_, rest)) = name.split_once(PARAMETER_DELIMITER) else {
        return Vec::new();
    };
    let rest = rest.split(PARAMETER_DELIMITER).next().unwrap_or_default();

    rest.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
