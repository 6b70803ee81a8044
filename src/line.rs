//! Splits a raw line of configuration text into a key/value pair.

/// Extract a `(key, value)` pair from one line of configuration text.
///
/// The line is truncated at the first `#` (there is no escaping, so a `#`
/// inside a value always starts a comment), then split on the first `=`.
/// Every space character is removed from both halves, embedded ones included,
/// so `k e y = v a l` yields `("key", "val")`.
///
/// Returns `None` for lines without an `=` and for lines where either half is
/// empty after stripping. Such lines are skipped by the loader, never
/// reported as errors.
pub(crate) fn parse_line(raw: &str) -> Option<(String, String)> {
    let payload = match raw.find('#') {
        Some(hash) => &raw[..hash],
        None => raw,
    };

    let equal = payload.find('=')?;
    let key = strip_spaces(&payload[..equal]);
    let value = strip_spaces(&payload[equal + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove every space character, not just leading and trailing ones.
fn strip_spaces(part: &str) -> String {
    part.chars().filter(|c| *c != ' ').collect()
}
