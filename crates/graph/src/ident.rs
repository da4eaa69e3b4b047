//! Task name sanitization.

/// Map an arbitrary task name to a valid DOT node identifier.
///
/// Letters and digits pass through with case preserved; every run of other
/// characters collapses to a single `_`, emitted only between two kept
/// characters. The result never starts or ends with a separator and never
/// contains two in a row, so it is always usable as a bare identifier.
/// Sanitizing an already-sanitized name is a no-op.
///
/// Distinct names can map to the same identifier (`"a:b"` and `"a b"` both
/// become `"a_b"`); the node builder resolves such collisions by keeping the
/// later task.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            id.push(c);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_examples() {
        let cases = [
            ("name", "name"),
            ("first second", "first_second"),
            ("first:second", "first_second"),
            ("first:second:third", "first_second_third"),
            (":name", "name"),
            ("name:", "name"),
            ("", ""),
            (":::", ""),
            ("a--b", "a_b"),
            ("MixedCase:Name", "MixedCase_Name"),
        ];

        for (name, expected) in cases {
            assert_eq!(sanitize(name), expected, "sanitize({name:?})");
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["build:all", "  spaced  ", "x", "a:b c-d"] {
            let once = sanitize(name);
            assert_eq!(sanitize(&once), once);
        }
    }
}
