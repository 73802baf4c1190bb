//! Line ending normalization for free-text fields

/// Normalize line endings in a string to LF (\n)
pub fn normalize_string_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalize a day log note
///
/// Line endings become LF and a note made only of whitespace becomes empty,
/// so blank notes never keep a record alive.
pub fn normalize_note(note: &str) -> String {
    if note.trim().is_empty() {
        String::new()
    } else {
        normalize_string_line_endings(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_string_line_endings() {
        assert_eq!(normalize_string_line_endings("a\r\nb"), "a\nb");
        assert_eq!(normalize_string_line_endings("a\rb"), "a\nb");
        assert_eq!(
            normalize_string_line_endings("l1\r\nl2\rl3\nl4"),
            "l1\nl2\nl3\nl4"
        );
    }

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note(" \r\n\t"), "");
        assert_eq!(normalize_note("slept\r\nwell"), "slept\nwell");
    }
}
