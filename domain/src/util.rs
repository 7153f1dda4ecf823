//! Shared utility functions.

/// Truncate a string to at most `max_chars` characters.
///
/// Counts Unicode scalar values, so accented text keeps its full length
/// budget and is never cut inside a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("canción", 6), "canció");
        assert_eq!(truncate_chars("canción", 7), "canción");
        assert_eq!(truncate_chars("año", 2), "añ");
    }

    #[test]
    fn truncate_chars_no_op_when_short() {
        assert_eq!(truncate_chars("hola", 200), "hola");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_str_multibyte_boundary() {
        let s = "ñandú"; // ñ is 2 bytes
        assert_eq!(truncate_str(s, 1), "");
        assert_eq!(truncate_str(s, 3), "ña");
    }
}
