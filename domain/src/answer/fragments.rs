//! Cutting a completion into replay fragments.

/// Split `text` on the space character, suffixing each piece with one space.
///
/// Runs of spaces produce lone `" "` fragments so that concatenating the
/// result reproduces the text plus a single trailing space. Newlines and tabs
/// stay inside their fragment.
///
/// Empty text is the one departure from a bare `split(' ')`, which would
/// yield a single `" "` fragment: here it yields none, so nothing blank is
/// appended or spoken.
pub fn split_fragments(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ').map(|piece| format!("{piece} ")).collect()
}
