//! Append-only answer buffer.

/// The answer accumulated so far for one question.
///
/// A new buffer is empty; the only mutation is [`append`](Self::append).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    text: String,
}

impl AnswerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Empty fragments are ignored.
    pub fn append(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.push_str(fragment);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for AnswerBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buffer = AnswerBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn append_only_grows() {
        let mut buffer = AnswerBuffer::new();
        let mut previous = String::new();
        for fragment in ["La ", "UMSNH ", "", "fue ", "fundada "] {
            buffer.append(fragment);
            assert!(buffer.as_str().starts_with(&previous));
            assert!(buffer.len() >= previous.len());
            previous = buffer.as_str().to_string();
        }
        assert_eq!(buffer.as_str(), "La UMSNH fue fundada ");
    }
}
