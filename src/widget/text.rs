//! Multi-line text buffer

/// Text widget content
///
/// The buffer always ends with one structural newline, the way a text widget
/// does; [`TextBuffer::get`] leaves it off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            content: "\n".to_string(),
        }
    }

    /// Replace the whole content
    pub fn set(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.content.push('\n');
    }

    /// Append at the end, before the structural newline
    pub fn append(&mut self, text: &str) {
        let end = self.content.len() - 1;
        self.content.insert_str(end, text);
    }

    pub fn clear(&mut self) {
        self.set("");
    }

    /// Content without the structural newline
    pub fn get(&self) -> &str {
        self.content.strip_suffix('\n').unwrap_or(&self.content)
    }

    /// Raw content including the structural newline
    pub fn raw(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.get().split('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.get(), "");
        assert_eq!(buffer.raw(), "\n");
    }

    #[test]
    fn test_only_one_newline_stripped() {
        let mut buffer = TextBuffer::new();
        buffer.set("a\n\n");
        assert_eq!(buffer.get(), "a\n\n");
        assert_eq!(buffer.line_count(), 3);
    }

    #[test]
    fn test_append() {
        let mut buffer = TextBuffer::new();
        buffer.append("one");
        buffer.append("\ntwo");
        assert_eq!(buffer.get(), "one\ntwo");
        buffer.clear();
        assert_eq!(buffer.get(), "");
    }
}
