//! Live content of the one editable target cell

use segmenta_core::{Markup, SegmentKey, Tag};

/// Target being edited, with the snapshot taken when the row was selected
/// or last saved
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    key: SegmentKey,
    content: Markup,
    snapshot: Markup,
    caret: usize,
}

impl EditBuffer {
    pub fn new(key: SegmentKey, target: Markup) -> Self {
        let caret = target.len();
        Self {
            key,
            snapshot: target.clone(),
            content: target,
            caret,
        }
    }

    pub fn key(&self) -> &SegmentKey {
        &self.key
    }

    pub fn content(&self) -> &Markup {
        &self.content
    }

    pub fn snapshot(&self) -> &Markup {
        &self.snapshot
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// True when the content differs from the snapshot
    pub fn is_dirty(&self) -> bool {
        self.content != self.snapshot
    }

    /// Take the current content as the new snapshot
    pub fn mark_saved(&mut self) {
        self.snapshot = self.content.clone();
    }

    pub fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.content.len());
    }

    /// Replace the content, keeping the snapshot
    pub fn set_content(&mut self, content: Markup) {
        self.content = content;
        self.caret = self.caret.min(self.content.len());
    }

    /// Replace content and snapshot with an authoritative value
    pub fn reset(&mut self, target: Markup) {
        self.snapshot = target.clone();
        self.content = target;
        self.caret = self.caret.min(self.content.len());
    }

    /// Insert plain text at the caret and move the caret past it
    pub fn insert_text(&mut self, text: &str) {
        if let Ok(inserted) = self.content.insert_text_at(self.caret, text) {
            self.caret += inserted;
        }
    }

    /// Insert `tag` at the caret. If the target already holds that id it is
    /// taken out first, so the id never appears twice.
    pub fn insert_tag(&mut self, tag: Tag) {
        if self.content.contains_tag(tag.id) {
            self.remove_tag(tag.id);
        }
        if self.content.insert_tag_at(self.caret, tag).is_ok() {
            self.caret += 1;
        }
    }

    /// Remove tag `id`, keeping the caret on the same character.
    /// Returns false when the target has no such tag.
    pub fn remove_tag(&mut self, id: u32) -> bool {
        let Some(position) = self.content.remove_tag(id) else {
            return false;
        };
        if position < self.caret {
            self.caret -= 1;
        }
        self.caret = self.caret.min(self.content.len());
        true
    }

    /// Remove every tag; the caret moves back by the tags that preceded it
    pub fn remove_all_tags(&mut self) -> usize {
        let before_caret = self
            .content
            .tag_ids()
            .iter()
            .filter_map(|id| self.content.tag_position(*id))
            .filter(|position| *position < self.caret)
            .count();
        let removed = self.content.remove_all_tags();
        self.caret = (self.caret - before_caret).min(self.content.len());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: u32) -> Tag {
        Tag::new(id, format!("<img data-ref=\"{}\"/>", id))
    }

    fn buffer(target: &str) -> EditBuffer {
        EditBuffer::new(SegmentKey::new("0", "u", "s"), Markup::parse(target))
    }

    #[test]
    fn test_new_buffer_is_clean_with_caret_at_end() {
        let buffer = buffer("abc");
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.caret(), 3);
    }

    #[test]
    fn test_insert_then_remove_restores_tag_set() {
        let mut buffer = buffer(r#"a<img data-ref="1"/>b"#);
        let before = buffer.content().tag_ids();

        buffer.set_caret(1);
        buffer.insert_tag(tag(2));
        assert_eq!(buffer.content().tag_ids(), vec![2, 1]);
        assert!(buffer.remove_tag(2));
        assert_eq!(buffer.content().tag_ids(), before);
    }

    #[test]
    fn test_reinsert_moves_tag_without_duplicate() {
        let mut buffer = buffer(r#"<img data-ref="1"/>abc"#);
        buffer.set_caret(3);
        buffer.insert_tag(tag(1));

        assert_eq!(buffer.content().tag_ids(), vec![1]);
        assert_eq!(buffer.content().tag_position(1), Some(2));
        assert_eq!(buffer.caret(), 3);
        assert!(!buffer.content().has_duplicate_tags());
    }

    #[test]
    fn test_remove_tag_before_caret_shifts_caret() {
        let mut buffer = buffer(r#"a<img data-ref="1"/>bc"#);
        buffer.set_caret(3);
        assert!(buffer.remove_tag(1));
        assert_eq!(buffer.caret(), 2);
        assert_eq!(buffer.content().to_string(), "abc");
    }

    #[test]
    fn test_remove_tag_after_caret_keeps_caret() {
        let mut buffer = buffer(r#"ab<img data-ref="1"/>"#);
        buffer.set_caret(1);
        assert!(buffer.remove_tag(1));
        assert_eq!(buffer.caret(), 1);
        assert!(!buffer.remove_tag(1));
    }

    #[test]
    fn test_insert_text_moves_caret() {
        let mut buffer = buffer("");
        buffer.insert_text("Hola");
        assert_eq!(buffer.caret(), 4);
        assert!(buffer.is_dirty());
        assert_eq!(buffer.content().to_string(), "Hola");
    }

    #[test]
    fn test_remove_all_tags_adjusts_caret() {
        let mut buffer = buffer(r#"<img data-ref="1"/>ab<img data-ref="2"/>"#);
        buffer.set_caret(3);
        assert_eq!(buffer.remove_all_tags(), 2);
        assert_eq!(buffer.caret(), 2);
    }

    #[test]
    fn test_reset_cleans_buffer() {
        let mut buffer = buffer("a");
        buffer.insert_text("b");
        buffer.reset(Markup::parse("server"));
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.content().to_string(), "server");
    }
}
