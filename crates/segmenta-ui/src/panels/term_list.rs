//! Glossary terms for the current segment

use segmenta_core::{SegmentKey, Term};
use tracing::debug;

/// Terms with a selection cursor and a scroll viewport.
///
/// The selection index is tracked separately from the terms themselves and
/// is always kept inside the visible window.
#[derive(Debug, Clone)]
pub struct TermList {
    key: Option<SegmentKey>,
    terms: Vec<Term>,
    selected: usize,
    /// Number of rows the host can show at once
    visible_rows: usize,
    /// First visible row
    scroll_top: usize,
}

impl Default for TermList {
    fn default() -> Self {
        Self {
            key: None,
            terms: Vec::new(),
            selected: 0,
            visible_rows: 5,
            scroll_top: 0,
        }
    }
}

impl TermList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_segment(&mut self, key: Option<SegmentKey>) {
        self.key = key;
        self.terms.clear();
        self.selected = 0;
        self.scroll_top = 0;
    }

    pub fn segment(&self) -> Option<&SegmentKey> {
        self.key.as_ref()
    }

    /// Replace the terms for `key`; returns false for a stale key
    pub fn load(&mut self, key: &SegmentKey, terms: Vec<Term>) -> bool {
        if self.key.as_ref() != Some(key) {
            debug!("Dropping terms for stale segment {}", key);
            return false;
        }
        self.terms = terms;
        self.selected = 0;
        self.scroll_top = 0;
        true
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn selected(&self) -> Option<&Term> {
        self.terms.get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.terms.is_empty()).then_some(self.selected)
    }

    /// Select by index; out-of-range indexes are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.terms.len() {
            self.selected = index;
            self.scroll_into_view();
        }
    }

    /// Move down one term. Returns false at the last term.
    pub fn next(&mut self) -> bool {
        if self.selected + 1 >= self.terms.len() {
            return false;
        }
        self.selected += 1;
        self.scroll_into_view();
        true
    }

    /// Move up one term. Returns false at the first term.
    pub fn previous(&mut self) -> bool {
        if self.selected == 0 || self.terms.is_empty() {
            return false;
        }
        self.selected -= 1;
        self.scroll_into_view();
        true
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.scroll_into_view();
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn scroll_into_view(&mut self) {
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if self.selected >= self.scroll_top + self.visible_rows {
            self.scroll_top = self.selected + 1 - self.visible_rows;
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SegmentKey {
        SegmentKey::new("0", "u1", "s1")
    }

    fn loaded(count: usize) -> TermList {
        let mut list = TermList::new();
        list.set_segment(Some(key()));
        let terms = (0..count)
            .map(|i| Term::new(format!("src{}", i), format!("tgt{}", i), "glossary"))
            .collect();
        assert!(list.load(&key(), terms));
        list
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut list = loaded(3);
        assert!(!list.previous());
        assert_eq!(list.selected_index(), Some(0));

        assert!(list.next());
        assert!(list.next());
        assert!(!list.next());
        assert_eq!(list.selected().map(|t| t.source.as_str()), Some("src2"));
    }

    #[test]
    fn test_empty_list_navigation() {
        let mut list = loaded(0);
        assert!(!list.next());
        assert!(!list.previous());
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut list = loaded(10);
        list.set_visible_rows(3);

        for _ in 0..4 {
            list.next();
        }
        assert_eq!(list.selected_index(), Some(4));
        assert_eq!(list.scroll_top(), 2);

        for _ in 0..4 {
            list.previous();
        }
        assert_eq!(list.scroll_top(), 0);
    }

    #[test]
    fn test_stale_terms_rejected() {
        let mut list = loaded(2);
        let other = SegmentKey::new("1", "u1", "s1");
        assert!(!list.load(&other, vec![Term::new("a", "b", "c")]));
        assert_eq!(list.len(), 2);
    }
}
