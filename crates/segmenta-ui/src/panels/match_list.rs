//! Candidate match list shown in the memory and machine-translation panels

use segmenta_core::{Match, MatchKind, SegmentKey};
use tracing::debug;

/// Matches for the current segment, keyed by match id, best first
#[derive(Debug, Clone)]
pub struct MatchList {
    /// Kinds this panel displays
    kinds: Vec<MatchKind>,
    /// Segment the matches belong to
    key: Option<SegmentKey>,
    matches: Vec<Match>,
    selected: Option<String>,
}

impl MatchList {
    pub fn new(kinds: Vec<MatchKind>) -> Self {
        Self {
            kinds,
            key: None,
            matches: Vec::new(),
            selected: None,
        }
    }

    /// Translation memory panel
    pub fn memory() -> Self {
        Self::new(vec![MatchKind::Memory])
    }

    /// Machine translation panel, which also shows assembled matches
    pub fn machine() -> Self {
        Self::new(vec![MatchKind::Machine, MatchKind::Assembled])
    }

    pub fn shows(&self, kind: MatchKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Scope the list to `key`, dropping anything shown before
    pub fn set_segment(&mut self, key: Option<SegmentKey>) {
        self.key = key;
        self.matches.clear();
        self.selected = None;
    }

    pub fn segment(&self) -> Option<&SegmentKey> {
        self.key.as_ref()
    }

    /// Merge matches for `key`. Matches of other kinds are skipped; a match
    /// with a known id replaces the old one. Returns false, leaving the list
    /// untouched, when `key` is not the current segment.
    pub fn merge(&mut self, key: &SegmentKey, matches: &[Match]) -> bool {
        if self.key.as_ref() != Some(key) {
            debug!("Dropping matches for stale segment {}", key);
            return false;
        }

        let shown: Vec<&Match> = matches.iter().filter(|m| self.shows(m.kind)).collect();
        for candidate in shown {
            match self.matches.iter_mut().find(|m| m.id == candidate.id) {
                Some(existing) => *existing = candidate.clone(),
                None => self.matches.push(candidate.clone()),
            }
        }
        self.matches.sort_by(|a, b| b.similarity.cmp(&a.similarity));

        let selection_valid = self
            .selected
            .as_ref()
            .is_some_and(|id| self.matches.iter().any(|m| &m.id == id));
        if !selection_valid {
            self.selected = self.matches.first().map(|m| m.id.clone());
        }
        true
    }

    /// Select by id; unknown ids are ignored
    pub fn select(&mut self, id: &str) {
        if self.matches.iter().any(|m| m.id == id) {
            self.selected = Some(id.to_string());
        }
    }

    pub fn selected(&self) -> Option<&Match> {
        let id = self.selected.as_ref()?;
        self.matches.iter().find(|m| &m.id == id)
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.matches.iter().position(|m| &m.id == id)
    }

    /// Move the selection down; stops at the last match
    pub fn select_next(&mut self) {
        if let Some(index) = self.selected_index() {
            if let Some(next) = self.matches.get(index + 1) {
                self.selected = Some(next.id.clone());
            }
        }
    }

    /// Move the selection up; stops at the first match
    pub fn select_previous(&mut self) {
        if let Some(index) = self.selected_index() {
            if index > 0 {
                self.selected = Some(self.matches[index - 1].id.clone());
            }
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
