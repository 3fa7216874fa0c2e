//! Filter, sort and export criteria sent along with segment requests

use super::SegmentState;
use serde::{Deserialize, Serialize};

/// Which side of the segment a text filter looks at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    Source,
    Target,
    Both,
}

impl Default for FilterScope {
    fn default() -> Self {
        Self::Source
    }
}

/// Segment filter predicate. All criteria are AND-combined by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free text (or pattern when `regex` is set). Empty = no text filter.
    pub text: String,
    pub scope: FilterScope,
    pub case_sensitive: bool,
    pub regex: bool,
    pub show_initial: bool,
    pub show_translated: bool,
    pub show_final: bool,
    pub show_locked: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            text: String::new(),
            scope: FilterScope::default(),
            case_sensitive: false,
            regex: false,
            show_initial: true,
            show_translated: true,
            show_final: true,
            show_locked: true,
        }
    }
}

impl FilterCriteria {
    /// Returns true if any criterion narrows the segment list.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
            || !self.show_initial
            || !self.show_translated
            || !self.show_final
            || !self.show_locked
    }

    /// Whether segments in `state` pass the per-state toggles.
    pub fn shows_state(&self, state: SegmentState) -> bool {
        match state {
            SegmentState::Initial => self.show_initial,
            SegmentState::Translated => self.show_translated,
            SegmentState::Final => self.show_final,
        }
    }
}

/// Sort key for the segment grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    None,
    Source,
    Target,
    Status,
    MatchPercent,
}

impl Default for SortOption {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortCriteria {
    pub option: SortOption,
    pub descending: bool,
}

impl SortCriteria {
    pub fn is_active(&self) -> bool {
        self.option != SortOption::None
    }
}

/// Export formats offered for a project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Xliff,
    Tmx,
    Translations,
    Html,
    Matches,
    Terms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_inactive() {
        let filter = FilterCriteria::default();
        assert!(!filter.is_active());
        assert!(filter.shows_state(SegmentState::Initial));
    }

    #[test]
    fn test_state_toggle_activates_filter() {
        let filter = FilterCriteria {
            show_initial: false,
            ..Default::default()
        };
        assert!(filter.is_active());
        assert!(!filter.shows_state(SegmentState::Initial));
        assert!(filter.shows_state(SegmentState::Final));
    }

    #[test]
    fn test_filter_wire_names() {
        let json = serde_json::to_value(FilterCriteria::default()).unwrap();
        assert_eq!(json["caseSensitive"], false);
        assert_eq!(json["scope"], "source");

        let sort = SortCriteria {
            option: SortOption::MatchPercent,
            descending: true,
        };
        let json = serde_json::to_value(sort).unwrap();
        assert_eq!(json["option"], "matchPercent");
    }
}
