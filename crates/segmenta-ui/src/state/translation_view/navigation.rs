//! Moving the current row after a save

use super::{RowTarget, TranslationView};
use segmenta_core::{Segment, SegmentState};
use tracing::debug;

/// Segments a scan looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget {
    /// Target still empty
    Untranslated,
    /// Not yet confirmed
    Unconfirmed,
    /// Unconfirmed or carrying tag/space errors
    NeedsAction,
}

impl ScanTarget {
    fn matches(&self, segment: &Segment) -> bool {
        match self {
            Self::Untranslated => segment.state == SegmentState::Initial,
            Self::Unconfirmed => segment.state != SegmentState::Final,
            Self::NeedsAction => segment.needs_action(),
        }
    }

    fn exhausted_message(&self) -> &'static str {
        match self {
            Self::Untranslated => "No more untranslated segments on this page",
            Self::Unconfirmed => "No more unconfirmed segments on this page",
            Self::NeedsAction => "No more segments needing action on this page",
        }
    }
}

/// Where the selection goes once a save is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    /// Stay on the current row
    #[default]
    None,
    /// A row clicked in the grid, by position on the page
    Row(usize),
    /// A segment by its 1-based number, on any page
    Segment(u64),
    /// Following row, continuing on the next page
    Next,
    /// Preceding row, continuing on the previous page
    Previous,
    /// Next unlocked row after the current one on this page that matches
    Scan(ScanTarget),
}

impl TranslationView {
    pub(crate) fn navigate(&mut self, directive: Directive) {
        let Some(current) = self.current else {
            debug!("No current row, ignoring {:?}", directive);
            return;
        };

        match directive {
            Directive::None => {}
            Directive::Row(index) => {
                if index < self.rows.len() && index != current {
                    self.activate_row(index);
                }
            }
            Directive::Segment(number) => {
                if self.check_segment_number(number) {
                    self.jump_to_segment(number);
                }
            }
            Directive::Next => {
                if current + 1 < self.rows.len() {
                    self.activate_row(current + 1);
                } else if self.pagination.next() {
                    self.select_after_load = Some(RowTarget::First);
                    self.load_page();
                }
            }
            Directive::Previous => {
                if current > 0 {
                    self.activate_row(current - 1);
                } else if self.pagination.previous() {
                    self.select_after_load = Some(RowTarget::Last);
                    self.load_page();
                }
            }
            Directive::Scan(target) => {
                let found = self
                    .rows
                    .iter()
                    .enumerate()
                    .skip(current + 1)
                    .find(|(_, segment)| !segment.locked && target.matches(segment))
                    .map(|(index, _)| index);
                match found {
                    Some(index) => self.activate_row(index),
                    None => self.notices.warning(target.exhausted_message()),
                }
            }
        }
    }

    /// Save the current row and jump to segment `number`
    pub fn go_to_segment(&mut self, number: u64) {
        if !self.check_segment_number(number) {
            return;
        }
        self.commit();
        self.jump_to_segment(number);
    }

    fn check_segment_number(&mut self, number: u64) -> bool {
        if number == 0 || number > self.pagination.segment_count() {
            self.notices
                .warning(format!("Segment {} does not exist", number));
            return false;
        }
        true
    }

    fn jump_to_segment(&mut self, number: u64) {
        if let Some(index) = self.rows.iter().position(|segment| segment.index == number) {
            if self.current != Some(index) {
                self.activate_row(index);
            }
            return;
        }
        let page = self.pagination.page_of(number);
        self.pagination.go_to(page);
        self.select_after_load = Some(RowTarget::Segment(number));
        self.load_page();
    }
}
