//! Page changes, filtering and sorting

use super::super::Pagination;
use super::TranslationView;
use regex::RegexBuilder;
use segmenta_core::{BackendRequest, FilterCriteria, SortCriteria};
use tracing::info;

impl TranslationView {
    /// Fetch the segment count and the first page
    pub fn initialize(&mut self) {
        info!("Opening translation view for {}", self.project.id);
        self.reload();
    }

    /// Re-fetch the count and the current page
    pub fn reload(&mut self) {
        self.send(BackendRequest::FetchSegmentCount {
            project: self.project.id.clone(),
            filter: self.filter.clone(),
        });
        self.load_page();
    }

    pub(crate) fn load_page(&mut self) {
        self.send(BackendRequest::FetchSegments {
            project: self.project.id.clone(),
            start: self.pagination.start(),
            count: self.pagination.rows_per_page(),
            filter: self.filter.clone(),
            sort: self.sort,
        });
    }

    pub fn first_page(&mut self) {
        self.change_page(Pagination::first);
    }

    pub fn previous_page(&mut self) {
        self.change_page(Pagination::previous);
    }

    pub fn next_page(&mut self) {
        self.change_page(Pagination::next);
    }

    pub fn last_page(&mut self) {
        self.change_page(Pagination::last);
    }

    /// Moves that would not change the page do nothing at all, not even save
    fn change_page(&mut self, step: fn(&mut Pagination) -> bool) {
        let mut pagination = self.pagination;
        if !step(&mut pagination) {
            return;
        }
        self.commit();
        self.pagination = pagination;
        self.load_page();
    }

    pub fn set_rows_per_page(&mut self, rows: u64) {
        if rows == 0 {
            self.notices.warning("Rows per page must be at least 1");
            return;
        }
        self.commit();
        self.pagination.set_rows_per_page(rows);
        self.load_page();
    }

    /// Apply new filter criteria and reload from the first page.
    /// A regular expression that does not compile leaves everything as it was.
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        if filter.regex && !filter.text.is_empty() {
            if let Err(e) = RegexBuilder::new(&filter.text)
                .case_insensitive(!filter.case_sensitive)
                .build()
            {
                self.notices
                    .warning(format!("Invalid regular expression: {}", e));
                return;
            }
        }
        self.commit();
        self.filter = filter;
        self.pagination.first();
        self.reload();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// Whether the grid shows a subset of the project
    pub fn filter_active(&self) -> bool {
        self.filter.is_active()
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.commit();
        self.sort = sort;
        self.pagination.first();
        self.load_page();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::notice::NoticeLevel;
    use pretty_assertions::assert_eq;
    use segmenta_core::{BackendPush, SegmentState, SortOption};

    fn three_pages() -> (TranslationView, std::sync::Arc<segmenta_core::RecordingSink>) {
        let rows = (1..=2)
            .map(|i| segment(i, "Source", "", SegmentState::Initial))
            .collect();
        view_with(rows, 6, 2)
    }

    #[test]
    fn test_page_moves_at_boundaries_are_noops() {
        let (mut view, sink) = three_pages();
        view.first_page();
        view.previous_page();
        assert!(sink.requests().is_empty());

        view.last_page();
        assert_eq!(view.pagination().current_page(), 2);
        assert_eq!(methods(&sink), vec!["saveTranslation", "fetchSegments"]);

        view.next_page();
        assert!(sink.requests().is_empty());
    }

    #[test]
    fn test_rows_per_page_reloads_first_page() {
        let (mut view, sink) = three_pages();
        view.next_page();
        sink.take();

        view.set_rows_per_page(4);
        assert_eq!(view.pagination().current_page(), 0);
        assert_eq!(view.pagination().max_page(), 2);
        match sink.take().last() {
            Some(BackendRequest::FetchSegments { start, count, .. }) => {
                assert_eq!((*start, *count), (0, 4));
            }
            other => panic!("unexpected request: {:?}", other),
        }

        view.set_rows_per_page(0);
        assert_eq!(view.take_notices()[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_filter_hiding_everything_keeps_indicator() {
        let (mut view, sink) = three_pages();
        view.set_filter(FilterCriteria {
            show_initial: false,
            ..FilterCriteria::default()
        });
        assert!(view.filter_active());
        assert_eq!(
            methods(&sink),
            vec!["saveTranslation", "fetchSegmentCount", "fetchSegments"]
        );

        view.handle_push(BackendPush::SegmentCount {
            project: PROJECT.to_string(),
            count: 0,
        });
        view.handle_push(BackendPush::SegmentsLoaded {
            project: PROJECT.to_string(),
            segments: Vec::new(),
        });

        assert!(view.rows().is_empty());
        assert_eq!(view.current_index(), None);
        assert!(view.filter_active());
        let notices = view.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_invalid_regex_filter_is_rejected() {
        let (mut view, sink) = three_pages();
        view.set_filter(FilterCriteria {
            text: "(unclosed".to_string(),
            regex: true,
            ..FilterCriteria::default()
        });
        assert!(sink.requests().is_empty());
        assert!(!view.filter_active());
        assert!(view.take_notices()[0].message.contains("regular expression"));
    }

    #[test]
    fn test_sort_resets_page() {
        let (mut view, sink) = three_pages();
        view.last_page();
        sink.take();
        view.set_sort(SortCriteria {
            option: SortOption::Target,
            descending: true,
        });
        assert_eq!(view.pagination().current_page(), 0);
        match sink.take().last() {
            Some(BackendRequest::FetchSegments { sort, start, .. }) => {
                assert_eq!(*start, 0);
                assert!(sort.descending);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }
}
