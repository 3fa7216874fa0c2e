//! Translation view: the segment grid of one open project
//!
//! ```text
//!   host events ──► TranslationView ──► BackendSink (fire and forget)
//!                        ▲
//!   BackendPush ─────────┘  (segments, matches, terms, target updates)
//! ```
//!
//! At most one row is current at a time. Its target lives in an
//! [`EditBuffer`] unless the row is locked, in which case nothing on the row
//! can be edited. Every request is optimistic: local state changes first and
//! the backend answers later through [`TranslationView::handle_push`].

mod editing;
mod navigation;
mod paging;
mod pushes;
mod requests;

pub use navigation::{Directive, ScanTarget};

use super::{EditBuffer, Pagination, PendingWrites};
use crate::notice::{Notice, Notices};
use crate::panels::MatchPanels;
use segmenta_core::{
    BackendRequest, BackendSink, FilterCriteria, Project, Segment, SegmentKey, SegmentState,
    SortCriteria, Statistics, TagIndex, Term,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Row to select once the page being fetched arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowTarget {
    First,
    Last,
    /// 1-based segment index
    Segment(u64),
}

pub struct TranslationView {
    // === Project ===
    project: Project,
    sink: Arc<dyn BackendSink>,

    // === Grid ===
    /// Rows of the current page
    rows: Vec<Segment>,
    /// Index into `rows` of the current row
    current: Option<usize>,
    /// Editable target of the current row, absent when it is locked
    buffer: Option<EditBuffer>,
    /// Tags of the current row's source
    tag_index: TagIndex,

    // === Query ===
    pagination: Pagination,
    filter: FilterCriteria,
    sort: SortCriteria,
    select_after_load: Option<RowTarget>,

    // === Side data ===
    panels: MatchPanels,
    pending: PendingWrites,
    statistics: Option<Statistics>,
    project_terms: Vec<Term>,
    notices: Notices,
}

impl TranslationView {
    pub fn new(project: Project, sink: Arc<dyn BackendSink>, rows_per_page: u64) -> Self {
        Self {
            project,
            sink,
            rows: Vec::new(),
            current: None,
            buffer: None,
            tag_index: TagIndex::default(),
            pagination: Pagination::new(rows_per_page),
            filter: FilterCriteria::default(),
            sort: SortCriteria::default(),
            select_after_load: None,
            panels: MatchPanels::new(),
            pending: PendingWrites::new(),
            statistics: None,
            project_terms: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_id(&self) -> &str {
        &self.project.id
    }

    pub fn rows(&self) -> &[Segment] {
        &self.rows
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.current.and_then(|index| self.rows.get(index))
    }

    pub fn current_key(&self) -> Option<&SegmentKey> {
        self.current_segment().map(|segment| &segment.key)
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    /// Whether the current row accepts edits
    pub fn is_editable(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn sort(&self) -> &SortCriteria {
        &self.sort
    }

    pub fn panels(&self) -> &MatchPanels {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut MatchPanels {
        &mut self.panels
    }

    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn project_terms(&self) -> &[Term] {
        &self.project_terms
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.peek()
    }

    /// Make `index` the current row, committing the row being left
    pub fn select_row(&mut self, index: usize) {
        if index >= self.rows.len() || self.current == Some(index) {
            return;
        }
        self.commit();
        self.activate_row(index);
    }

    /// Save the current row and then move as `directive` says
    pub fn save(&mut self, confirm: bool, directive: Directive) {
        self.save_current(confirm);
        self.navigate(directive);
    }

    /// Save the current row without confirming it
    pub fn commit(&mut self) {
        self.save_current(false);
    }

    /// Write the buffer back into the row and send it to the backend.
    /// Locked rows are never written.
    fn save_current(&mut self, confirm: bool) {
        let Some(index) = self.current else {
            return;
        };
        let Some(segment) = self.rows.get_mut(index) else {
            return;
        };
        if segment.locked {
            debug!("Segment {} is locked, nothing to save", segment.key);
            return;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };

        let text = buffer.content().clone();
        segment.state = SegmentState::after_save(
            segment.state,
            text.is_empty(),
            confirm,
            !buffer.is_dirty(),
        );
        segment.target = text.clone();
        buffer.mark_saved();

        // an untouched final row is saved as confirmed
        let confirm = segment.state == SegmentState::Final;
        let key = segment.key.clone();
        let markup = text.to_string();
        let seq = self.pending.record(key.clone(), markup.clone(), confirm);
        debug!("Saving {} as {} (seq {})", key, segment.state.as_str(), seq);

        self.send(BackendRequest::SaveTranslation {
            project: self.project.id.clone(),
            file: key.file,
            unit: key.unit,
            segment: key.segment,
            text: markup,
            confirm,
            memory: self.project.memory_id.clone(),
            seq,
        });
    }

    /// Make `index` current without saving anything
    pub(crate) fn activate_row(&mut self, index: usize) {
        let Some(segment) = self.rows.get(index) else {
            return;
        };
        let key = segment.key.clone();
        self.tag_index = TagIndex::from_source(&segment.source);
        self.buffer = if segment.locked {
            None
        } else {
            Some(EditBuffer::new(key.clone(), segment.target.clone()))
        };
        self.current = Some(index);
        self.panels.set_segment(Some(key.clone()));

        self.send(BackendRequest::FetchMatches {
            project: self.project.id.clone(),
            key: key.clone(),
        });
        self.send(BackendRequest::FetchTerms {
            project: self.project.id.clone(),
            key,
        });
    }

    /// Drop the current row, buffer and panel contents
    pub(crate) fn clear_selection(&mut self) {
        self.current = None;
        self.buffer = None;
        self.tag_index = TagIndex::default();
        self.panels.clear();
    }

    pub(crate) fn send(&self, request: BackendRequest) {
        let method = request.method();
        if let Err(e) = self.sink.dispatch(request) {
            error!("Failed to dispatch {} for {}: {}", method, self.project.id, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use segmenta_core::{BackendPush, RecordingSink, SegmentData};

    pub const PROJECT: &str = "p1";

    pub fn segment(index: u64, source: &str, target: &str, state: SegmentState) -> SegmentData {
        SegmentData {
            index,
            file: "0".to_string(),
            unit: format!("u{}", index),
            segment: "s1".to_string(),
            source: source.to_string(),
            target: target.to_string(),
            state,
            locked: false,
            match_percent: 0,
            tag_errors: false,
            space_errors: false,
            has_notes: false,
            has_metadata: false,
            preserve_whitespace: false,
        }
    }

    pub fn locked(mut data: SegmentData) -> SegmentData {
        data.locked = true;
        data
    }

    pub fn project() -> Project {
        Project::new(PROJECT, "Manual", "en", "es")
            .with_memory("tm1")
            .with_glossary("g1")
    }

    /// View over one loaded page, with the recorded requests cleared
    pub fn view_with(
        rows: Vec<SegmentData>,
        total: u64,
        rows_per_page: u64,
    ) -> (TranslationView, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let mut view = TranslationView::new(project(), sink.clone(), rows_per_page);
        view.handle_push(BackendPush::SegmentCount {
            project: PROJECT.to_string(),
            count: total,
        });
        view.handle_push(BackendPush::SegmentsLoaded {
            project: PROJECT.to_string(),
            segments: rows,
        });
        sink.take();
        (view, sink)
    }

    pub fn methods(sink: &RecordingSink) -> Vec<&'static str> {
        sink.take().iter().map(|request| request.method()).collect()
    }
}
