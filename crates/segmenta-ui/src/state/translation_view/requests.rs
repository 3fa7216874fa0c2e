//! Backend work requested from the view: candidates, reports and restructuring

use super::{RowTarget, TranslationView};
use segmenta_core::{BackendRequest, ExportKind, SegmentKey};
use tracing::info;

impl TranslationView {
    fn require_current(&mut self) -> Option<SegmentKey> {
        let key = self.current_key().cloned();
        if key.is_none() {
            self.notices.warning("No segment selected");
        }
        key
    }

    pub fn request_machine_translation(&mut self) {
        if let Some(key) = self.require_current() {
            self.send(BackendRequest::MachineTranslate {
                project: self.project.id.clone(),
                key,
            });
        }
    }

    pub fn request_assembled_matches(&mut self) {
        if let Some(key) = self.require_current() {
            self.send(BackendRequest::AssembleMatches {
                project: self.project.id.clone(),
                key,
            });
        }
    }

    /// Fill every empty target in the project from assembled matches
    pub fn request_assembled_matches_all(&mut self) {
        self.commit();
        self.send(BackendRequest::AssembleMatchesAll {
            project: self.project.id.clone(),
        });
    }

    /// Search the project's memory for the current segment
    pub fn request_memory_matches(&mut self) {
        let Some(memory) = self.project.memory_id.clone() else {
            self.notices.warning("No memory is attached to this project");
            return;
        };
        if let Some(key) = self.require_current() {
            self.send(BackendRequest::TmTranslate {
                project: self.project.id.clone(),
                key,
                memory,
            });
        }
    }

    pub fn fetch_project_terms(&mut self) {
        let Some(glossary) = self.project.glossary_id.clone() else {
            self.notices.warning("No glossary is attached to this project");
            return;
        };
        self.send(BackendRequest::FetchProjectTerms {
            project: self.project.id.clone(),
            glossary,
        });
    }

    pub fn generate_statistics(&mut self) {
        self.commit();
        self.send(BackendRequest::GenerateStatistics {
            project: self.project.id.clone(),
        });
    }

    pub fn export(&mut self, kind: ExportKind) {
        self.commit();
        info!("Exporting {} as {:?}", self.project.id, kind);
        self.send(BackendRequest::Export {
            project: self.project.id.clone(),
            kind,
        });
    }

    /// Split the current segment before source position `offset`
    pub fn split_segment(&mut self, offset: usize) {
        let Some(segment) = self.current_segment() else {
            self.notices.warning("No segment selected");
            return;
        };
        if segment.locked {
            self.notices.warning("Segment is locked");
            return;
        }
        if offset == 0 || offset >= segment.source.len() {
            self.notices
                .warning("Split position must fall inside the source text");
            return;
        }
        let key = segment.key.clone();
        let number = segment.index;

        self.commit();
        self.send(BackendRequest::SplitSegment {
            project: self.project.id.clone(),
            key,
            offset,
        });
        self.select_after_load = Some(RowTarget::Segment(number));
        self.reload();
    }

    /// Merge the current segment with the one below it on this page
    pub fn merge_next(&mut self) {
        let Some(index) = self.current else {
            self.notices.warning("No segment selected");
            return;
        };
        let Some(next) = self.rows.get(index + 1) else {
            self.notices
                .warning("No following segment on this page to merge with");
            return;
        };
        let segment = &self.rows[index];
        if segment.locked || next.locked {
            self.notices.warning("Locked segments cannot be merged");
            return;
        }
        if segment.key.file != next.key.file || segment.key.unit != next.key.unit {
            self.notices
                .warning("Only segments of the same unit can be merged");
            return;
        }
        let key = segment.key.clone();
        let number = segment.index;

        self.commit();
        self.send(BackendRequest::MergeSegment {
            project: self.project.id.clone(),
            key,
        });
        self.select_after_load = Some(RowTarget::Segment(number));
        self.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use segmenta_core::{BackendPush, Project, RecordingSink, SegmentData, SegmentState};
    use std::sync::Arc;

    fn unit_rows() -> Vec<SegmentData> {
        let mut first = segment(1, "First sentence.", "", SegmentState::Initial);
        let mut second = segment(2, "Second one.", "", SegmentState::Initial);
        first.unit = "u1".to_string();
        second.unit = "u1".to_string();
        second.segment = "s2".to_string();
        vec![first, second]
    }

    #[test]
    fn test_memory_request_needs_attached_memory() {
        let sink = Arc::new(RecordingSink::new());
        let mut view = TranslationView::new(
            Project::new(PROJECT, "No TM", "en", "fr"),
            sink.clone(),
            100,
        );
        view.handle_push(BackendPush::SegmentsLoaded {
            project: PROJECT.to_string(),
            segments: vec![segment(1, "Hello", "", SegmentState::Initial)],
        });
        sink.take();

        view.request_memory_matches();
        view.fetch_project_terms();
        assert!(sink.requests().is_empty());
        assert_eq!(view.take_notices().len(), 2);
    }

    #[test]
    fn test_memory_request_names_memory() {
        let (mut view, sink) = view_with(
            vec![segment(1, "Hello", "", SegmentState::Initial)],
            1,
            100,
        );
        view.request_memory_matches();
        match sink.take().as_slice() {
            [BackendRequest::TmTranslate { memory, .. }] => assert_eq!(memory, "tm1"),
            other => panic!("unexpected requests: {:?}", other),
        }
    }

    #[test]
    fn test_candidate_requests_need_current_row() {
        let (mut view, sink) = view_with(Vec::new(), 0, 100);
        view.request_machine_translation();
        view.request_assembled_matches();
        assert!(sink.requests().is_empty());

        view.request_assembled_matches_all();
        view.generate_statistics();
        view.export(ExportKind::Tmx);
        assert_eq!(
            methods(&sink),
            vec!["assembleMatchesAll", "generateStatistics", "export"]
        );
    }

    #[test]
    fn test_split_reloads_and_keeps_position() {
        let (mut view, sink) = view_with(unit_rows(), 2, 100);
        view.split_segment(0);
        view.split_segment(99);
        assert!(sink.requests().is_empty());
        assert_eq!(view.take_notices().len(), 2);

        view.split_segment(6);
        assert_eq!(
            methods(&sink),
            vec![
                "saveTranslation",
                "splitSegment",
                "fetchSegmentCount",
                "fetchSegments"
            ]
        );
    }

    #[test]
    fn test_merge_next_checks_neighbours() {
        let (mut view, sink) = view_with(unit_rows(), 2, 100);
        view.select_row(1);
        sink.take();
        view.merge_next();
        assert!(sink.requests().is_empty());

        view.select_row(0);
        sink.take();
        view.merge_next();
        assert_eq!(
            methods(&sink),
            vec![
                "saveTranslation",
                "mergeSegment",
                "fetchSegmentCount",
                "fetchSegments"
            ]
        );
    }

    #[test]
    fn test_merge_refuses_locked_neighbour() {
        let mut rows = unit_rows();
        rows[1].locked = true;
        let (mut view, sink) = view_with(rows, 2, 100);
        view.merge_next();
        assert!(sink.requests().is_empty());
        assert_eq!(view.take_notices().len(), 1);
    }
}
