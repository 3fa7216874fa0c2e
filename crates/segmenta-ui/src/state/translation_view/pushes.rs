//! Applying what the backend pushes back

use super::super::pending::Reconcile;
use super::{RowTarget, TranslationView};
use segmenta_core::{
    BackendPush, Markup, Segment, SegmentData, SegmentKey, SegmentState, TagIndex,
};
use tracing::{debug, warn};

/// Fields of a `segmentTargetUpdated` push
#[derive(Debug)]
struct TargetUpdate {
    key: SegmentKey,
    target: String,
    state: SegmentState,
    match_percent: Option<u8>,
    tag_errors: bool,
    space_errors: bool,
    seq: Option<u64>,
}

impl TranslationView {
    /// Apply one backend push. Pushes for other projects are ignored.
    pub fn handle_push(&mut self, push: BackendPush) {
        if push.project() != self.project.id {
            debug!(
                "Ignoring push for {} in view of {}",
                push.project(),
                self.project.id
            );
            return;
        }

        match push {
            BackendPush::SegmentCount { count, .. } => {
                if self.pagination.set_segment_count(count) {
                    self.load_page();
                }
            }
            BackendPush::SegmentsLoaded { segments, .. } => self.on_segments_loaded(segments),
            BackendPush::MatchesLoaded { key, matches, .. } => {
                if !self.panels.load_matches(&key, &matches) {
                    debug!("Dropping stale matches for {}", key);
                }
            }
            BackendPush::TermsLoaded { key, terms, .. } => {
                if !self.panels.load_terms(&key, terms) {
                    debug!("Dropping stale terms for {}", key);
                }
            }
            BackendPush::SegmentTargetUpdated {
                key,
                target,
                state,
                match_percent,
                tag_errors,
                space_errors,
                seq,
                ..
            } => self.on_target_updated(TargetUpdate {
                key,
                target,
                state,
                match_percent,
                tag_errors,
                space_errors,
                seq,
            }),
            BackendPush::StatisticsUpdated { statistics, .. } => {
                self.statistics = Some(statistics);
            }
            BackendPush::ProjectTermsLoaded { terms, .. } => {
                self.project_terms = terms;
            }
        }
    }

    fn on_segments_loaded(&mut self, segments: Vec<SegmentData>) {
        self.rows = segments.into_iter().map(Segment::from).collect();
        self.clear_selection();

        let rows = &self.rows;
        let evicted = self
            .pending
            .evict_acknowledged(|key| rows.iter().any(|segment| &segment.key == key));
        if evicted > 0 {
            debug!("Forgot {} answered saves no longer on the page", evicted);
        }

        if self.rows.is_empty() {
            self.select_after_load = None;
            if self.filter.is_active() {
                self.notices.warning("No segments match the current filter");
            }
            return;
        }

        let last = self.rows.len() - 1;
        let index = match self.select_after_load.take().unwrap_or(RowTarget::First) {
            RowTarget::First => 0,
            RowTarget::Last => last,
            RowTarget::Segment(number) => self
                .rows
                .iter()
                .position(|segment| segment.index == number)
                .unwrap_or(0),
        };
        self.activate_row(index);
    }

    fn on_target_updated(&mut self, update: TargetUpdate) {
        let Some(index) = self.rows.iter().position(|segment| segment.key == update.key) else {
            debug!("Target update for {} not on this page", update.key);
            return;
        };

        let outcome = self.pending.reconcile(&update.key, update.seq);
        if outcome == Reconcile::Superseded {
            return;
        }

        let segment = &mut self.rows[index];
        let mut target = Markup::parse(&update.target);
        let allowed = TagIndex::from_source(&segment.source).id_set();
        let removed = target.retain_tags(&allowed);

        segment.target = target.clone();
        segment.state = update.state;
        segment.tag_errors = update.tag_errors;
        segment.space_errors = update.space_errors;
        if let Some(percent) = update.match_percent {
            segment.match_percent = percent;
        }

        if removed > 0 {
            warn!("Removed {} unknown or repeated tags from {}", removed, update.key);
            self.notices.warning("Extra tags were removed");
        }

        // An answer to our own save must not clobber typing done since
        if self.current == Some(index) && outcome == Reconcile::Apply {
            if let Some(buffer) = self.buffer.as_mut() {
                buffer.reset(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Directive;
    use super::*;
    use crate::notice::NoticeLevel;
    use pretty_assertions::assert_eq;
    use segmenta_core::{BackendRequest, Match, MatchKind, Statistics, Term};

    fn update(key: SegmentKey, target: &str, seq: Option<u64>) -> BackendPush {
        BackendPush::SegmentTargetUpdated {
            project: PROJECT.to_string(),
            key,
            target: target.to_string(),
            state: SegmentState::Translated,
            match_percent: Some(100),
            tag_errors: false,
            space_errors: false,
            seq,
        }
    }

    fn saved_seq(requests: &[BackendRequest]) -> u64 {
        requests
            .iter()
            .find_map(|request| match request {
                BackendRequest::SaveTranslation { seq, .. } => Some(*seq),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_superseded_update_is_ignored() {
        let (mut view, sink) = view_with(
            vec![segment(1, "Hello", "", SegmentState::Initial)],
            1,
            100,
        );
        let key = view.current_key().cloned().unwrap();

        view.set_target("Hola");
        view.save(false, Directive::None);
        let first = saved_seq(&sink.take());
        view.set_target("Hola!");
        view.save(false, Directive::None);
        let second = saved_seq(&sink.take());
        assert!(second > first);

        view.handle_push(update(key.clone(), "Hola", Some(first)));
        assert_eq!(view.rows()[0].target.to_string(), "Hola!");
        assert_eq!(view.buffer().unwrap().content().to_string(), "Hola!");

        view.handle_push(update(key, "Hola!", Some(second)));
        assert_eq!(view.rows()[0].match_percent, 100);
        assert!(!view.pending().is_pending(&view.rows()[0].key));
    }

    #[test]
    fn test_page_reload_forgets_answered_saves() {
        let (mut view, sink) = view_with(
            vec![
                segment(1, "One", "", SegmentState::Initial),
                segment(2, "Two", "", SegmentState::Initial),
            ],
            4,
            2,
        );
        let answered = view.current_key().cloned().unwrap();
        view.set_target("Uno");
        view.save(false, Directive::Next);
        let seq = saved_seq(&sink.take());
        view.handle_push(update(answered.clone(), "Uno", Some(seq)));

        view.set_target("Dos");
        view.next_page();
        let waiting = view.rows()[1].key.clone();
        assert_eq!(view.pending().len(), 2);

        view.handle_push(BackendPush::SegmentsLoaded {
            project: PROJECT.to_string(),
            segments: vec![
                segment(3, "Three", "", SegmentState::Initial),
                segment(4, "Four", "", SegmentState::Initial),
            ],
        });
        assert!(view.pending().get(&answered).is_none());
        assert!(view.pending().is_pending(&waiting));
        assert_eq!(view.pending().len(), 1);
    }

    #[test]
    fn test_external_update_replaces_buffer() {
        let (mut view, _) = view_with(
            vec![segment(1, "Hello", "", SegmentState::Initial)],
            1,
            100,
        );
        let key = view.current_key().cloned().unwrap();
        view.handle_push(update(key, "Hola mundo", None));

        let buffer = view.buffer().unwrap();
        assert_eq!(buffer.content().to_string(), "Hola mundo");
        assert!(!buffer.is_dirty());
        assert_eq!(view.rows()[0].state, SegmentState::Translated);
    }

    #[test]
    fn test_update_with_foreign_tag_is_cleaned() {
        let source = r#"Click <b data-ref="1"/>here"#;
        let (mut view, _) = view_with(
            vec![segment(1, source, "", SegmentState::Initial)],
            1,
            100,
        );
        let key = view.current_key().cloned().unwrap();
        view.handle_push(update(
            key,
            r#"Pulse <b data-ref="1"/>aquí<b data-ref="1"/><i data-ref="7"/>"#,
            None,
        ));

        assert_eq!(view.rows()[0].target.tag_ids(), vec![1]);
        assert_eq!(view.buffer().unwrap().content().tag_ids(), vec![1]);
        let notices = view.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[0].message, "Extra tags were removed");
    }

    #[test]
    fn test_stale_matches_are_dropped() {
        let (mut view, _) = view_with(
            vec![
                segment(1, "One", "", SegmentState::Initial),
                segment(2, "Two", "", SegmentState::Initial),
            ],
            2,
            100,
        );
        let old_key = view.current_key().cloned().unwrap();
        view.select_row(1);

        view.handle_push(BackendPush::MatchesLoaded {
            project: PROJECT.to_string(),
            key: old_key,
            matches: vec![Match {
                id: "tm1".to_string(),
                kind: MatchKind::Memory,
                similarity: 90,
                source: "One".to_string(),
                target: "Uno".to_string(),
                origin: "Main".to_string(),
            }],
        });
        assert!(view.panels().memory.is_empty());
    }

    #[test]
    fn test_pushes_for_other_projects_are_ignored() {
        let (mut view, _) = view_with(
            vec![segment(1, "One", "", SegmentState::Initial)],
            1,
            100,
        );
        view.handle_push(BackendPush::SegmentsLoaded {
            project: "other".to_string(),
            segments: Vec::new(),
        });
        assert_eq!(view.rows().len(), 1);
    }

    #[test]
    fn test_statistics_and_project_terms_are_stored() {
        let (mut view, _) = view_with(Vec::new(), 0, 100);
        view.handle_push(BackendPush::StatisticsUpdated {
            project: PROJECT.to_string(),
            statistics: Statistics {
                total_segments: 4,
                confirmed: 1,
                ..Statistics::default()
            },
        });
        view.handle_push(BackendPush::ProjectTermsLoaded {
            project: PROJECT.to_string(),
            terms: vec![Term::new("file", "archivo", "g1")],
        });
        assert_eq!(view.statistics().map(|s| s.total_segments), Some(4));
        assert_eq!(view.project_terms().len(), 1);
    }
}
