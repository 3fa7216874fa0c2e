//! Edits to the current row

use super::super::EditBuffer;
use super::TranslationView;
use crate::panels::MatchPanelKind;
use segmenta_core::{BackendRequest, Markup};
use tracing::{debug, info};

impl TranslationView {
    /// Buffer of the current row if it may be edited, warning otherwise
    fn editable_buffer(&mut self) -> Option<&mut EditBuffer> {
        match self.current_segment().map(|segment| segment.locked) {
            None => {
                self.notices.warning("No segment selected");
                None
            }
            Some(true) => {
                self.notices.warning("Segment is locked");
                None
            }
            Some(false) => self.buffer.as_mut(),
        }
    }

    /// Replace the whole target with `markup` as typed by the user.
    /// Tags that do not belong to the source are dropped.
    pub fn set_target(&mut self, markup: &str) {
        let allowed = self.tag_index.id_set();
        let mut content = Markup::parse(markup);
        let removed = content.retain_tags(&allowed);
        let Some(buffer) = self.editable_buffer() else {
            return;
        };
        buffer.set_content(content);
        if removed > 0 {
            self.notices.warning("Extra tags were removed");
        }
    }

    pub fn insert_text(&mut self, text: &str) {
        if let Some(buffer) = self.editable_buffer() {
            buffer.insert_text(text);
        }
    }

    pub fn set_caret(&mut self, position: usize) {
        if let Some(buffer) = self.editable_buffer() {
            buffer.set_caret(position);
        }
    }

    /// Insert source tag `id` at the caret
    pub fn insert_tag(&mut self, id: u32) {
        let Some(tag) = self.tag_index.get(id).cloned() else {
            self.notices
                .warning(format!("Tag {} does not appear in the source", id));
            return;
        };
        if let Some(buffer) = self.editable_buffer() {
            buffer.insert_tag(tag);
        }
    }

    pub fn remove_tag(&mut self, id: u32) {
        if let Some(buffer) = self.editable_buffer() {
            if !buffer.remove_tag(id) {
                debug!("Tag {} not in target", id);
            }
        }
    }

    /// Insert every source tag missing from the target, in source order
    pub fn insert_remaining_tags(&mut self) {
        if self.editable_buffer().is_none() {
            return;
        }
        let missing = match self.buffer.as_ref() {
            Some(buffer) => self.tag_index.missing_from(buffer.content()),
            None => return,
        };
        if missing.is_empty() {
            self.notices.info("All tags are already in the target");
            return;
        }
        if let Some(buffer) = self.editable_buffer() {
            for tag in missing {
                buffer.insert_tag(tag);
            }
        }
    }

    pub fn remove_all_tags(&mut self) {
        if let Some(buffer) = self.editable_buffer() {
            buffer.remove_all_tags();
        }
    }

    /// Replace the target with the source
    pub fn copy_source(&mut self) {
        let Some(source) = self.current_segment().map(|segment| segment.source.clone()) else {
            self.notices.warning("No segment selected");
            return;
        };
        if let Some(buffer) = self.editable_buffer() {
            buffer.set_content(source);
        }
    }

    /// Flip the lock of the current row and select it again
    pub fn toggle_lock(&mut self) {
        let Some(index) = self.current else {
            self.notices.warning("No segment selected");
            return;
        };
        self.commit();

        let segment = &mut self.rows[index];
        segment.locked = !segment.locked;
        let key = segment.key.clone();
        let locked = segment.locked;
        info!("Segment {} {}", key, if locked { "locked" } else { "unlocked" });

        self.send(BackendRequest::LockSegment {
            project: self.project.id.clone(),
            key,
            locked,
        });
        self.activate_row(index);
    }

    /// Ask the backend to apply the selected match of `panel` to the current row
    pub fn accept_match(&mut self, panel: MatchPanelKind) {
        let Some(key) = self.current_key().cloned() else {
            self.notices.warning("No segment selected");
            return;
        };
        if !self.is_editable() {
            self.notices.warning("Segment is locked");
            return;
        }
        let Some(match_id) = self.panels.list(panel).selected().map(|m| m.id.clone()) else {
            self.notices.warning("No match selected");
            return;
        };
        self.send(BackendRequest::AcceptMatch {
            project: self.project.id.clone(),
            key,
            match_id,
        });
    }

    /// Insert the target of the selected term at the caret
    pub fn accept_term(&mut self) {
        let Some(term) = self.panels.terms.selected().map(|term| term.target.clone()) else {
            self.notices.warning("No term selected");
            return;
        };
        if let Some(buffer) = self.editable_buffer() {
            buffer.insert_text(&term);
        }
    }
}
