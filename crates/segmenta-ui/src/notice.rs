//! User-facing notices
//!
//! Nothing the user does in the editor is fatal. Rejected operations,
//! auto-corrections and exhausted scans all end up as a [`Notice`] that the
//! host shows however it likes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Pending notices of one view, drained by the host
#[derive(Debug, Default)]
pub struct Notices {
    pending: Vec<Notice>,
}

impl Notices {
    pub fn info(&mut self, message: impl Into<String>) {
        let notice = Notice::new(NoticeLevel::Info, message);
        info!("{}", notice.message);
        self.pending.push(notice);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let notice = Notice::new(NoticeLevel::Warning, message);
        warn!("{}", notice.message);
        self.pending.push(notice);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let notice = Notice::new(NoticeLevel::Error, message);
        error!("{}", notice.message);
        self.pending.push(notice);
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn peek(&self) -> &[Notice] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_in_order() {
        let mut notices = Notices::default();
        notices.info("Saved");
        notices.warning("Segment is locked");
        assert_eq!(notices.peek().len(), 2);

        let drained = notices.take();
        assert_eq!(drained[0].level, NoticeLevel::Info);
        assert_eq!(drained[1].message, "Segment is locked");
        assert!(notices.is_empty());
    }

    #[test]
    fn test_notice_serializes_for_host() {
        let notice = Notice::new(NoticeLevel::Warning, "Extra tags were removed");
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["message"], "Extra tags were removed");
        assert!(json["createdAt"].is_string());
    }
}
