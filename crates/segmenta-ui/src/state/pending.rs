//! Sequence numbers of saves still travelling to the backend
//!
//! Every save carries a per-view sequence number. When the backend pushes a
//! target update that echoes an older number than the latest save for the
//! same segment, the update answers a save the user has already superseded
//! and must not overwrite the newer local text.

use chrono::{DateTime, Utc};
use segmenta_core::SegmentKey;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub seq: u64,
    pub text: String,
    pub confirm: bool,
    pub sent_at: DateTime<Utc>,
    pub acknowledged: bool,
}

/// What to do with a pushed target update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Update from elsewhere; apply it in full
    Apply,
    /// Answer to the latest local save
    Acknowledged,
    /// Answer to a save that a newer one replaced
    Superseded,
}

#[derive(Debug, Default)]
pub struct PendingWrites {
    last_seq: u64,
    writes: HashMap<SegmentKey, PendingWrite>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a save and return its sequence number
    pub fn record(&mut self, key: SegmentKey, text: impl Into<String>, confirm: bool) -> u64 {
        self.last_seq += 1;
        self.writes.insert(
            key,
            PendingWrite {
                seq: self.last_seq,
                text: text.into(),
                confirm,
                sent_at: Utc::now(),
                acknowledged: false,
            },
        );
        self.last_seq
    }

    pub fn reconcile(&mut self, key: &SegmentKey, seq: Option<u64>) -> Reconcile {
        let Some(seq) = seq else {
            return Reconcile::Apply;
        };
        let Some(write) = self.writes.get_mut(key) else {
            return Reconcile::Apply;
        };
        if seq < write.seq {
            debug!("Dropping update {} for {}, latest save is {}", seq, key, write.seq);
            return Reconcile::Superseded;
        }
        write.acknowledged = true;
        Reconcile::Acknowledged
    }

    /// Whether the latest save for `key` is still unanswered
    pub fn is_pending(&self, key: &SegmentKey) -> bool {
        self.writes.get(key).is_some_and(|write| !write.acknowledged)
    }

    pub fn get(&self, key: &SegmentKey) -> Option<&PendingWrite> {
        self.writes.get(key)
    }

    /// Forget answered saves for segments `keep` rejects. Unanswered saves
    /// stay until the backend replies.
    pub fn evict_acknowledged(&mut self, keep: impl Fn(&SegmentKey) -> bool) -> usize {
        let before = self.writes.len();
        self.writes
            .retain(|key, write| !write.acknowledged || keep(key));
        before - self.writes.len()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn unacknowledged(&self) -> usize {
        self.writes.values().filter(|write| !write.acknowledged).count()
    }

    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let mut pending = PendingWrites::new();
        let a = pending.record(SegmentKey::new("0", "u", "1"), "a", false);
        let b = pending.record(SegmentKey::new("0", "u", "2"), "b", true);
        assert!(b > a);
        assert_eq!(pending.unacknowledged(), 2);
    }

    #[test]
    fn test_older_answer_is_superseded() {
        let key = SegmentKey::new("0", "u", "1");
        let mut pending = PendingWrites::new();
        let first = pending.record(key.clone(), "first", false);
        let second = pending.record(key.clone(), "second", false);

        assert_eq!(pending.reconcile(&key, Some(first)), Reconcile::Superseded);
        assert!(pending.is_pending(&key));
        assert_eq!(pending.reconcile(&key, Some(second)), Reconcile::Acknowledged);
        assert!(!pending.is_pending(&key));
        // A late answer to the first save still loses after the ack
        assert_eq!(pending.reconcile(&key, Some(first)), Reconcile::Superseded);
    }

    #[test]
    fn test_eviction_keeps_unanswered_saves() {
        let answered = SegmentKey::new("0", "u", "1");
        let waiting = SegmentKey::new("0", "u", "2");
        let visible = SegmentKey::new("0", "u", "3");
        let mut pending = PendingWrites::new();
        let seq = pending.record(answered.clone(), "a", false);
        pending.record(waiting.clone(), "b", false);
        let shown = pending.record(visible.clone(), "c", false);
        pending.reconcile(&answered, Some(seq));
        pending.reconcile(&visible, Some(shown));

        assert_eq!(pending.evict_acknowledged(|key| key == &visible), 1);
        assert!(pending.get(&answered).is_none());
        assert!(pending.is_pending(&waiting));
        assert!(pending.get(&visible).is_some());
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_unsequenced_update_applies() {
        let key = SegmentKey::new("0", "u", "1");
        let mut pending = PendingWrites::new();
        pending.record(key.clone(), "mine", false);
        assert_eq!(pending.reconcile(&key, None), Reconcile::Apply);
        assert_eq!(
            pending.reconcile(&SegmentKey::new("0", "u", "9"), Some(1)),
            Reconcile::Apply
        );
    }
}
