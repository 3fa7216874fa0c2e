//! Segment types shared by the editor and the backend contract

use crate::markup::Markup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key identifying a segment inside a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub file: String,
    pub unit: String,
    pub segment: String,
}

impl SegmentKey {
    pub fn new(
        file: impl Into<String>,
        unit: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            unit: unit.into(),
            segment: segment.into(),
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.unit, self.segment)
    }
}

/// Translation state of a segment
///
/// `locked` is tracked separately on [`Segment`] and does not appear here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SegmentState {
    /// Empty target
    Initial,
    /// Non-empty target, not yet confirmed
    Translated,
    /// Confirmed translation
    Final,
}

impl Default for SegmentState {
    fn default() -> Self {
        Self::Initial
    }
}

impl SegmentState {
    /// Resolve the state produced by saving `text`.
    ///
    /// An unchanged buffer on a segment that was already final stays final
    /// even when `confirm` is false.
    pub fn after_save(
        previous: SegmentState,
        text_is_empty: bool,
        confirm: bool,
        unchanged: bool,
    ) -> Self {
        if text_is_empty {
            Self::Initial
        } else if confirm || (previous == Self::Final && unchanged) {
            Self::Final
        } else {
            Self::Translated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Translated => "translated",
            Self::Final => "final",
        }
    }
}

/// Segment as delivered by the Backend Service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentData {
    /// 1-based position of the segment within the (filtered, sorted) project
    pub index: u64,
    pub file: String,
    pub unit: String,
    pub segment: String,
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub state: SegmentState,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub match_percent: u8,
    #[serde(default)]
    pub tag_errors: bool,
    #[serde(default)]
    pub space_errors: bool,
    #[serde(default)]
    pub has_notes: bool,
    #[serde(default)]
    pub has_metadata: bool,
    #[serde(default)]
    pub preserve_whitespace: bool,
}

impl SegmentData {
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(&self.file, &self.unit, &self.segment)
    }
}

/// Display record for one grid row
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub key: SegmentKey,
    pub index: u64,
    pub source: Markup,
    pub target: Markup,
    pub state: SegmentState,
    pub locked: bool,
    pub match_percent: u8,
    pub tag_errors: bool,
    pub space_errors: bool,
    pub has_notes: bool,
    pub has_metadata: bool,
    pub preserve_whitespace: bool,
}

impl Segment {
    /// Whether the segment still needs translator attention
    pub fn needs_action(&self) -> bool {
        self.state != SegmentState::Final || self.tag_errors || self.space_errors
    }
}

impl From<SegmentData> for Segment {
    fn from(data: SegmentData) -> Self {
        Self {
            key: data.key(),
            index: data.index,
            source: Markup::parse(&data.source),
            target: Markup::parse(&data.target),
            state: data.state,
            locked: data.locked,
            match_percent: data.match_percent,
            tag_errors: data.tag_errors,
            space_errors: data.space_errors,
            has_notes: data.has_notes,
            has_metadata: data.has_metadata,
            preserve_whitespace: data.preserve_whitespace,
        }
    }
}
