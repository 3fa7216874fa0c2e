//! Request and push messages exchanged with the Backend Service

use crate::types::{
    ExportKind, FilterCriteria, Match, SegmentData, SegmentKey, SegmentState, SortCriteria,
    Statistics, Term,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests (engine -> backend)
// ============================================================================

/// Fire-and-forget request sent to the Backend Service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "method",
    content = "params",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum BackendRequest {
    FetchSegments {
        project: String,
        start: u64,
        count: u64,
        filter: FilterCriteria,
        sort: SortCriteria,
    },
    FetchSegmentCount {
        project: String,
        filter: FilterCriteria,
    },
    SaveTranslation {
        project: String,
        file: String,
        unit: String,
        segment: String,
        text: String,
        confirm: bool,
        memory: Option<String>,
        /// Per-view sequence number echoed back by `segmentTargetUpdated`
        seq: u64,
    },
    FetchMatches {
        project: String,
        key: SegmentKey,
    },
    FetchTerms {
        project: String,
        key: SegmentKey,
    },
    LockSegment {
        project: String,
        key: SegmentKey,
        locked: bool,
    },
    SplitSegment {
        project: String,
        key: SegmentKey,
        offset: usize,
    },
    MergeSegment {
        project: String,
        key: SegmentKey,
    },
    MachineTranslate {
        project: String,
        key: SegmentKey,
    },
    AssembleMatches {
        project: String,
        key: SegmentKey,
    },
    AssembleMatchesAll {
        project: String,
    },
    TmTranslate {
        project: String,
        key: SegmentKey,
        memory: String,
    },
    AcceptMatch {
        project: String,
        key: SegmentKey,
        match_id: String,
    },
    FetchProjectTerms {
        project: String,
        glossary: String,
    },
    GenerateStatistics {
        project: String,
    },
    Export {
        project: String,
        kind: ExportKind,
    },
    CloseProject {
        project: String,
    },
}

impl BackendRequest {
    /// Project the request belongs to
    pub fn project(&self) -> &str {
        match self {
            Self::FetchSegments { project, .. }
            | Self::FetchSegmentCount { project, .. }
            | Self::SaveTranslation { project, .. }
            | Self::FetchMatches { project, .. }
            | Self::FetchTerms { project, .. }
            | Self::LockSegment { project, .. }
            | Self::SplitSegment { project, .. }
            | Self::MergeSegment { project, .. }
            | Self::MachineTranslate { project, .. }
            | Self::AssembleMatches { project, .. }
            | Self::AssembleMatchesAll { project }
            | Self::TmTranslate { project, .. }
            | Self::AcceptMatch { project, .. }
            | Self::FetchProjectTerms { project, .. }
            | Self::GenerateStatistics { project }
            | Self::Export { project, .. }
            | Self::CloseProject { project } => project,
        }
    }

    /// Wire method name, used for logging
    pub fn method(&self) -> &'static str {
        match self {
            Self::FetchSegments { .. } => "fetchSegments",
            Self::FetchSegmentCount { .. } => "fetchSegmentCount",
            Self::SaveTranslation { .. } => "saveTranslation",
            Self::FetchMatches { .. } => "fetchMatches",
            Self::FetchTerms { .. } => "fetchTerms",
            Self::LockSegment { .. } => "lockSegment",
            Self::SplitSegment { .. } => "splitSegment",
            Self::MergeSegment { .. } => "mergeSegment",
            Self::MachineTranslate { .. } => "machineTranslate",
            Self::AssembleMatches { .. } => "assembleMatches",
            Self::AssembleMatchesAll { .. } => "assembleMatchesAll",
            Self::TmTranslate { .. } => "tmTranslate",
            Self::AcceptMatch { .. } => "acceptMatch",
            Self::FetchProjectTerms { .. } => "fetchProjectTerms",
            Self::GenerateStatistics { .. } => "generateStatistics",
            Self::Export { .. } => "export",
            Self::CloseProject { .. } => "closeProject",
        }
    }
}

// ============================================================================
// Pushes (backend -> engine)
// ============================================================================

/// Message pushed by the Backend Service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum BackendPush {
    SegmentCount {
        project: String,
        count: u64,
    },
    SegmentsLoaded {
        project: String,
        segments: Vec<SegmentData>,
    },
    MatchesLoaded {
        project: String,
        key: SegmentKey,
        matches: Vec<Match>,
    },
    TermsLoaded {
        project: String,
        key: SegmentKey,
        terms: Vec<Term>,
    },
    SegmentTargetUpdated {
        project: String,
        key: SegmentKey,
        target: String,
        state: SegmentState,
        #[serde(default)]
        match_percent: Option<u8>,
        #[serde(default)]
        tag_errors: bool,
        #[serde(default)]
        space_errors: bool,
        /// Sequence number of the save this update answers, if any
        #[serde(default)]
        seq: Option<u64>,
    },
    StatisticsUpdated {
        project: String,
        statistics: Statistics,
    },
    ProjectTermsLoaded {
        project: String,
        terms: Vec<Term>,
    },
}

impl BackendPush {
    /// Project the push is addressed to
    pub fn project(&self) -> &str {
        match self {
            Self::SegmentCount { project, .. }
            | Self::SegmentsLoaded { project, .. }
            | Self::MatchesLoaded { project, .. }
            | Self::TermsLoaded { project, .. }
            | Self::SegmentTargetUpdated { project, .. }
            | Self::StatisticsUpdated { project, .. }
            | Self::ProjectTermsLoaded { project, .. } => project,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_request_wire_shape() {
        let request = BackendRequest::SaveTranslation {
            project: "p1".to_string(),
            file: "0".to_string(),
            unit: "u1".to_string(),
            segment: "s1".to_string(),
            text: "Hola".to_string(),
            confirm: true,
            memory: Some("tm".to_string()),
            seq: 4,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["method"], "saveTranslation");
        assert_eq!(json["params"]["confirm"], true);
        assert_eq!(json["params"]["seq"], 4);
        assert_eq!(request.project(), "p1");
        assert_eq!(request.method(), "saveTranslation");
    }

    #[test]
    fn test_accept_match_field_names() {
        let request = BackendRequest::AcceptMatch {
            project: "p1".to_string(),
            key: SegmentKey::new("0", "u1", "s1"),
            match_id: "m7".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["params"]["matchId"], "m7");
        assert_eq!(json["params"]["key"]["unit"], "u1");
    }

    #[test]
    fn test_target_update_push_defaults() {
        let line = r#"{
            "event": "segmentTargetUpdated",
            "data": {
                "project": "p1",
                "key": {"file": "0", "unit": "u1", "segment": "s1"},
                "target": "Hola",
                "state": "translated"
            }
        }"#;

        let push: BackendPush = serde_json::from_str(line).unwrap();
        assert_eq!(push.project(), "p1");
        match push {
            BackendPush::SegmentTargetUpdated {
                seq, tag_errors, ..
            } => {
                assert_eq!(seq, None);
                assert!(!tag_errors);
            }
            other => panic!("unexpected push: {:?}", other),
        }
    }
}
