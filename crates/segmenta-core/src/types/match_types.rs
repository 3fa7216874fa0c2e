//! Translation candidates: memory/machine matches and glossary terms

use serde::{Deserialize, Serialize};

/// Where a match came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Translation memory
    Memory,
    /// Machine translation engine
    Machine,
    /// Assembled from memory fragments and glossary terms
    Assembled,
}

/// A candidate translation for the current segment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub kind: MatchKind,
    /// Similarity percentage (0-100)
    pub similarity: u8,
    pub source: String,
    pub target: String,
    /// Memory name or engine label
    pub origin: String,
}

/// Glossary term found in the current segment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub source: String,
    pub target: String,
    pub origin: String,
}

impl Term {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            origin: origin.into(),
        }
    }
}
