//! Core type definitions for Segmenta
//!
//! This module contains the shared data model: projects, segments,
//! translation candidates and the criteria attached to segment queries.

mod match_types;
mod query_types;
mod segment_types;

pub use match_types::*;
pub use query_types::*;
pub use segment_types::*;

use serde::{Deserialize, Serialize};

/// Project lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    New,
    InProgress,
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Translation project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub description: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Translation memory attached to the project
    #[serde(default)]
    pub memory_id: Option<String>,
    /// Glossary attached to the project
    #[serde(default)]
    pub glossary_id: Option<String>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            status: ProjectStatus::default(),
            memory_id: None,
            glossary_id: None,
        }
    }

    pub fn with_memory(mut self, memory_id: impl Into<String>) -> Self {
        self.memory_id = Some(memory_id.into());
        self
    }

    pub fn with_glossary(mut self, glossary_id: impl Into<String>) -> Self {
        self.glossary_id = Some(glossary_id.into());
        self
    }
}

/// Project progress figures
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_segments: u64,
    pub translated: u64,
    pub confirmed: u64,
    pub locked: u64,
    pub total_words: u64,
    pub translated_words: u64,
    pub confirmed_words: u64,
}

impl Statistics {
    /// Percentage of confirmed segments, 0 for an empty project
    pub fn confirmed_percent(&self) -> f32 {
        if self.total_segments == 0 {
            0.0
        } else {
            self.confirmed as f32 * 100.0 / self.total_segments as f32
        }
    }
}
