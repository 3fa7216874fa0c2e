//! Source tag index built when a segment is selected

use super::{Markup, Tag};
use std::collections::HashSet;

/// Ordered id -> tag map taken from a segment's source, in source order.
///
/// Only the first occurrence of an id is indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: Vec<Tag>,
}

impl TagIndex {
    pub fn from_source(source: &Markup) -> Self {
        let mut seen = HashSet::new();
        let tags = source
            .tags()
            .filter(|tag| seen.insert(tag.id))
            .cloned()
            .collect();
        Self { tags }
    }

    pub fn get(&self, id: u32) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Ids in source order
    pub fn ids(&self) -> Vec<u32> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    pub fn id_set(&self) -> HashSet<u32> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Source tags that `target` does not contain yet, in source order
    pub fn missing_from(&self, target: &Markup) -> Vec<Tag> {
        let present: HashSet<u32> = target.tag_ids().into_iter().collect();
        self.tags
            .iter()
            .filter(|tag| !present.contains(&tag.id))
            .cloned()
            .collect()
    }
}
