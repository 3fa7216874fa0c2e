//! Column widths of the segment grid

use super::constants::{
    GRID_INDEX_WIDTH, GRID_MATCH_WIDTH, GRID_MIN_TEXT_WIDTH, GRID_PADDING, GRID_STATE_WIDTH,
};
use serde::Serialize;

/// Widths of the five grid columns in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumns {
    pub index: f32,
    pub source: f32,
    pub target: f32,
    pub state: f32,
    pub match_percent: f32,
}

impl GridColumns {
    /// Fixed columns keep their width; source and target split the rest
    /// evenly and never shrink below the text minimum.
    pub fn compute(editor_width: f32) -> Self {
        let fixed = GRID_INDEX_WIDTH + GRID_STATE_WIDTH + GRID_MATCH_WIDTH + GRID_PADDING;
        let text = ((editor_width - fixed) / 2.0).max(GRID_MIN_TEXT_WIDTH);
        Self {
            index: GRID_INDEX_WIDTH,
            source: text,
            target: text,
            state: GRID_STATE_WIDTH,
            match_percent: GRID_MATCH_WIDTH,
        }
    }

    pub fn total(&self) -> f32 {
        self.index + self.source + self.target + self.state + self.match_percent
    }
}
