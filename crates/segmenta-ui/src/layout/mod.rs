//! Collapsible panel layout
//!
//! ```text
//! ┌──────────┬────────────────────────────┬──────────────┐
//! │ Files    │ Editor (segment grid)      │ Memory       │
//! │          │                            ├──────────────┤
//! │          │                            │ Machine      │
//! │          │                            ├──────────────┤
//! │          │                            │ Terms        │
//! └──────────┴────────────────────────────┴──────────────┘
//!   outer split (widths)                    inner split (heights)
//! ```
//!
//! The outer split holds files, editor and the right-side area; the inner
//! split lives inside the right-side area. Hiding the right side leaves the
//! inner panels' own flags alone, so expanding it again brings back exactly
//! the sub-panels that were showing before.

mod grid;
mod split;

pub use grid::GridColumns;
pub use split::{PanelId, PanelNode, PanelSize, Split, SplitOrientation};

use segmenta_core::EditorSettings;
use serde::Serialize;
use tracing::{debug, info};

/// Layout constants
pub mod constants {
    /// Default share of the files panel
    pub const FILES_WEIGHT: f32 = 0.2;
    /// Default share of the editor
    pub const EDITOR_WEIGHT: f32 = 0.55;
    /// Default share of the right-side area
    pub const RIGHT_SIDE_WEIGHT: f32 = 0.25;
    /// Minimum editor width in pixels
    pub const EDITOR_MIN_WIDTH: f32 = 320.0;
    /// Grid index column width in pixels
    pub const GRID_INDEX_WIDTH: f32 = 48.0;
    /// Grid state column width in pixels
    pub const GRID_STATE_WIDTH: f32 = 36.0;
    /// Grid match percentage column width in pixels
    pub const GRID_MATCH_WIDTH: f32 = 56.0;
    /// Horizontal padding and scrollbar allowance in the grid
    pub const GRID_PADDING: f32 = 24.0;
    /// Narrowest source/target column in pixels
    pub const GRID_MIN_TEXT_WIDTH: f32 = 80.0;
}

/// The collapse/expand button shown on a panel header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordance {
    Collapse,
    Expand,
}

/// Measured size of the layout container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub width: f32,
    pub height: f32,
}

/// Result of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPass {
    pub outer: Vec<PanelSize>,
    pub inner: Vec<PanelSize>,
    pub grid: GridColumns,
    /// True when every inner panel had been hidden and was shown again
    pub restored_inner: bool,
}

impl LayoutPass {
    pub fn size(&self, id: PanelId) -> Option<&PanelSize> {
        self.outer.iter().chain(&self.inner).find(|size| size.id == id)
    }
}

/// One-shot watch armed when a drag collapses a panel
#[derive(Debug, Clone, Copy, PartialEq)]
struct BoundaryWatch {
    panel: PanelId,
    threshold: f32,
}

/// Owns both splits and decides what is visible and how big
#[derive(Debug, Clone)]
pub struct PanelLayoutManager {
    outer: Split,
    inner: Split,
    threshold: f32,
    watches: Vec<BoundaryWatch>,
    width: f32,
    height: f32,
}

impl PanelLayoutManager {
    pub fn new(settings: &EditorSettings) -> Self {
        use constants::*;
        let min = settings.panel_min_size_px;
        let third = 1.0 / 3.0;

        Self {
            outer: Split::new(
                SplitOrientation::Vertical,
                vec![
                    PanelNode::new(PanelId::Files, FILES_WEIGHT, min),
                    PanelNode::new(PanelId::Editor, EDITOR_WEIGHT, EDITOR_MIN_WIDTH).fixed(),
                    PanelNode::new(PanelId::RightSide, RIGHT_SIDE_WEIGHT, min),
                ],
            ),
            inner: Split::new(
                SplitOrientation::Horizontal,
                vec![
                    PanelNode::new(PanelId::Memory, third, min),
                    PanelNode::new(PanelId::Machine, third, min),
                    PanelNode::new(PanelId::Terms, third, min),
                ],
            ),
            threshold: settings.collapse_threshold_px,
            watches: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }

    fn split_of(&self, id: PanelId) -> &Split {
        if self.inner.contains(id) {
            &self.inner
        } else {
            &self.outer
        }
    }

    fn split_of_mut(&mut self, id: PanelId) -> &mut Split {
        if self.inner.contains(id) {
            &mut self.inner
        } else {
            &mut self.outer
        }
    }

    /// The panel's own visibility flag
    pub fn is_visible(&self, id: PanelId) -> bool {
        self.split_of(id).node(id).is_some_and(|node| node.visible)
    }

    /// Whether the panel is actually on screen, taking the right-side
    /// container into account for the inner panels
    pub fn is_shown(&self, id: PanelId) -> bool {
        if self.inner.contains(id) && !self.is_visible(PanelId::RightSide) {
            return false;
        }
        self.is_visible(id)
    }

    pub fn affordance(&self, id: PanelId) -> Affordance {
        if self.is_visible(id) {
            Affordance::Collapse
        } else {
            Affordance::Expand
        }
    }

    /// New drags collapse below `px`; watches already armed keep theirs
    pub fn set_collapse_threshold(&mut self, px: f32) {
        self.threshold = px.max(0.0);
    }

    pub fn has_watch(&self, id: PanelId) -> bool {
        self.watches.iter().any(|watch| watch.panel == id)
    }

    pub fn collapse(&mut self, id: PanelId) -> bool {
        let collapsed = self.split_of_mut(id).collapse(id);
        if collapsed {
            debug!("Collapsed {:?}", id);
        }
        collapsed
    }

    pub fn expand(&mut self, id: PanelId) -> bool {
        self.watches.retain(|watch| watch.panel != id);
        let expanded = self.split_of_mut(id).expand(id);
        if expanded {
            debug!("Expanded {:?}", id);
        }
        expanded
    }

    pub fn toggle(&mut self, id: PanelId) -> bool {
        if self.is_visible(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    fn extent_of(&self, id: PanelId) -> f32 {
        if self.inner.contains(id) {
            self.height
        } else {
            self.width
        }
    }

    /// The user dragged a divider so that `id` now measures `px` along its
    /// split axis.
    ///
    /// Dropping a collapsible panel below the threshold collapses it and arms
    /// a one-shot watch; dragging it back above the threshold restores it,
    /// flips its affordance and disarms the watch.
    pub fn drag(&mut self, id: PanelId, px: f32) {
        let extent = self.extent_of(id);
        if extent <= 0.0 {
            debug!("Ignoring drag of {:?} before the first resize", id);
            return;
        }
        let Some(node) = self.split_of(id).node(id).cloned() else {
            return;
        };
        let px = px.clamp(0.0, extent);

        if let Some(threshold) = self.watch_threshold(id) {
            if px >= threshold {
                self.watches.retain(|watch| watch.panel != id);
                let split = self.split_of_mut(id);
                if let Some(node) = split.node_mut(id) {
                    node.visible = true;
                }
                split.set_weight(id, px / extent);
                info!("Restored {:?} after drag past {}px", id, threshold);
            }
            return;
        }

        if !node.visible {
            return;
        }

        if px < self.threshold {
            if node.collapsible {
                self.collapse(id);
                self.watches.push(BoundaryWatch {
                    panel: id,
                    threshold: self.threshold,
                });
                debug!("Armed boundary watch for {:?}", id);
            } else {
                let min = node.min_size.min(extent);
                self.split_of_mut(id).set_weight(id, min / extent);
            }
            return;
        }

        self.split_of_mut(id).set_weight(id, px / extent);
    }

    /// Threshold the watch on `id` is waiting for, if armed
    pub fn watch_threshold(&self, id: PanelId) -> Option<f32> {
        self.watches
            .iter()
            .find(|watch| watch.panel == id)
            .map(|watch| watch.threshold)
    }

    /// Container size changed. Returns a fresh layout pass, or `None` when
    /// the measured size is the same as before.
    pub fn resize(&mut self, event: ResizeEvent) -> Option<LayoutPass> {
        if event.width == self.width && event.height == self.height {
            return None;
        }
        self.width = event.width.max(0.0);
        self.height = event.height.max(0.0);
        Some(self.layout())
    }

    /// Compute panel sizes and grid columns.
    ///
    /// If every inner panel is hidden they are all shown again with equal
    /// weight: the right-side area is never left empty.
    pub fn layout(&mut self) -> LayoutPass {
        let restored_inner = self.inner.all_hidden();
        if restored_inner {
            info!("All right-side panels hidden, restoring them");
            self.inner.restore_all();
            let inner = &self.inner;
            self.watches.retain(|watch| !inner.contains(watch.panel));
        }
        self.outer.normalize();
        self.inner.normalize();

        let outer = self.outer.sizes(self.width);
        let inner_extent = if self.is_visible(PanelId::RightSide) {
            self.height
        } else {
            0.0
        };
        let inner = self.inner.sizes(inner_extent);

        let editor_width = outer
            .iter()
            .find(|size| size.id == PanelId::Editor)
            .map(|size| size.px)
            .unwrap_or(0.0);

        LayoutPass {
            outer,
            inner,
            grid: GridColumns::compute(editor_width),
            restored_inner,
        }
    }
}
