//! Collapsible three-way splits built from panel nodes

use serde::Serialize;

/// Panels managed by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelId {
    Files,
    Editor,
    RightSide,
    Memory,
    Machine,
    Terms,
}

/// Direction of the dividers in a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// Vertical dividers, children side by side; sizes are widths
    Vertical,
    /// Horizontal dividers, children stacked; sizes are heights
    Horizontal,
}

/// One collapsible panel inside a split
#[derive(Debug, Clone, PartialEq)]
pub struct PanelNode {
    pub id: PanelId,
    pub visible: bool,
    pub collapsible: bool,
    /// Minimum size in pixels while visible
    pub min_size: f32,
    /// Share of the split while visible
    pub weight: f32,
    /// Weight held the last time the panel was visible
    pub last_visible_weight: f32,
}

impl PanelNode {
    pub fn new(id: PanelId, weight: f32, min_size: f32) -> Self {
        Self {
            id,
            visible: true,
            collapsible: true,
            min_size,
            weight,
            last_visible_weight: weight,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.collapsible = false;
        self
    }
}

/// Computed size of one panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSize {
    pub id: PanelId,
    pub visible: bool,
    pub weight: f32,
    pub px: f32,
}

/// A row or column of panels sharing one axis
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub orientation: SplitOrientation,
    pub nodes: Vec<PanelNode>,
}

impl Split {
    pub fn new(orientation: SplitOrientation, nodes: Vec<PanelNode>) -> Self {
        let mut split = Self { orientation, nodes };
        split.normalize();
        split
    }

    pub fn node(&self, id: PanelId) -> Option<&PanelNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: PanelId) -> Option<&mut PanelNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.node(id).is_some()
    }

    pub fn all_hidden(&self) -> bool {
        self.nodes.iter().all(|node| !node.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.visible).count()
    }

    /// Hide `id`, remembering its weight. Returns false if it cannot be or
    /// already is hidden.
    pub fn collapse(&mut self, id: PanelId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if !node.collapsible || !node.visible {
            return false;
        }
        node.last_visible_weight = node.weight;
        node.visible = false;
        node.weight = 0.0;
        self.normalize();
        true
    }

    /// Show `id` again at its last visible weight
    pub fn expand(&mut self, id: PanelId) -> bool {
        let share = 1.0 / (self.visible_count() + 1) as f32;
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.visible {
            return false;
        }
        node.visible = true;
        let weight = if node.last_visible_weight > 0.0 {
            node.last_visible_weight
        } else {
            share
        };
        self.set_weight(id, weight);
        true
    }

    /// Show every panel with the same weight
    pub fn restore_all(&mut self) {
        let share = 1.0 / self.nodes.len().max(1) as f32;
        for node in &mut self.nodes {
            node.visible = true;
            node.weight = share;
            node.last_visible_weight = share;
        }
    }

    /// Give `id` the share `weight` and scale the other visible panels
    /// proportionally into what is left
    pub fn set_weight(&mut self, id: PanelId, weight: f32) {
        let weight = weight.clamp(0.0, 1.0);
        let others: f32 = self
            .nodes
            .iter()
            .filter(|node| node.visible && node.id != id)
            .map(|node| node.weight)
            .sum();
        let remaining = 1.0 - weight;

        for node in &mut self.nodes {
            if node.id == id {
                node.weight = weight;
            } else if node.visible {
                node.weight = if others > 0.0 {
                    node.weight / others * remaining
                } else {
                    0.0
                };
            }
        }
        self.normalize();
    }

    /// Make visible weights sum to 1; hidden panels weigh 0
    pub fn normalize(&mut self) {
        for node in self.nodes.iter_mut().filter(|node| !node.visible) {
            node.weight = 0.0;
        }
        let total: f32 = self.nodes.iter().map(|node| node.weight).sum();
        let visible = self.visible_count();
        for node in self.nodes.iter_mut().filter(|node| node.visible) {
            node.weight = if total > 0.0 {
                node.weight / total
            } else {
                1.0 / visible as f32
            };
        }
    }

    /// Pixel sizes over `extent`, honouring each visible panel's minimum
    /// where the extent allows it
    pub fn sizes(&self, extent: f32) -> Vec<PanelSize> {
        let mut px: Vec<f32> = self
            .nodes
            .iter()
            .map(|node| if node.visible { extent * node.weight } else { 0.0 })
            .collect();

        let deficit: f32 = self
            .nodes
            .iter()
            .zip(&px)
            .filter(|(node, size)| node.visible && **size < node.min_size)
            .map(|(node, size)| node.min_size - size)
            .sum();
        let surplus: f32 = self
            .nodes
            .iter()
            .zip(&px)
            .filter(|(node, size)| node.visible && **size > node.min_size)
            .map(|(node, size)| size - node.min_size)
            .sum();

        if deficit > 0.0 && surplus >= deficit {
            for (node, size) in self.nodes.iter().zip(px.iter_mut()) {
                if !node.visible {
                    continue;
                }
                if *size < node.min_size {
                    *size = node.min_size;
                } else {
                    *size -= (*size - node.min_size) / surplus * deficit;
                }
            }
        }

        self.nodes
            .iter()
            .zip(px)
            .map(|(node, px)| PanelSize {
                id: node.id,
                visible: node.visible,
                weight: node.weight,
                px,
            })
            .collect()
    }
}
