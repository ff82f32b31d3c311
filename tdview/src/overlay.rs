//! Independent boolean overlays applied over fixed element sets.

use serde::Serialize;
use tracing::debug;

use crate::model::Model;
use crate::style::Category;
use crate::surface::Painter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    TreeDecomposition,
    SpanningTree,
    AugmentedEdges,
    IndependentSet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub td_visible: bool,
    pub spanning_tree: bool,
    pub augmented_edges: bool,
    pub independent_set: bool,
    /// Diagnostic triangulation edges of the selected donut are drawn.
    pub donut_triangulation: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        OverlayState {
            td_visible: true,
            spanning_tree: false,
            augmented_edges: false,
            independent_set: false,
            donut_triangulation: false,
        }
    }
}

impl OverlayState {
    /// Whether the overlay's category is currently applied.
    pub fn is_applied(&self, overlay: Overlay) -> bool {
        match overlay {
            // Hiding is what gets applied.
            Overlay::TreeDecomposition => !self.td_visible,
            Overlay::SpanningTree => self.spanning_tree,
            Overlay::AugmentedEdges => self.augmented_edges,
            Overlay::IndependentSet => self.independent_set,
        }
    }
}

/// Flip one overlay and apply or remove its category over its whole
/// element set. Returns the new "applied" state.
pub fn toggle(state: &mut OverlayState, overlay: Overlay, model: &Model, painter: &mut Painter<'_>) -> bool {
    let (flag, category) = match overlay {
        Overlay::TreeDecomposition => (&mut state.td_visible, Category::Hidden),
        Overlay::SpanningTree => (&mut state.spanning_tree, Category::SpanningTree),
        Overlay::AugmentedEdges => (&mut state.augmented_edges, Category::Augmented),
        Overlay::IndependentSet => (&mut state.independent_set, Category::Result),
    };
    *flag = !*flag;
    let applied = state.is_applied(overlay);
    let ids: Vec<&str> = match overlay {
        Overlay::TreeDecomposition => model.dual_elements().collect(),
        Overlay::SpanningTree => model.spanning_tree_elements().iter().map(String::as_str).collect(),
        Overlay::AugmentedEdges => model.augmented_elements().iter().map(String::as_str).collect(),
        Overlay::IndependentSet => model.mis_elements().iter().map(String::as_str).collect(),
    };
    if applied {
        painter.apply(ids, category);
    } else {
        painter.clear(ids, category);
    }
    debug!(?overlay, applied, "overlay toggled");
    applied
}
