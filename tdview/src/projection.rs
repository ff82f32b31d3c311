//! Render projection: the node/edge element lists handed to the renderer.

use serde::Serialize;

use crate::geometry::Position;
use crate::model::{Donut, ElementKind, LayoutMode, Model};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeData {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawNode {
    pub data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawEdge {
    pub data: EdgeData,
}

impl DrawEdge {
    fn new(id: String, source: String, target: String) -> Self {
        DrawEdge { data: EdgeData { id, source, target } }
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }
}

/// One draw: persisted elements plus the diagnostic edges for this draw only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<DrawNode>,
    pub edges: Vec<DrawEdge>,
    pub diagnostics: Vec<DrawEdge>,
    pub layout: LayoutMode,
}

impl Scene {
    /// Persisted edges followed by diagnostic edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &DrawEdge> + '_ {
        self.edges.iter().chain(self.diagnostics.iter())
    }
}

/// Primal vertices followed by dual vertices.
pub fn nodes(model: &Model) -> Vec<DrawNode> {
    let primal = model.vertices().iter().map(|v| DrawNode {
        data: NodeData { id: v.element.clone() },
        position: v.position,
    });
    let dual = model.dual_vertices().iter().map(|v| DrawNode {
        data: NodeData { id: v.element.clone() },
        position: v.position,
    });
    primal.chain(dual).collect()
}

/// Primal arcs followed by dual arcs.
pub fn edges(model: &Model) -> Vec<DrawEdge> {
    let primal = model.arcs().iter().map(|a| {
        DrawEdge::new(
            a.element.clone(),
            ElementKind::Vertex.element(a.source),
            ElementKind::Vertex.element(a.target),
        )
    });
    let dual = model.dual_arcs().iter().map(|a| {
        DrawEdge::new(
            a.element.clone(),
            ElementKind::DualVertex.element(a.source),
            ElementKind::DualVertex.element(a.target),
        )
    });
    primal.chain(dual).collect()
}

/// Diagnostic edges for a donut's triangulation, numbered from `ta-0`.
pub fn diagnostic_edges(donut: &Donut) -> Vec<DrawEdge> {
    donut
        .triangulated_arcs
        .iter()
        .enumerate()
        .map(|(i, t)| {
            DrawEdge::new(
                ElementKind::Diagnostic.element(i as u32),
                ElementKind::Vertex.element(t.src),
                ElementKind::Vertex.element(t.dst),
            )
        })
        .collect()
}

/// Build the scene; `diagnostic` is the donut whose triangulation is shown.
pub fn project(model: &Model, diagnostic: Option<&Donut>) -> Scene {
    Scene {
        nodes: nodes(model),
        edges: edges(model),
        diagnostics: diagnostic.map(diagnostic_edges).unwrap_or_default(),
        layout: model.layout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Boundary, TriangulatedArc};

    #[test]
    fn diagnostic_ids_restart_each_projection() {
        let donut = Donut {
            boundary: Boundary::default(),
            triangulated_arcs: vec![TriangulatedArc { src: 0, dst: 2 }, TriangulatedArc { src: 1, dst: 3 }],
        };
        let first = diagnostic_edges(&donut);
        let second = diagnostic_edges(&donut);
        assert_eq!(first, second);
        assert_eq!(first[1].id(), "ta-1");
        assert_eq!(first[0].data.source, "v0");
        assert_eq!(first[0].data.target, "v2");
    }

    #[test]
    fn edge_serializes_in_renderer_shape() {
        let e = DrawEdge::new("a1".into(), "v0".into(), "v1".into());
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, serde_json::json!({"data": {"id": "a1", "source": "v0", "target": "v1"}}));
    }
}
