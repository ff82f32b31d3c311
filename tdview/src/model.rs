use serde::Serialize;

use crate::geometry::Position;

/// Element kinds addressable on the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Vertex,
    Arc,
    DualVertex,
    DualArc,
    Diagnostic,
}

impl ElementKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ElementKind::Vertex => "v",
            ElementKind::Arc => "a",
            ElementKind::DualVertex => "dv",
            ElementKind::DualArc => "da",
            ElementKind::Diagnostic => "ta-",
        }
    }

    /// Element id for a dataset id, e.g. vertex 3 -> "v3".
    pub fn element(self, id: u32) -> String {
        format!("{}{}", self.prefix(), id)
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: u32,
    pub element: String,
    pub position: Option<Position>,
}

#[derive(Clone, Debug)]
pub struct Arc {
    pub id: u32,
    pub source: u32,
    pub target: u32,
    pub augmented: bool,
    pub element: String,
}

#[derive(Clone, Debug)]
pub struct DualVertex {
    pub id: u32,
    pub element: String,
    pub position: Option<Position>,
}

#[derive(Clone, Debug)]
pub struct DualArc {
    pub id: u32,
    pub source: u32,
    pub target: u32,
    pub element: String,
}

/// Arcs and vertices of a face walk, ring level or donut rim,
/// together with their element ids.
#[derive(Clone, Debug, Default)]
pub struct Boundary {
    pub arcs: Vec<u32>,
    pub vertices: Vec<u32>,
    pub arc_elements: Vec<String>,
    pub vertex_elements: Vec<String>,
}

impl Boundary {
    pub fn new(arcs: Vec<u32>, vertices: Vec<u32>) -> Self {
        let arc_elements = arcs.iter().map(|&a| ElementKind::Arc.element(a)).collect();
        let vertex_elements = vertices
            .iter()
            .map(|&v| ElementKind::Vertex.element(v))
            .collect();
        Boundary { arcs, vertices, arc_elements, vertex_elements }
    }

    /// Arc elements followed by vertex elements.
    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.arc_elements
            .iter()
            .chain(self.vertex_elements.iter())
            .map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub id: u32,
    pub boundary: Boundary,
}

#[derive(Clone, Debug, Default)]
pub struct Bag {
    pub vertices: Vec<u32>,
    pub vertex_elements: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Ring {
    pub boundary: Boundary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangulatedArc {
    pub src: u32,
    pub dst: u32,
}

#[derive(Clone, Debug)]
pub struct Donut {
    pub boundary: Boundary,
    pub triangulated_arcs: Vec<TriangulatedArc>,
}

/// How the renderer should place nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Positions come from the layout payload and face centroids.
    Preset,
    /// No layout payload; the renderer lays nodes out itself.
    Grid,
}

/// Immutable in-memory view of one loaded dataset.
#[derive(Clone, Debug)]
pub struct Model {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) dual_vertices: Vec<DualVertex>,
    pub(crate) dual_arcs: Vec<DualArc>,
    pub(crate) faces: Vec<Face>,
    pub(crate) bags: Vec<Bag>,
    pub(crate) rings: Vec<Ring>,
    pub(crate) donuts: Vec<Donut>,
    pub(crate) spanning_tree: Vec<String>,
    pub(crate) augmented: Vec<String>,
    pub(crate) mis: Vec<u32>,
    pub(crate) mis_elements: Vec<String>,
    pub(crate) layout: LayoutMode,
}

impl Model {
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }
    pub fn arcs(&self) -> &[Arc] { &self.arcs }
    pub fn dual_vertices(&self) -> &[DualVertex] { &self.dual_vertices }
    pub fn dual_arcs(&self) -> &[DualArc] { &self.dual_arcs }
    pub fn faces(&self) -> &[Face] { &self.faces }
    pub fn bags(&self) -> &[Bag] { &self.bags }
    pub fn rings(&self) -> &[Ring] { &self.rings }
    pub fn donuts(&self) -> &[Donut] { &self.donuts }
    pub fn mis(&self) -> &[u32] { &self.mis }
    pub fn layout(&self) -> LayoutMode { self.layout }

    /// Element ids of the spanning-tree arcs.
    pub fn spanning_tree_elements(&self) -> &[String] { &self.spanning_tree }

    /// Element ids of arcs the solver added during triangulation.
    pub fn augmented_elements(&self) -> &[String] { &self.augmented }

    pub fn mis_elements(&self) -> &[String] { &self.mis_elements }

    /// Every dual vertex and dual arc element id.
    pub fn dual_elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.dual_vertices
            .iter()
            .map(|v| v.element.as_str())
            .chain(self.dual_arcs.iter().map(|a| a.element.as_str()))
    }
}
