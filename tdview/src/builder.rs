//! Entity builder: validates a solver dataset and turns it into a [`Model`].
//!
//! Every id reference is checked against its primary collection before any
//! derived structure is produced, so a dataset either yields a complete model
//! or an error and nothing else.

use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::config::DisplayOptions;
use crate::error::Malformed;
use crate::geometry::{centroid, scale_layout_point, Position};
use crate::json::{Dataset, LayoutPoint, RawFace};
use crate::limits;
use crate::model::{
    Arc, Bag, Boundary, DualArc, DualVertex, Donut, ElementKind, Face, LayoutMode, Model, Ring,
    TriangulatedArc, Vertex,
};
use crate::{ViewError, ViewResult};

struct Index {
    vertices: HashMap<u32, usize>,
    arcs: HashMap<u32, usize>,
}

impl Index {
    fn vertex(&self, owner: impl FnOnce() -> String, id: u32) -> ViewResult<usize> {
        self.vertices.get(&id).copied().ok_or_else(|| dangling(owner(), "vertex", id))
    }

    fn arc(&self, owner: impl FnOnce() -> String, id: u32) -> ViewResult<usize> {
        self.arcs.get(&id).copied().ok_or_else(|| dangling(owner(), "arc", id))
    }

    fn boundary(&self, owner: &str, arcs: &[u32], vertices: &[u32]) -> ViewResult<Boundary> {
        for &a in arcs {
            self.arc(|| owner.to_string(), a)?;
        }
        for &v in vertices {
            self.vertex(|| owner.to_string(), v)?;
        }
        Ok(Boundary::new(arcs.to_vec(), vertices.to_vec()))
    }
}

fn dangling(owner: String, kind: &'static str, id: u32) -> ViewError {
    Malformed::Dangling { owner, kind, id }.into()
}

fn index_unique<I>(kind: &'static str, ids: I) -> ViewResult<HashMap<u32, usize>>
where
    I: IntoIterator<Item = u32>,
{
    let mut map = HashMap::new();
    for (i, id) in ids.into_iter().enumerate() {
        if map.insert(id, i).is_some() {
            return Err(Malformed::Duplicate { kind, id }.into());
        }
    }
    Ok(map)
}

/// Display position of a face's dual vertex: the centroid of the face's
/// vertex positions.
pub fn face_centroid(
    face_index: usize,
    face: &Face,
    vertices: &[Vertex],
    vertex_index: &HashMap<u32, usize>,
) -> ViewResult<Option<Position>> {
    let mut points = Vec::with_capacity(face.boundary.vertices.len());
    for &v in &face.boundary.vertices {
        let pos = vertex_index
            .get(&v)
            .and_then(|&i| vertices[i].position)
            .ok_or(ViewError::MissingLayout { face: face_index, vertex: v })?;
        points.push(pos);
    }
    Ok(centroid(points))
}

pub fn build(ds: &Dataset, layout: &[LayoutPoint], opts: &DisplayOptions) -> ViewResult<Model> {
    limits::check_cap("vertices", ds.vertices.len(), limits::MAX_VERTICES)?;
    limits::check_cap("arcs", ds.arcs.len(), limits::MAX_ARCS)?;
    limits::check_cap("faces", ds.faces.len(), limits::MAX_FACES)?;
    limits::check_cap("layout points", layout.len(), limits::MAX_LAYOUT_POINTS)?;

    let face_count = ds.faces.len();
    let idx = Index {
        vertices: index_unique("vertex", ds.vertices.iter().map(|v| v.id()))?,
        arcs: index_unique("arc", ds.arcs.iter().map(|a| a.id))?,
    };

    let mut vertices: Vec<Vertex> = ds
        .vertices
        .iter()
        .map(|v| Vertex { id: v.id(), element: ElementKind::Vertex.element(v.id()), position: None })
        .collect();

    let mut arcs = Vec::with_capacity(ds.arcs.len());
    for a in &ds.arcs {
        let owner = || format!("arc {}", a.id);
        idx.vertex(owner, a.source)?;
        idx.vertex(owner, a.target)?;
        if a.source == a.target {
            return Err(Malformed::SelfLoop { arc: a.id, vertex: a.source }.into());
        }
        arcs.push(Arc {
            id: a.id,
            source: a.source,
            target: a.target,
            augmented: a.is_added,
            element: ElementKind::Arc.element(a.id),
        });
    }

    // Dual graph
    let dual = &ds.dualgraph;
    if dual.vertices.len() != face_count {
        return Err(Malformed::CountMismatch {
            what: "dual vertex",
            got: dual.vertices.len(),
            faces: face_count,
        }
        .into());
    }
    if dual.bags.len() != face_count {
        return Err(Malformed::CountMismatch { what: "bag", got: dual.bags.len(), faces: face_count }.into());
    }
    let dual_index = index_unique("dual vertex", dual.vertices.iter().map(|v| v.id()))?;
    index_unique("dual arc", dual.arcs.iter().map(|a| a.id))?;
    let mut dual_vertices: Vec<DualVertex> = dual
        .vertices
        .iter()
        .map(|v| DualVertex { id: v.id(), element: ElementKind::DualVertex.element(v.id()), position: None })
        .collect();
    let mut dual_arcs = Vec::with_capacity(dual.arcs.len());
    for a in &dual.arcs {
        for end in [a.source, a.target] {
            if !dual_index.contains_key(&end) {
                return Err(dangling(format!("dual arc {}", a.id), "dual vertex", end));
            }
        }
        dual_arcs.push(DualArc {
            id: a.id,
            source: a.source,
            target: a.target,
            element: ElementKind::DualArc.element(a.id),
        });
    }

    let mut bags = Vec::with_capacity(face_count);
    for (i, bag) in dual.bags.iter().enumerate() {
        let ids: Vec<u32> = bag.iter().map(|r| r.id()).collect();
        for &v in &ids {
            idx.vertex(|| format!("bag {i}"), v)?;
        }
        let vertex_elements = ids.iter().map(|&v| ElementKind::Vertex.element(v)).collect();
        bags.push(Bag { vertices: ids, vertex_elements });
    }

    let mut faces = Vec::with_capacity(face_count);
    for f in &ds.faces {
        let boundary = idx.boundary(&format!("face {}", f.id), &f.arcs, &f.vertices)?;
        if !is_closed_walk(f, ds, &idx) {
            warn!(face = f.id, "face arcs do not form a closed walk");
        }
        faces.push(Face { id: f.id, boundary });
    }

    let mut rings = Vec::with_capacity(ds.rings.len());
    let mut ring_of_arc: HashMap<u32, usize> = HashMap::new();
    for (i, r) in ds.rings.iter().enumerate() {
        let boundary = idx.boundary(&format!("ring {i}"), &r.arcs, &r.vertices)?;
        for &a in &r.arcs {
            match ring_of_arc.insert(a, i) {
                Some(first) if first != i => {
                    return Err(Malformed::RingOverlap { arc: a, first, second: i }.into());
                }
                _ => {}
            }
        }
        rings.push(Ring { boundary });
    }

    let mut donuts = Vec::with_capacity(ds.donuts.len());
    for (i, d) in ds.donuts.iter().enumerate() {
        limits::check_cap(
            "triangulated arcs per donut",
            d.triangulated_arcs.len(),
            limits::MAX_TRIANGULATED_ARCS_PER_DONUT,
        )?;
        let owner = format!("donut {i}");
        let boundary = idx.boundary(&owner, &d.arcs, &d.vertices)?;
        let mut triangulated_arcs = Vec::with_capacity(d.triangulated_arcs.len());
        for t in &d.triangulated_arcs {
            idx.vertex(|| owner.clone(), t.src)?;
            idx.vertex(|| owner.clone(), t.dst)?;
            triangulated_arcs.push(TriangulatedArc { src: t.src, dst: t.dst });
        }
        donuts.push(Donut { boundary, triangulated_arcs });
    }

    let mut spanning_tree = Vec::with_capacity(ds.spantree.len());
    for &a in &ds.spantree {
        idx.arc(|| "spanning tree".to_string(), a)?;
        spanning_tree.push(ElementKind::Arc.element(a));
    }

    let mut seen = HashSet::new();
    let mut mis = Vec::with_capacity(ds.mis.len());
    for &v in &ds.mis {
        idx.vertex(|| "independent set".to_string(), v)?;
        if seen.insert(v) {
            mis.push(v);
        }
    }
    let mis_elements = mis.iter().map(|&v| ElementKind::Vertex.element(v)).collect();

    for p in layout {
        let i = idx.vertex(|| "layout".to_string(), p.id)?;
        if !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y) {
            return Err(Malformed::BadCoordinate { vertex: p.id }.into());
        }
        vertices[i].position = Some(scale_layout_point(p.x, p.y, opts.layout_factor));
    }

    let layout_mode = if layout.is_empty() {
        LayoutMode::Grid
    } else {
        for (i, face) in faces.iter().enumerate() {
            dual_vertices[i].position = face_centroid(i, face, &vertices, &idx.vertices)?;
        }
        LayoutMode::Preset
    };

    let augmented = arcs.iter().filter(|a| a.augmented).map(|a| a.element.clone()).collect();

    Ok(Model {
        vertices,
        arcs,
        dual_vertices,
        dual_arcs,
        faces,
        bags,
        rings,
        donuts,
        spanning_tree,
        augmented,
        mis,
        mis_elements,
        layout: layout_mode,
    })
}

fn is_closed_walk(face: &RawFace, ds: &Dataset, idx: &Index) -> bool {
    let n = face.arcs.len();
    if n == 0 {
        return true;
    }
    let ends = |a: u32| idx.arcs.get(&a).map(|&i| (ds.arcs[i].source, ds.arcs[i].target));
    (0..n).all(|k| match (ends(face.arcs[k]), ends(face.arcs[(k + 1) % n])) {
        (Some((_, t)), Some((s, _))) => t == s,
        _ => false,
    })
}
