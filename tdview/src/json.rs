use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::ViewResult;

const LEGACY_RING_PREFIX: &str = "ring_arcs_";

/// Vertex reference as emitted by the solver: either `{"id": n}` or a bare `n`.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRef {
    Obj { id: u32 },
    Id(u32),
}

impl RawRef {
    pub fn id(self) -> u32 {
        match self {
            RawRef::Obj { id } | RawRef::Id(id) => id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawArc {
    pub id: u32,
    pub source: u32,
    pub target: u32,
    #[serde(default)]
    pub is_added: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawDualArc {
    pub id: u32,
    pub source: u32,
    pub target: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDualGraph {
    #[serde(default)]
    pub vertices: Vec<RawRef>,
    #[serde(default)]
    pub arcs: Vec<RawDualArc>,
    #[serde(default)]
    pub bags: Vec<Vec<RawRef>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawFace {
    pub id: u32,
    #[serde(default)]
    pub arcs: Vec<u32>,
    #[serde(default)]
    pub vertices: Vec<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRing {
    #[serde(default)]
    pub arcs: Vec<u32>,
    #[serde(default)]
    pub vertices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RawTriangulatedArc {
    pub src: u32,
    pub dst: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDonut {
    #[serde(default)]
    pub arcs: Vec<u32>,
    #[serde(default)]
    pub vertices: Vec<u32>,
    #[serde(default)]
    pub triangulated_arcs: Vec<RawTriangulatedArc>,
}

/// Structural payload produced by the solver.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub vertices: Vec<RawRef>,
    pub arcs: Vec<RawArc>,
    pub dualgraph: RawDualGraph,
    pub faces: Vec<RawFace>,
    pub rings: Vec<RawRing>,
    pub donuts: Vec<RawDonut>,
    pub spantree: Vec<u32>,
    pub mis: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// Solver run output shown next to the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    #[serde(default)]
    pub k: Option<u32>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

#[derive(Deserialize)]
struct DcelDe {
    #[serde(default)]
    vertices: Vec<RawRef>,
    #[serde(default)]
    arcs: Vec<RawArc>,
    #[serde(default)]
    dualgraph: RawDualGraph,
    #[serde(default)]
    faces: Vec<RawFace>,
    #[serde(default)]
    rings: Vec<RawRing>,
    #[serde(default)]
    donuts: Vec<RawDonut>,
    #[serde(default)]
    spantree: Vec<u32>,
    #[serde(default)]
    mis: Vec<u32>,
}

impl Dataset {
    pub fn from_json_str(s: &str) -> ViewResult<Dataset> {
        let v: Value = serde_json::from_str(s)?;
        Dataset::from_value(v)
    }

    /// Accepts the flat payload, the `{dcel, donuts, result}` solver
    /// envelope, and legacy `ring_arcs_N` ring fields.
    pub fn from_value(v: Value) -> ViewResult<Dataset> {
        let mut root = match v {
            Value::Object(m) => m,
            _ => return Err(not_an_object("dataset").into()),
        };
        let envelope_donuts = root.remove("donuts");
        let envelope_mis = root
            .get("result")
            .and_then(|r| r.get("mis"))
            .cloned();
        let mut base = match root.remove("dcel") {
            Some(Value::Object(dcel)) => dcel,
            Some(_) => return Err(not_an_object("dcel").into()),
            None => {
                if let Some(d) = envelope_donuts.clone() {
                    root.insert("donuts".into(), d);
                }
                root
            }
        };
        let legacy_rings = take_legacy_rings(&mut base)?;
        let de: DcelDe = serde_json::from_value(Value::Object(base))?;

        let mut ds = Dataset {
            vertices: de.vertices,
            arcs: de.arcs,
            dualgraph: de.dualgraph,
            faces: de.faces,
            rings: de.rings,
            donuts: de.donuts,
            spantree: de.spantree,
            mis: de.mis,
        };
        if ds.donuts.is_empty() {
            if let Some(d) = envelope_donuts {
                ds.donuts = serde_json::from_value(d)?;
            }
        }
        if ds.mis.is_empty() {
            if let Some(m) = envelope_mis {
                ds.mis = serde_json::from_value(m)?;
            }
        }
        if ds.rings.is_empty() && !legacy_rings.is_empty() {
            ds.rings = rings_from_arc_lists(&ds.arcs, legacy_rings);
        }
        Ok(ds)
    }
}

fn not_an_object(what: &str) -> serde_json::Error {
    <serde_json::Error as serde::de::Error>::custom(format!("{what} must be a JSON object"))
}

fn take_legacy_rings(base: &mut Map<String, Value>) -> ViewResult<Vec<Vec<u32>>> {
    let mut keyed: Vec<(usize, String)> = base
        .keys()
        .filter_map(|k| {
            k.strip_prefix(LEGACY_RING_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .map(|n| (n, k.clone()))
        })
        .collect();
    keyed.sort_by_key(|(n, _)| *n);
    let mut out = Vec::with_capacity(keyed.len());
    for (_, key) in keyed {
        if let Some(v) = base.remove(&key) {
            out.push(serde_json::from_value::<Vec<u32>>(v)?);
        }
    }
    Ok(out)
}

// Ring vertices are the arc endpoints in first-seen order. Unknown arcs are
// kept so the builder reports them as dangling references.
fn rings_from_arc_lists(arcs: &[RawArc], lists: Vec<Vec<u32>>) -> Vec<RawRing> {
    let ends: HashMap<u32, (u32, u32)> = arcs.iter().map(|a| (a.id, (a.source, a.target))).collect();
    lists
        .into_iter()
        .map(|ring_arcs| {
            let mut vertices = Vec::new();
            for a in &ring_arcs {
                if let Some(&(s, t)) = ends.get(a) {
                    for v in [s, t] {
                        if !vertices.contains(&v) {
                            vertices.push(v);
                        }
                    }
                }
            }
            RawRing { arcs: ring_arcs, vertices }
        })
        .collect()
}

/// Parse a layout payload. Blank input means "no layout".
pub fn parse_layout(s: &str) -> ViewResult<Vec<LayoutPoint>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(s)?)
}

/// Response of a solver run: the graph and layout arrive as JSON strings.
#[derive(Deserialize)]
struct RunResponseDe {
    #[serde(default)]
    k: Option<u32>,
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    graph: String,
    #[serde(default)]
    layout: String,
}

pub fn parse_run_response(s: &str) -> ViewResult<(Dataset, Vec<LayoutPoint>, Diagnostics)> {
    let r: RunResponseDe = serde_json::from_str(s)?;
    let dataset = Dataset::from_json_str(&r.graph)?;
    let layout = parse_layout(&r.layout)?;
    Ok((dataset, layout, Diagnostics { k: r.k, stdout: r.stdout, stderr: r.stderr }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_lifts_donuts_and_mis() {
        let v = json!({
            "dcel": {
                "vertices": [{"id": 0}, {"id": 1}],
                "arcs": [{"id": 0, "source": 0, "target": 1}],
                "dualgraph": {"vertices": [], "arcs": [], "bags": []},
                "faces": [],
                "rings": [],
                "spantree": [0]
            },
            "donuts": [{"arcs": [0], "vertices": [0, 1], "triangulated_arcs": [{"src": 0, "dst": 1}]}],
            "result": {"mis": [1]}
        });
        let ds = Dataset::from_value(v).unwrap();
        assert_eq!(ds.donuts.len(), 1);
        assert_eq!(ds.donuts[0].triangulated_arcs.len(), 1);
        assert_eq!(ds.mis, vec![1]);
        assert_eq!(ds.spantree, vec![0]);
        assert!(!ds.arcs[0].is_added);
    }

    #[test]
    fn legacy_ring_fields_become_rings_in_index_order() {
        let v = json!({
            "vertices": [{"id": 0}, {"id": 1}, {"id": 2}],
            "arcs": [
                {"id": 0, "source": 0, "target": 1},
                {"id": 1, "source": 1, "target": 2}
            ],
            "dualgraph": {},
            "faces": [],
            "ring_arcs_10": [1],
            "ring_arcs_2": [0]
        });
        let ds = Dataset::from_value(v).unwrap();
        assert_eq!(ds.rings.len(), 2);
        assert_eq!(ds.rings[0].arcs, vec![0]);
        assert_eq!(ds.rings[0].vertices, vec![0, 1]);
        assert_eq!(ds.rings[1].vertices, vec![1, 2]);
    }

    #[test]
    fn bags_accept_objects_and_bare_ids() {
        let v = json!({"dualgraph": {"bags": [[{"id": 3}, 4]]}});
        let ds = Dataset::from_value(v).unwrap();
        let ids: Vec<u32> = ds.dualgraph.bags[0].iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn blank_layout_is_empty() {
        assert!(parse_layout("").unwrap().is_empty());
        assert_eq!(parse_layout("[{\"id\":0,\"x\":1.0,\"y\":2.0}]").unwrap().len(), 1);
    }

    #[test]
    fn run_response_unwraps_nested_json() {
        let graph = json!({"vertices": [{"id": 0}]}).to_string();
        let body = json!({"k": 2, "stdout": "ok", "stderr": "", "graph": graph, "layout": "[]"});
        let (ds, layout, diag) = parse_run_response(&body.to_string()).unwrap();
        assert_eq!(ds.vertices.len(), 1);
        assert!(layout.is_empty());
        assert_eq!(diag.k, Some(2));
        assert_eq!(diag.stdout, "ok");
    }

    #[test]
    fn non_object_payload_is_json_error() {
        assert!(matches!(Dataset::from_json_str("[1,2]"), Err(crate::ViewError::Json(_))));
    }
}
