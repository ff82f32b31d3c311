use proptest::prelude::*;
use serde_json::json;
use tdview::navigator::{step, NONE};
use tdview::{Action, NullSurface, Overlay, Viewer};

// A fan of `n` triangles around vertex 0; every face has its own bag and ring.
fn fan(n: u32) -> serde_json::Value {
    let vertices: Vec<_> = (0..=n + 1).map(|i| json!({"id": i})).collect();
    let mut arcs = Vec::new();
    let mut faces = Vec::new();
    let mut bags = Vec::new();
    let mut rings = Vec::new();
    for f in 0..n {
        let (a, b) = (f + 1, f + 2);
        let base = 3 * f;
        arcs.push(json!({"id": base, "source": 0, "target": a}));
        arcs.push(json!({"id": base + 1, "source": a, "target": b, "is_added": f % 2 == 0}));
        arcs.push(json!({"id": base + 2, "source": b, "target": 0}));
        faces.push(json!({"id": f, "arcs": [base, base + 1, base + 2], "vertices": [0, a, b]}));
        bags.push(json!([{"id": 0}, {"id": a}, {"id": b}]));
        rings.push(json!({"arcs": [base + 1], "vertices": [a, b]}));
    }
    let dual: Vec<_> = (0..n).map(|i| json!({"id": i})).collect();
    let spantree: Vec<u32> = (0..n).map(|f| 3 * f).collect();
    json!({
        "vertices": vertices,
        "arcs": arcs,
        "dualgraph": {"vertices": dual, "arcs": [], "bags": bags},
        "faces": faces,
        "rings": rings,
        "donuts": [],
        "spantree": spantree,
        "mis": [0]
    })
}

fn action_strategy() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::all().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn pointer_stays_in_bounds(n in 0isize..12, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
        let max = n - 1;
        let mut cur = NONE;
        for forward in moves {
            cur = step(cur, max, &mut (), |_, _| Ok(()), |_, _| {}, forward).unwrap();
            prop_assert!(cur >= NONE && cur <= max);
        }
    }

    #[test]
    fn n_plus_one_forward_steps_return_to_none(n in 0isize..20) {
        let mut cur = NONE;
        for _ in 0..=n {
            cur = step(cur, n - 1, &mut (), |_, _| Ok(()), |_, _| {}, true).unwrap();
        }
        prop_assert_eq!(cur, NONE);
    }

    #[test]
    fn face_dual_bag_counts_agree(n in 0u32..8) {
        let mut viewer = Viewer::default();
        viewer.load_json(&fan(n).to_string(), "", &mut NullSurface).unwrap();
        let m = viewer.model().unwrap();
        prop_assert_eq!(m.faces().len(), n as usize);
        prop_assert_eq!(m.dual_vertices().len(), m.faces().len());
        prop_assert_eq!(m.bags().len(), m.faces().len());
    }

    #[test]
    fn overlay_toggled_twice_restores_membership(
        n in 1u32..6,
        prefix in proptest::collection::vec(action_strategy(), 0..16),
        overlay in proptest::sample::select(vec![
            Overlay::TreeDecomposition,
            Overlay::SpanningTree,
            Overlay::AugmentedEdges,
            Overlay::IndependentSet,
        ]),
    ) {
        let mut viewer = Viewer::default();
        let mut s = NullSurface;
        viewer.load_json(&fan(n).to_string(), "", &mut s).unwrap();
        for a in prefix {
            viewer.dispatch(a, &mut s).unwrap();
        }
        let before = viewer.explorer().unwrap().classes().clone();
        viewer.dispatch(Action::Toggle(overlay), &mut s).unwrap();
        viewer.dispatch(Action::Toggle(overlay), &mut s).unwrap();
        prop_assert_eq!(viewer.explorer().unwrap().classes(), &before);
    }

    #[test]
    fn lowlight_then_highlight_equals_highlight(n in 1u32..6, idx in 0u32..6) {
        let idx = idx % n;
        let mut s = NullSurface;
        let mut a = Viewer::default();
        a.load_json(&fan(n).to_string(), "", &mut s).unwrap();
        let mut b = Viewer::default();
        b.load_json(&fan(n).to_string(), "", &mut s).unwrap();
        for _ in 0..=idx {
            a.dispatch_label("NEXT_FACE", &mut s).unwrap();
            b.dispatch_label("NEXT_FACE", &mut s).unwrap();
        }
        // b: step away and back, which lowlights and re-highlights idx
        b.dispatch_label("NEXT_FACE", &mut s).unwrap();
        b.dispatch_label("PREV_FACE", &mut s).unwrap();
        prop_assert_eq!(a.navigation(), b.navigation());
        prop_assert_eq!(a.explorer().unwrap().classes(), b.explorer().unwrap().classes());
    }
}
