//! Highlight categories and the stylesheet handed to the renderer.
//!
//! Every navigator and overlay writes exactly one category, and each category
//! owns a distinct class name. Overlaps on one element are resolved by the
//! renderer from rule order, which follows [`Category::priority`].

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::DisplayOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    TreeDecomposition,
    SpanningTree,
    Augmented,
    Ring,
    Donut,
    Bag,
    Highlighted,
    Result,
    Hidden,
}

/// Which element groups a category's rule targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Nodes,
    Edges,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    Fine,
    Medium,
    Thick,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::TreeDecomposition,
        Category::SpanningTree,
        Category::Augmented,
        Category::Ring,
        Category::Donut,
        Category::Bag,
        Category::Highlighted,
        Category::Result,
        Category::Hidden,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Category::TreeDecomposition => "td",
            Category::SpanningTree => "spanning-tree",
            Category::Augmented => "augmented",
            Category::Ring => "ring",
            Category::Donut => "donut",
            Category::Bag => "bag",
            Category::Highlighted => "highlighted",
            Category::Result => "mis",
            Category::Hidden => "invisible",
        }
    }

    pub fn from_class_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.class_name() == name)
    }

    /// Later rules win in the renderer.
    pub fn priority(self) -> u8 {
        match self {
            Category::TreeDecomposition => 0,
            Category::SpanningTree => 1,
            Category::Augmented => 2,
            Category::Ring => 3,
            Category::Donut => 4,
            Category::Bag => 5,
            Category::Highlighted => 6,
            Category::Result => 7,
            Category::Hidden => 8,
        }
    }

    pub fn target(self) -> Target {
        match self {
            Category::SpanningTree | Category::Augmented => Target::Edges,
            Category::Bag | Category::Result => Target::Nodes,
            _ => Target::Both,
        }
    }

    pub fn color(self) -> Option<&'static str> {
        match self {
            Category::TreeDecomposition => Some("#ff00ff"),
            Category::SpanningTree => Some("#000000"),
            Category::Augmented => Some("#00aa00"),
            Category::Ring => Some("#0000ff"),
            Category::Donut => Some("#ff0000"),
            Category::Bag => Some("#00ff00"),
            Category::Highlighted => Some("#61bffc"),
            Category::Result => Some("#ffff00"),
            Category::Hidden => None,
        }
    }

    pub fn weight(self) -> Weight {
        match self {
            Category::TreeDecomposition => Weight::Medium,
            Category::Hidden => Weight::Fine,
            _ => Weight::Thick,
        }
    }
}

/// True when no two categories share a class name.
pub fn registry_is_consistent() -> bool {
    let mut names: Vec<&str> = Category::ALL.iter().map(|c| c.class_name()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    names.len() == before
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub style: Value,
}

fn width(w: Weight, opts: &DisplayOptions) -> f64 {
    match w {
        Weight::Fine => opts.fine_edge,
        Weight::Medium => opts.medium_edge,
        Weight::Thick => opts.thick_edge,
    }
}

fn transition(style: &mut Map<String, Value>) {
    style.insert(
        "transition-property".into(),
        json!("background-color, line-color, target-arrow-color"),
    );
    style.insert("transition-duration".into(), json!("0.5s"));
}

fn node_style(color: &str) -> Value {
    let mut s = Map::new();
    s.insert("color".into(), json!(color));
    s.insert("background-color".into(), json!(color));
    transition(&mut s);
    Value::Object(s)
}

fn edge_style(color: &str, w: f64) -> Value {
    let mut s = Map::new();
    s.insert("background-color".into(), json!(color));
    s.insert("line-color".into(), json!(color));
    s.insert("target-arrow-color".into(), json!(color));
    s.insert("width".into(), json!(w));
    transition(&mut s);
    Value::Object(s)
}

/// Base node/edge rules followed by one rule per category and target, in
/// ascending priority.
pub fn stylesheet(opts: &DisplayOptions) -> Vec<StyleRule> {
    let mut rules = vec![
        StyleRule {
            selector: "node".into(),
            style: json!({
                "content": "data(id)",
                "width": opts.node_size,
                "height": opts.node_size,
            }),
        },
        StyleRule {
            selector: "edge".into(),
            style: json!({
                "curve-style": "straight",
                "target-arrow-shape": "triangle",
                "width": opts.fine_edge,
                "line-color": "#ddd",
                "target-arrow-color": "#ddd",
            }),
        },
    ];
    let mut cats = Category::ALL;
    cats.sort_by_key(|c| c.priority());
    for c in cats {
        let class = c.class_name();
        let Some(color) = c.color() else {
            rules.push(StyleRule { selector: format!(".{class}"), style: json!({ "display": "none" }) });
            continue;
        };
        if matches!(c.target(), Target::Nodes | Target::Both) {
            rules.push(StyleRule { selector: format!("node.{class}"), style: node_style(color) });
        }
        if matches!(c.target(), Target::Edges | Target::Both) {
            rules.push(StyleRule {
                selector: format!("edge.{class}"),
                style: edge_style(color, width(c.weight(), opts)),
            });
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_unique() {
        assert!(registry_is_consistent());
    }

    #[test]
    fn priorities_are_unique() {
        let mut p: Vec<u8> = Category::ALL.iter().map(|c| c.priority()).collect();
        p.sort_unstable();
        p.dedup();
        assert_eq!(p.len(), Category::ALL.len());
    }

    #[test]
    fn class_name_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_class_name(c.class_name()), Some(c));
        }
        assert_eq!(Category::from_class_name("blue"), None);
    }

    #[test]
    fn hidden_rule_is_last_and_unconditional() {
        let sheet = stylesheet(&DisplayOptions::default());
        let last = sheet.last().unwrap();
        assert_eq!(last.selector, ".invisible");
        assert_eq!(last.style["display"], "none");
    }

    #[test]
    fn edge_widths_follow_options() {
        let opts = DisplayOptions { thick_edge: 7.0, medium_edge: 5.0, ..Default::default() };
        let sheet = stylesheet(&opts);
        let td = sheet.iter().find(|r| r.selector == "edge.td").unwrap();
        assert_eq!(td.style["width"], 5.0);
        let donut = sheet.iter().find(|r| r.selector == "edge.donut").unwrap();
        assert_eq!(donut.style["width"], 7.0);
    }
}
