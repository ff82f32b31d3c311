//! Display options for the rendering surface.
//!
//! Options arrive as JSON from the host page. Both the snake_case field names
//! and the upper-case keys written by older clients are accepted; missing
//! fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::ViewResult;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    #[serde(alias = "THICK_EDGE")]
    pub thick_edge: f64,
    #[serde(alias = "MEDIUM_EDGE")]
    pub medium_edge: f64,
    #[serde(alias = "FINE_EDGE")]
    pub fine_edge: f64,
    #[serde(alias = "NODE_SIZE")]
    pub node_size: f64,
    #[serde(alias = "FAT_NODE_SIZE")]
    pub fat_node_size: f64,
    /// Multiplier from solver layout units to screen units.
    #[serde(alias = "LAYOUT_FACTOR")]
    pub layout_factor: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            thick_edge: 30.0,
            medium_edge: 20.0,
            fine_edge: 10.0,
            node_size: 150.0,
            fat_node_size: 200.0,
            layout_factor: 4000.0,
        }
    }
}

impl DisplayOptions {
    pub fn from_json_str(s: &str) -> ViewResult<Self> {
        if s.trim().is_empty() {
            return Ok(DisplayOptions::default());
        }
        let opts: DisplayOptions = serde_json::from_str(s)?;
        Ok(opts.sanitized())
    }

    // Non-finite or non-positive values fall back to the defaults.
    fn sanitized(self) -> Self {
        let d = DisplayOptions::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        DisplayOptions {
            thick_edge: pick(self.thick_edge, d.thick_edge),
            medium_edge: pick(self.medium_edge, d.medium_edge),
            fine_edge: pick(self.fine_edge, d.fine_edge),
            node_size: pick(self.node_size, d.node_size),
            fat_node_size: pick(self.fat_node_size, d.fat_node_size),
            layout_factor: pick(self.layout_factor, d.layout_factor),
        }
    }
}
