use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Scale a raw layout point into screen space. Screen y grows downward.
#[inline]
pub fn scale_layout_point(x: f64, y: f64, factor: f64) -> Position {
    Position { x: x * factor, y: -y * factor }
}

/// Arithmetic mean of a point set; `None` for an empty set.
pub fn centroid<I>(points: I) -> Option<Position>
where
    I: IntoIterator<Item = Position>,
{
    let mut n = 0usize;
    let (mut sx, mut sy) = (0.0f64, 0.0f64);
    for p in points {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(Position { x: sx / n as f64, y: sy / n as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_triangle() {
        let c = centroid([
            Position::new(0.0, 0.0),
            Position::new(3.0, 0.0),
            Position::new(0.0, 3.0),
        ])
        .unwrap();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn layout_scaling_flips_y() {
        let p = scale_layout_point(0.5, 0.25, 4000.0);
        assert_eq!(p, Position::new(2000.0, -1000.0));
    }
}
