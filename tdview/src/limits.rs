// Centralized ingestion limits for solver output and layout payloads

// Model size caps
pub const MAX_VERTICES: usize = 200_000;
pub const MAX_ARCS: usize = 1_200_000; // both directions of every edge
pub const MAX_FACES: usize = 400_000;
pub const MAX_LAYOUT_POINTS: usize = MAX_VERTICES;

// Diagnostics
pub const MAX_TRIANGULATED_ARCS_PER_DONUT: usize = 100_000;

// Numeric bounds for raw layout coordinates (before scaling)
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool {
    x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x)
}

#[inline]
pub fn check_cap(what: &'static str, len: usize, cap: usize) -> crate::ViewResult<()> {
    if len > cap {
        return Err(crate::ViewError::CapsExceeded { what, cap });
    }
    Ok(())
}
