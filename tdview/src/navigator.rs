//! Cyclic navigation over faces, bags, rings and donuts.
//!
//! Each kind keeps its own pointer in `[-1, count - 1]`, where `-1` means
//! nothing is selected. Stepping past either end lands on `-1` first.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::model::Model;
use crate::projection::diagnostic_edges;
use crate::style::Category;
use crate::surface::Painter;
use crate::{ViewError, ViewResult};

/// Pointer value meaning "nothing highlighted".
pub const NONE: isize = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKind {
    Face,
    Bag,
    Ring,
    Donut,
}

impl fmt::Display for NavKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NavKind::Face => "face",
            NavKind::Bag => "bag",
            NavKind::Ring => "ring",
            NavKind::Donut => "donut",
        };
        f.write_str(s)
    }
}

/// Advance or retreat `current` within `[-1, max]`, lowlighting the old
/// index and highlighting the new one.
///
/// A `current` outside `[-1, max]` (left over from a larger collection) is
/// treated as `-1` and not lowlighted.
pub fn step<C, H, L>(
    current: isize,
    max: isize,
    ctx: &mut C,
    mut highlight: H,
    mut lowlight: L,
    forward: bool,
) -> ViewResult<isize>
where
    H: FnMut(&mut C, usize) -> ViewResult<()>,
    L: FnMut(&mut C, usize),
{
    let current = if current < NONE || current > max { NONE } else { current };
    let mut next = if forward { current + 1 } else { current - 1 };
    if next == -2 {
        next = max;
    } else if next > max {
        next = NONE;
    }
    if current >= 0 {
        lowlight(ctx, current as usize);
    }
    if next >= 0 {
        highlight(ctx, next as usize)?;
    }
    Ok(next)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cursor(isize);

impl Default for Cursor {
    fn default() -> Self {
        Cursor(NONE)
    }
}

impl Cursor {
    pub fn get(self) -> isize {
        self.0
    }

    pub fn selected(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

/// One pointer per navigable kind; kinds never share state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub face: Cursor,
    pub bag: Cursor,
    pub ring: Cursor,
    pub donut: Cursor,
}

impl NavigationState {
    pub fn cursor(&self, kind: NavKind) -> Cursor {
        match kind {
            NavKind::Face => self.face,
            NavKind::Bag => self.bag,
            NavKind::Ring => self.ring,
            NavKind::Donut => self.donut,
        }
    }

    fn cursor_mut(&mut self, kind: NavKind) -> &mut Cursor {
        match kind {
            NavKind::Face => &mut self.face,
            NavKind::Bag => &mut self.bag,
            NavKind::Ring => &mut self.ring,
            NavKind::Donut => &mut self.donut,
        }
    }
}

/// Everything a highlight callback may touch during one step.
pub struct Stage<'a> {
    pub model: &'a Model,
    pub nav: NavigationState,
    pub show_triangulation: bool,
    pub painter: Painter<'a>,
}

pub fn count(model: &Model, kind: NavKind) -> usize {
    match kind {
        NavKind::Face => model.faces().len(),
        NavKind::Bag => model.bags().len(),
        NavKind::Ring => model.rings().len(),
        NavKind::Donut => model.donuts().len(),
    }
}

fn out_of_range(kind: NavKind, index: usize, len: usize) -> ViewError {
    ViewError::IndexOutOfRange { kind, index, len }
}

/// Step one kind's pointer and write the result back into `nav`.
pub fn navigate(
    nav: &mut NavigationState,
    kind: NavKind,
    forward: bool,
    stage: &mut Stage<'_>,
) -> ViewResult<isize> {
    let max = count(stage.model, kind) as isize - 1;
    let current = nav.cursor(kind).get();
    let next = match kind {
        NavKind::Face => step(current, max, stage, highlight_face, lowlight_face, forward)?,
        NavKind::Bag => step(current, max, stage, highlight_bag, lowlight_bag, forward)?,
        NavKind::Ring => step(current, max, stage, highlight_ring, lowlight_ring, forward)?,
        NavKind::Donut => step(current, max, stage, highlight_donut, lowlight_donut, forward)?,
    };
    *nav.cursor_mut(kind) = Cursor(next);
    debug!(%kind, index = next, "highlighting");
    Ok(next)
}

pub fn highlight_face(s: &mut Stage<'_>, idx: usize) -> ViewResult<()> {
    let model = s.model;
    let face = model.faces().get(idx).ok_or_else(|| out_of_range(NavKind::Face, idx, model.faces().len()))?;
    let dv = model
        .dual_vertices()
        .get(idx)
        .ok_or_else(|| out_of_range(NavKind::Face, idx, model.dual_vertices().len()))?;
    s.painter.clear([dv.element.as_str()], Category::TreeDecomposition);
    s.painter.apply([dv.element.as_str()], Category::Highlighted);
    s.painter.apply(face.boundary.elements(), Category::Highlighted);
    Ok(())
}

pub fn lowlight_face(s: &mut Stage<'_>, idx: usize) {
    let model = s.model;
    let (Some(face), Some(dv)) = (model.faces().get(idx), model.dual_vertices().get(idx)) else {
        return;
    };
    s.painter.clear([dv.element.as_str()], Category::Highlighted);
    if s.nav.bag.selected() != Some(idx) {
        s.painter.apply([dv.element.as_str()], Category::TreeDecomposition);
    }
    s.painter.clear(face.boundary.elements(), Category::Highlighted);
}

pub fn highlight_bag(s: &mut Stage<'_>, idx: usize) -> ViewResult<()> {
    let model = s.model;
    let bag = model.bags().get(idx).ok_or_else(|| out_of_range(NavKind::Bag, idx, model.bags().len()))?;
    let dv = model
        .dual_vertices()
        .get(idx)
        .ok_or_else(|| out_of_range(NavKind::Bag, idx, model.dual_vertices().len()))?;
    s.painter.apply(bag.vertex_elements.iter().map(String::as_str), Category::Bag);
    s.painter.clear([dv.element.as_str()], Category::TreeDecomposition);
    s.painter.apply([dv.element.as_str()], Category::Bag);
    Ok(())
}

pub fn lowlight_bag(s: &mut Stage<'_>, idx: usize) {
    let model = s.model;
    let (Some(bag), Some(dv)) = (model.bags().get(idx), model.dual_vertices().get(idx)) else {
        return;
    };
    s.painter.clear(bag.vertex_elements.iter().map(String::as_str), Category::Bag);
    s.painter.clear([dv.element.as_str()], Category::Bag);
    if s.nav.face.selected() != Some(idx) {
        s.painter.apply([dv.element.as_str()], Category::TreeDecomposition);
    }
}

pub fn highlight_ring(s: &mut Stage<'_>, idx: usize) -> ViewResult<()> {
    let model = s.model;
    let ring = model.rings().get(idx).ok_or_else(|| out_of_range(NavKind::Ring, idx, model.rings().len()))?;
    s.painter.apply(ring.boundary.elements(), Category::Ring);
    Ok(())
}

pub fn lowlight_ring(s: &mut Stage<'_>, idx: usize) {
    if let Some(ring) = s.model.rings().get(idx) {
        s.painter.clear(ring.boundary.elements(), Category::Ring);
    }
}

pub fn highlight_donut(s: &mut Stage<'_>, idx: usize) -> ViewResult<()> {
    let model = s.model;
    let donut = model.donuts().get(idx).ok_or_else(|| out_of_range(NavKind::Donut, idx, model.donuts().len()))?;
    s.painter.apply(donut.boundary.elements(), Category::Donut);
    if s.show_triangulation {
        let diag = diagnostic_edges(donut);
        s.painter.apply(diag.iter().map(|e| e.id()), Category::Donut);
    }
    Ok(())
}

pub fn lowlight_donut(s: &mut Stage<'_>, idx: usize) {
    let model = s.model;
    let Some(donut) = model.donuts().get(idx) else {
        return;
    };
    s.painter.clear(donut.boundary.elements(), Category::Donut);
    if s.show_triangulation {
        let diag = diagnostic_edges(donut);
        s.painter.clear(diag.iter().map(|e| e.id()), Category::Donut);
    }
}
