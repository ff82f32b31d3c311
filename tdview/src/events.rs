use std::fmt;
use std::str::FromStr;

use crate::navigator::NavKind;
use crate::overlay::Overlay;
use crate::ViewError;

/// User-interface actions, dispatched by opaque label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Step { kind: NavKind, forward: bool },
    Toggle(Overlay),
    ToggleDonutTriangulation,
}

const LABELS: [(&str, Action); 13] = [
    ("NEXT_FACE", Action::Step { kind: NavKind::Face, forward: true }),
    ("PREV_FACE", Action::Step { kind: NavKind::Face, forward: false }),
    ("NEXT_BAG", Action::Step { kind: NavKind::Bag, forward: true }),
    ("PREV_BAG", Action::Step { kind: NavKind::Bag, forward: false }),
    ("NEXT_RING", Action::Step { kind: NavKind::Ring, forward: true }),
    ("PREV_RING", Action::Step { kind: NavKind::Ring, forward: false }),
    ("NEXT_DONUT", Action::Step { kind: NavKind::Donut, forward: true }),
    ("PREV_DONUT", Action::Step { kind: NavKind::Donut, forward: false }),
    ("TOGGLE_TD", Action::Toggle(Overlay::TreeDecomposition)),
    ("TOGGLE_ST", Action::Toggle(Overlay::SpanningTree)),
    ("TOGGLE_ADDITIONAL_EDGES", Action::Toggle(Overlay::AugmentedEdges)),
    ("TOGGLE_MIS", Action::Toggle(Overlay::IndependentSet)),
    ("TOGGLE_DONUT_TRIANGULATION", Action::ToggleDonutTriangulation),
];

impl Action {
    pub fn label(self) -> &'static str {
        LABELS
            .iter()
            .find(|(_, a)| *a == self)
            .map(|(l, _)| *l)
            .unwrap_or("UNKNOWN")
    }

    pub fn all() -> impl Iterator<Item = Action> {
        LABELS.iter().map(|(_, a)| *a)
    }
}

impl FromStr for Action {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LABELS
            .iter()
            .find(|(l, _)| *l == s)
            .map(|(_, a)| *a)
            .ok_or_else(|| ViewError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_round_trips_through_its_label() {
        for a in Action::all() {
            assert_eq!(a.label().parse::<Action>().unwrap(), a);
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        assert!(matches!("NEXT_PAGE".parse::<Action>(), Err(ViewError::UnknownAction(l)) if l == "NEXT_PAGE"));
    }
}
