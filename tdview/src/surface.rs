//! The rendering surface seam and the class-membership ledger.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::projection::Scene;
use crate::style::Category;

/// Capability the core drives: build a drawable scene, then add or remove
/// category classes on its elements by id.
pub trait RenderSurface {
    fn instantiate(&mut self, scene: &Scene);
    fn add_class(&mut self, id: &str, category: Category);
    fn remove_class(&mut self, id: &str, category: Category);
}

/// Surface that drops every command.
#[derive(Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn instantiate(&mut self, _scene: &Scene) {}
    fn add_class(&mut self, _id: &str, _category: Category) {}
    fn remove_class(&mut self, _id: &str, _category: Category) {}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Instantiate { scene: Scene },
    AddClass { id: String, class: &'static str },
    RemoveClass { id: String, class: &'static str },
}

/// Surface that queues commands for a host to apply later.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<SurfaceCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        CommandLog::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderSurface for CommandLog {
    fn instantiate(&mut self, scene: &Scene) {
        self.commands.push(SurfaceCommand::Instantiate { scene: scene.clone() });
    }

    fn add_class(&mut self, id: &str, category: Category) {
        self.commands.push(SurfaceCommand::AddClass { id: id.to_string(), class: category.class_name() });
    }

    fn remove_class(&mut self, id: &str, category: Category) {
        self.commands.push(SurfaceCommand::RemoveClass { id: id.to_string(), class: category.class_name() });
    }
}

/// Category membership per element id, as last pushed to the surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassLedger {
    members: BTreeMap<String, BTreeSet<Category>>,
}

impl ClassLedger {
    pub fn has(&self, id: &str, category: Category) -> bool {
        self.members.get(id).is_some_and(|s| s.contains(&category))
    }

    pub fn categories(&self, id: &str) -> impl Iterator<Item = Category> + '_ {
        self.members.get(id).into_iter().flat_map(|s| s.iter().copied())
    }

    /// Element ids currently carrying `category`, sorted.
    pub fn members_of(&self, category: Category) -> Vec<&str> {
        self.members
            .iter()
            .filter(|(_, s)| s.contains(&category))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    fn insert(&mut self, id: &str, category: Category) {
        self.members.entry(id.to_string()).or_default().insert(category);
    }

    fn remove(&mut self, id: &str, category: Category) {
        if let Some(s) = self.members.get_mut(id) {
            s.remove(&category);
            if s.is_empty() {
                self.members.remove(id);
            }
        }
    }

    /// Drop ids the predicate rejects, then push the remaining memberships
    /// onto a freshly instantiated surface.
    pub(crate) fn replay(&mut self, surface: &mut dyn RenderSurface, keep: impl Fn(&str) -> bool) {
        self.members.retain(|id, _| keep(id));
        for (id, cats) in &self.members {
            for c in cats {
                surface.add_class(id, *c);
            }
        }
    }
}

/// Applies categories to element sets, keeping ledger and surface in step.
pub struct Painter<'a> {
    ledger: &'a mut ClassLedger,
    surface: &'a mut dyn RenderSurface,
}

impl<'a> Painter<'a> {
    pub fn new(ledger: &'a mut ClassLedger, surface: &'a mut dyn RenderSurface) -> Self {
        Painter { ledger, surface }
    }

    pub fn apply<'i, I>(&mut self, ids: I, category: Category)
    where
        I: IntoIterator<Item = &'i str>,
    {
        for id in ids {
            self.ledger.insert(id, category);
            self.surface.add_class(id, category);
        }
    }

    pub fn clear<'i, I>(&mut self, ids: I, category: Category)
    where
        I: IntoIterator<Item = &'i str>,
    {
        for id in ids {
            self.ledger.remove(id, category);
            self.surface.remove_class(id, category);
        }
    }

    pub fn ledger(&self) -> &ClassLedger {
        &*self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painter_mirrors_surface() {
        let mut ledger = ClassLedger::default();
        let mut log = CommandLog::new();
        {
            let mut p = Painter::new(&mut ledger, &mut log);
            p.apply(["v0", "v1"], Category::Bag);
            p.clear(["v0"], Category::Bag);
        }
        assert!(!ledger.has("v0", Category::Bag));
        assert!(ledger.has("v1", Category::Bag));
        assert_eq!(log.commands().len(), 3);
        assert_eq!(
            log.commands()[2],
            SurfaceCommand::RemoveClass { id: "v0".into(), class: "bag" }
        );
    }

    #[test]
    fn clearing_an_absent_class_is_harmless() {
        let mut ledger = ClassLedger::default();
        let mut surface = NullSurface;
        let mut p = Painter::new(&mut ledger, &mut surface);
        p.clear(["v9"], Category::Ring);
        assert_eq!(p.ledger().members_of(Category::Ring).len(), 0);
    }

    #[test]
    fn replay_drops_rejected_ids() {
        let mut ledger = ClassLedger::default();
        let mut surface = NullSurface;
        Painter::new(&mut ledger, &mut surface).apply(["ta-0", "a1"], Category::Donut);
        let mut log = CommandLog::new();
        ledger.replay(&mut log, |id| !id.starts_with("ta-"));
        assert_eq!(ledger.members_of(Category::Donut), vec!["a1"]);
        assert_eq!(log.commands().len(), 1);
    }

    #[test]
    fn command_log_records_every_category_by_class_name() {
        let mut ledger = ClassLedger::default();
        let mut log = CommandLog::new();
        let mut p = Painter::new(&mut ledger, &mut log);
        for c in Category::ALL {
            p.apply(["v0"], c);
        }
        drop(p);
        let names: Vec<&str> = log
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                SurfaceCommand::AddClass { class, .. } => Some(*class),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = Category::ALL.iter().map(|c| c.class_name()).collect();
        assert_eq!(names, expected);
    }
}
