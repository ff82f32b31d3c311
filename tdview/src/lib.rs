pub mod builder;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod json;
pub mod limits;
pub mod model;
pub mod navigator;
pub mod overlay;
pub mod projection;
pub mod style;
pub mod surface;

pub use config::DisplayOptions;
pub use error::{Malformed, ViewError, ViewResult};
pub use events::Action;
pub use json::{Dataset, Diagnostics, LayoutPoint};
pub use model::{ElementKind, LayoutMode, Model};
pub use navigator::{Cursor, NavKind, NavigationState};
pub use overlay::{Overlay, OverlayState};
pub use projection::{DrawEdge, DrawNode, Scene};
pub use style::{Category, StyleRule};
pub use surface::{ClassLedger, CommandLog, NullSurface, RenderSurface, SurfaceCommand};

use std::collections::HashSet;
use tracing::{debug, info};

use navigator::Stage;
use surface::Painter;

/// A loaded model together with the interaction state scoped to it.
/// Replaced as a whole on every load.
#[derive(Debug)]
pub struct Explorer {
    model: Model,
    nav: NavigationState,
    overlays: OverlayState,
    ledger: ClassLedger,
}

impl Explorer {
    fn new(model: Model) -> Self {
        Explorer {
            model,
            nav: NavigationState::default(),
            overlays: OverlayState::default(),
            ledger: ClassLedger::default(),
        }
    }

    pub fn model(&self) -> &Model { &self.model }
    pub fn navigation(&self) -> NavigationState { self.nav }
    pub fn overlays(&self) -> OverlayState { self.overlays }
    pub fn classes(&self) -> &ClassLedger { &self.ledger }

    fn triangulated_donut(&self) -> Option<&model::Donut> {
        if !self.overlays.donut_triangulation {
            return None;
        }
        self.nav.donut.selected().and_then(|i| self.model.donuts().get(i))
    }

    pub fn scene(&self) -> Scene {
        projection::project(&self.model, self.triangulated_donut())
    }

    // Instantiate a fresh scene and replay the ledger onto it.
    fn draw(&mut self, surface: &mut dyn RenderSurface) {
        let scene = self.scene();
        surface.instantiate(&scene);
        let present: HashSet<&str> = scene
            .nodes
            .iter()
            .map(|n| n.data.id.as_str())
            .chain(scene.all_edges().map(|e| e.id()))
            .collect();
        self.ledger.replay(surface, |id| present.contains(id));
    }

    fn step(&mut self, kind: NavKind, forward: bool, surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let Explorer { model, nav, overlays, ledger } = self;
        let mut stage = Stage {
            model,
            nav: *nav,
            show_triangulation: overlays.donut_triangulation,
            painter: Painter::new(ledger, &mut *surface),
        };
        navigator::navigate(nav, kind, forward, &mut stage)?;
        if kind == NavKind::Donut && self.overlays.donut_triangulation {
            self.draw(surface);
        }
        Ok(())
    }

    fn toggle(&mut self, overlay: Overlay, surface: &mut dyn RenderSurface) {
        let Explorer { model, overlays, ledger, .. } = self;
        let mut painter = Painter::new(ledger, surface);
        overlay::toggle(overlays, overlay, model, &mut painter);
    }

    fn toggle_triangulation(&mut self, surface: &mut dyn RenderSurface) {
        let diag = self
            .nav
            .donut
            .selected()
            .and_then(|i| self.model.donuts().get(i))
            .map(projection::diagnostic_edges);
        let turning_on = !self.overlays.donut_triangulation;
        debug!(on = turning_on, "donut triangulation toggled");
        let Some(diag) = diag else {
            self.overlays.donut_triangulation = turning_on;
            return;
        };
        if turning_on {
            self.overlays.donut_triangulation = true;
            self.draw(surface);
            Painter::new(&mut self.ledger, surface).apply(diag.iter().map(|e| e.id()), Category::Donut);
        } else {
            Painter::new(&mut self.ledger, &mut *surface).clear(diag.iter().map(|e| e.id()), Category::Donut);
            self.overlays.donut_triangulation = false;
            self.draw(surface);
        }
    }
}

/// Owns display options and the current explorer; routes UI actions.
#[derive(Debug, Default)]
pub struct Viewer {
    options: DisplayOptions,
    diagnostics: Option<Diagnostics>,
    explorer: Option<Explorer>,
}

impl Viewer {
    pub fn new(options: DisplayOptions) -> Self {
        Viewer { options, diagnostics: None, explorer: None }
    }

    pub fn options(&self) -> &DisplayOptions { &self.options }

    /// Takes effect for the next load and stylesheet.
    pub fn set_options(&mut self, options: DisplayOptions) {
        self.options = options;
    }

    pub fn stylesheet(&self) -> Vec<StyleRule> {
        style::stylesheet(&self.options)
    }

    pub fn explorer(&self) -> Option<&Explorer> { self.explorer.as_ref() }
    pub fn model(&self) -> Option<&Model> { self.explorer.as_ref().map(|e| &e.model) }
    pub fn diagnostics(&self) -> Option<&Diagnostics> { self.diagnostics.as_ref() }

    pub fn navigation(&self) -> NavigationState {
        self.explorer.as_ref().map(|e| e.nav).unwrap_or_default()
    }

    /// Build a model and, only if that succeeds, replace the current one
    /// and draw it.
    pub fn load(&mut self, dataset: &Dataset, layout: &[LayoutPoint], surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let model = builder::build(dataset, layout, &self.options)?;
        info!(
            vertices = model.vertices().len(),
            arcs = model.arcs().len(),
            faces = model.faces().len(),
            rings = model.rings().len(),
            donuts = model.donuts().len(),
            layout = ?model.layout(),
            "graph loaded"
        );
        let mut explorer = Explorer::new(model);
        explorer.draw(surface);
        {
            let Explorer { model, ledger, .. } = &mut explorer;
            Painter::new(ledger, surface).apply(model.dual_elements(), Category::TreeDecomposition);
        }
        self.explorer = Some(explorer);
        Ok(())
    }

    pub fn load_json(&mut self, graph: &str, layout: &str, surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let dataset = Dataset::from_json_str(graph)?;
        let layout = json::parse_layout(layout)?;
        self.load(&dataset, &layout, surface)
    }

    /// Load the body of a solver run response and keep its diagnostics.
    pub fn load_run_response(&mut self, body: &str, surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let (dataset, layout, diagnostics) = json::parse_run_response(body)?;
        self.load(&dataset, &layout, surface)?;
        self.diagnostics = Some(diagnostics);
        Ok(())
    }

    /// No-op while nothing is loaded.
    pub fn dispatch(&mut self, action: Action, surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let Some(explorer) = self.explorer.as_mut() else {
            return Ok(());
        };
        match action {
            Action::Step { kind, forward } => explorer.step(kind, forward, surface)?,
            Action::Toggle(overlay) => explorer.toggle(overlay, surface),
            Action::ToggleDonutTriangulation => explorer.toggle_triangulation(surface),
        }
        Ok(())
    }

    pub fn dispatch_label(&mut self, label: &str, surface: &mut dyn RenderSurface) -> ViewResult<()> {
        let action: Action = label.parse()?;
        self.dispatch(action, surface)
    }

    pub fn scene(&self) -> Option<Scene> {
        self.explorer.as_ref().map(Explorer::scene)
    }

    pub fn nodes(&self) -> Vec<DrawNode> {
        self.scene().map(|s| s.nodes).unwrap_or_default()
    }

    /// Persisted edges plus any diagnostic edges of the current draw.
    pub fn edges(&self) -> Vec<DrawEdge> {
        self.scene()
            .map(|s| s.all_edges().cloned().collect())
            .unwrap_or_default()
    }
}
