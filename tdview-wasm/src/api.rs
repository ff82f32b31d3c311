use crate::Viewer;
use tdview::{Action, DisplayOptions, NavKind, ViewError};
use wasm_bindgen::prelude::*;
use web_sys::console;
type JsValue = wasm_bindgen::JsValue;
use crate::{error, interop};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Every event label the viewer understands, in toolbar order.
#[wasm_bindgen]
pub fn action_labels() -> JsValue {
    interop::to_js(&Action::all().map(Action::label).collect::<Vec<_>>())
}

fn report_load_failure(e: &ViewError) -> JsValue {
    console::warn_1(&JsValue::from_str(&format!("tdview: load failed: {e}")));
    error::from_view(e)
}

#[wasm_bindgen]
impl Viewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Viewer {
        crate::Viewer::rs_new(DisplayOptions::default())
    }

    // Options and styling
    pub fn set_options_res(&mut self, options: &str) -> JsValue {
        match DisplayOptions::from_json_str(options) {
            Ok(o) => {
                self.inner.set_options(o);
                error::ok(interop::to_js(self.inner.options()))
            }
            Err(e) => error::from_view(&e),
        }
    }
    pub fn options(&self) -> JsValue {
        interop::to_js(self.inner.options())
    }
    pub fn stylesheet(&self) -> JsValue {
        interop::to_js(&self.inner.stylesheet())
    }

    // Loading
    pub fn load(&mut self, graph: &str, layout: &str) -> bool {
        match self.inner.load_json(graph, layout, &mut self.log) {
            Ok(()) => true,
            Err(e) => {
                report_load_failure(&e);
                false
            }
        }
    }
    pub fn load_res(&mut self, graph: &str, layout: &str) -> JsValue {
        match self.inner.load_json(graph, layout, &mut self.log) {
            Ok(()) => error::ok(self.rs_summary()),
            Err(e) => report_load_failure(&e),
        }
    }
    pub fn load_run_response_res(&mut self, body: &str) -> JsValue {
        match self.inner.load_run_response(body, &mut self.log) {
            Ok(()) => error::ok(self.rs_summary()),
            Err(e) => report_load_failure(&e),
        }
    }
    pub fn summary(&self) -> JsValue {
        self.rs_summary()
    }
    pub fn diagnostics(&self) -> JsValue {
        self.inner.diagnostics().map_or(JsValue::NULL, interop::to_js)
    }

    // Actions
    /// Silent variant: unknown labels and an empty viewer are no-ops.
    pub fn dispatch(&mut self, label: &str) -> bool {
        if self.inner.model().is_none() {
            return false;
        }
        self.inner.dispatch_label(label, &mut self.log).is_ok()
    }
    pub fn dispatch_res(&mut self, label: &str) -> JsValue {
        let action: Action = match label.parse() {
            Ok(a) => a,
            Err(e) => return error::from_view(&e),
        };
        if self.inner.model().is_none() {
            return error::no_graph();
        }
        match self.inner.dispatch(action, &mut self.log) {
            Ok(()) => error::ok(JsValue::from_f64(self.rs_pending() as f64)),
            Err(e) => error::from_view(&e),
        }
    }

    // Surface commands
    pub fn pending_commands(&self) -> u32 {
        self.rs_pending() as u32
    }
    /// Queued `instantiate` / `add_class` / `remove_class` commands, oldest first.
    pub fn take_commands(&mut self) -> JsValue {
        interop::to_js(&self.log.drain())
    }

    // Scene
    pub fn scene(&self) -> JsValue {
        self.inner.scene().map_or(JsValue::NULL, |s| interop::to_js(&s))
    }
    pub fn nodes(&self) -> JsValue {
        interop::to_js(&self.inner.nodes())
    }
    pub fn edges(&self) -> JsValue {
        interop::to_js(&self.inner.edges())
    }
    pub fn classes_of(&self, id: &str) -> JsValue {
        let names: Vec<&str> = self
            .inner
            .explorer()
            .map(|x| x.classes().categories(id).map(|c| c.class_name()).collect())
            .unwrap_or_default();
        interop::to_js(&names)
    }

    // Interaction state
    pub fn navigation(&self) -> JsValue {
        interop::to_js(&self.inner.navigation())
    }
    pub fn face_pointer(&self) -> i32 {
        self.pointer(NavKind::Face)
    }
    pub fn bag_pointer(&self) -> i32 {
        self.pointer(NavKind::Bag)
    }
    pub fn ring_pointer(&self) -> i32 {
        self.pointer(NavKind::Ring)
    }
    pub fn donut_pointer(&self) -> i32 {
        self.pointer(NavKind::Donut)
    }
    pub fn overlays(&self) -> JsValue {
        self.inner.explorer().map_or(JsValue::NULL, |x| interop::to_js(&x.overlays()))
    }
}

impl Viewer {
    fn pointer(&self, kind: NavKind) -> i32 {
        self.inner.navigation().cursor(kind).get() as i32
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Viewer::new()
    }
}
