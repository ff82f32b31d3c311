use wasm_bindgen::prelude::*;
mod api;
pub use api::action_labels;
mod error;
mod interop;

/// Browser-facing session: the core viewer plus the queue of surface
/// commands the JS renderer has not yet applied.
#[wasm_bindgen]
pub struct Viewer {
    pub(crate) inner: tdview::Viewer,
    pub(crate) log: tdview::CommandLog,
}

impl Viewer {
    pub fn rs_new(options: tdview::DisplayOptions) -> Viewer {
        Viewer { inner: tdview::Viewer::new(options), log: tdview::CommandLog::new() }
    }
    pub fn rs_pending(&self) -> usize { self.log.commands().len() }

    /// Entity counts of the loaded model, or `null`.
    pub fn rs_summary(&self) -> JsValue {
        let Some(m) = self.inner.model() else { return JsValue::NULL };
        let o = interop::new_obj();
        interop::set_num(&o, "vertices", m.vertices().len());
        interop::set_num(&o, "arcs", m.arcs().len());
        interop::set_num(&o, "dual_vertices", m.dual_vertices().len());
        interop::set_num(&o, "dual_arcs", m.dual_arcs().len());
        interop::set_num(&o, "faces", m.faces().len());
        interop::set_num(&o, "bags", m.bags().len());
        interop::set_num(&o, "rings", m.rings().len());
        interop::set_num(&o, "donuts", m.donuts().len());
        interop::set_kv(&o, "layout", &interop::to_js(&m.layout()));
        o.into()
    }
}
