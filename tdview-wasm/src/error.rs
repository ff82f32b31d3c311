use tdview::{Malformed, ViewError};
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv, set_num};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn no_graph() -> JsValue {
    err("no_graph", "no graph is loaded", None)
}

pub fn code(e: &ViewError) -> &'static str {
    match e {
        ViewError::MalformedDataset(_) => "malformed_dataset",
        ViewError::MissingLayout { .. } => "missing_layout",
        ViewError::IndexOutOfRange { .. } => "index_out_of_range",
        ViewError::CapsExceeded { .. } => "caps_exceeded",
        ViewError::Json(_) => "invalid_json",
        ViewError::UnknownAction(_) => "unknown_action",
    }
}

/// Result object for a core error, with the structured fields as `data`.
pub fn from_view(e: &ViewError) -> JsValue {
    let d = new_obj();
    match e {
        ViewError::MalformedDataset(m) => malformed_data(&d, m),
        ViewError::MissingLayout { face, vertex } => {
            set_num(&d, "face", *face);
            set_num(&d, "vertex", *vertex as usize);
        }
        ViewError::IndexOutOfRange { kind, index, len } => {
            set_kv(&d, "kind", &JsValue::from_str(&kind.to_string()));
            set_num(&d, "index", *index);
            set_num(&d, "len", *len);
        }
        ViewError::CapsExceeded { what, cap } => {
            set_kv(&d, "what", &JsValue::from_str(what));
            set_num(&d, "cap", *cap);
        }
        ViewError::Json(j) => {
            set_num(&d, "line", j.line());
            set_num(&d, "column", j.column());
        }
        ViewError::UnknownAction(label) => set_kv(&d, "label", &JsValue::from_str(label)),
    }
    err(code(e), e.to_string(), Some(d.into()))
}

fn malformed_data(d: &js_sys::Object, m: &Malformed) {
    let reason = match m {
        Malformed::Dangling { owner, kind, id } => {
            set_kv(d, "owner", &JsValue::from_str(owner));
            set_kv(d, "kind", &JsValue::from_str(kind));
            set_num(d, "id", *id as usize);
            "dangling"
        }
        Malformed::Duplicate { kind, id } => {
            set_kv(d, "kind", &JsValue::from_str(kind));
            set_num(d, "id", *id as usize);
            "duplicate"
        }
        Malformed::SelfLoop { arc, vertex } => {
            set_num(d, "arc", *arc as usize);
            set_num(d, "vertex", *vertex as usize);
            "self_loop"
        }
        Malformed::CountMismatch { what, got, faces } => {
            set_kv(d, "what", &JsValue::from_str(what));
            set_num(d, "got", *got);
            set_num(d, "faces", *faces);
            "count_mismatch"
        }
        Malformed::RingOverlap { arc, first, second } => {
            set_num(d, "arc", *arc as usize);
            set_num(d, "first", *first);
            set_num(d, "second", *second);
            "ring_overlap"
        }
        Malformed::BadCoordinate { vertex } => {
            set_num(d, "vertex", *vertex as usize);
            "bad_coordinate"
        }
    };
    set_kv(d, "reason", &JsValue::from_str(reason));
}
