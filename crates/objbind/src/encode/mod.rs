//! Encoder — typed object graph → primitive tree.
//!
//! Encode is best-effort introspection of arbitrary live graphs. Depth is
//! bounded and cycles are cut with a sentinel marker; a node that fails to
//! render degrades to null while its siblings survive.

pub mod cycle;

pub use cycle::PathSet;

use indexmap::IndexMap;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::warn;

use crate::value::{DynValue, Primitive, Typed};

pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Options controlling one encode invocation.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Recursion depth at which traversal stops and yields null.
    pub max_depth: usize,
    /// Skip fields whose name starts with `_`.
    pub ignore_protected: bool,
    /// Render date/time scalars as formatted strings.
    pub format_date_time: bool,
    /// Field names to omit.
    pub ignores: HashSet<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_protected: true,
            format_date_time: true,
            ignores: HashSet::new(),
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, v: usize) -> Self {
        self.max_depth = v;
        self
    }

    pub fn ignore_protected(mut self, v: bool) -> Self {
        self.ignore_protected = v;
        self
    }

    pub fn format_date_time(mut self, v: bool) -> Self {
        self.format_date_time = v;
        self
    }

    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignores.insert(name.into());
        self
    }
}

/// Encodes a typed graph back into a primitive tree.
///
/// ```
/// use objbind::{encode, EncodeOptions, Primitive, Typed};
///
/// let mut open = objbind::OpenValue::new();
/// open.set("a", Typed::Prim(Primitive::Int(5)));
/// let typed = Typed::Open(std::rc::Rc::new(std::cell::RefCell::new(open)));
/// let tree = encode(&typed, &EncodeOptions::default());
/// assert_eq!(tree.as_object().unwrap()["a"], Primitive::Int(5));
/// ```
pub fn encode(value: &Typed, opts: &EncodeOptions) -> Primitive {
    encode_node(value, 0, &PathSet::new(), opts)
}

fn encode_node(value: &Typed, depth: usize, path: &PathSet, opts: &EncodeOptions) -> Primitive {
    if depth > opts.max_depth {
        return Primitive::Null;
    }
    match value {
        Typed::Prim(p) => encode_prim(p, depth, opts),
        Typed::Seq(items) => Primitive::Array(
            items
                .iter()
                .map(|item| encode_node(item, depth + 1, path, opts))
                .collect(),
        ),
        Typed::Record(rc) => {
            let id = Rc::as_ptr(rc) as usize;
            if path.contains(id) {
                return recursive_ref(&rc.borrow().to_string());
            }
            let path = path.branch(id);
            let rec = rc.borrow();
            encode_fields(&rec.fields, depth, &path, opts)
        }
        Typed::Open(rc) => {
            let id = Rc::as_ptr(rc) as usize;
            if path.contains(id) {
                return recursive_ref(&rc.borrow().to_string());
            }
            let path = path.branch(id);
            let open = rc.borrow();
            encode_fields(&open.fields, depth, &path, opts)
        }
        Typed::Dyn(value) => encode_dyn(value, depth, path, opts),
    }
}

fn encode_fields(
    fields: &IndexMap<String, Typed>,
    depth: usize,
    path: &PathSet,
    opts: &EncodeOptions,
) -> Primitive {
    let mut out = IndexMap::new();
    for (name, value) in fields {
        if opts.ignore_protected && name.starts_with('_') {
            continue;
        }
        if opts.ignores.contains(name.as_str()) {
            continue;
        }
        out.insert(name.clone(), encode_node(value, depth + 1, path, opts));
    }
    Primitive::Object(out)
}

fn encode_dyn(
    value: &Rc<dyn DynValue>,
    depth: usize,
    path: &PathSet,
    opts: &EncodeOptions,
) -> Primitive {
    if value.is_callable() {
        return Primitive::Null;
    }
    let id = Rc::as_ptr(value) as *const () as usize;
    if path.contains(id) {
        return recursive_ref(value.type_label());
    }
    if let Some(columns) = value.row_fields() {
        return Primitive::Object(columns.into_iter().collect());
    }
    match value.render() {
        Ok(p) => encode_prim(&p, depth, opts),
        Err(err) => {
            warn!(label = value.type_label(), error = %err, "encode node degraded to null");
            Primitive::Null
        }
    }
}

/// Opaque primitive payloads still honor the depth bound, the ignore set,
/// and date/time formatting.
fn encode_prim(p: &Primitive, depth: usize, opts: &EncodeOptions) -> Primitive {
    if depth > opts.max_depth {
        return Primitive::Null;
    }
    match p {
        Primitive::Array(items) => Primitive::Array(
            items
                .iter()
                .map(|item| encode_prim(item, depth + 1, opts))
                .collect(),
        ),
        Primitive::Object(map) => {
            let mut out = IndexMap::new();
            for (k, v) in map {
                if opts.ignores.contains(k.as_str()) {
                    continue;
                }
                out.insert(k.clone(), encode_prim(v, depth + 1, opts));
            }
            Primitive::Object(out)
        }
        Primitive::DateTime(dt) if opts.format_date_time => {
            Primitive::Str(dt.format(DEFAULT_DATE_TIME_FORMAT).to_string())
        }
        Primitive::Date(d) if opts.format_date_time => {
            Primitive::Str(d.format(DEFAULT_DATE_FORMAT).to_string())
        }
        Primitive::Time(t) if opts.format_date_time => {
            Primitive::Str(t.format(DEFAULT_TIME_FORMAT).to_string())
        }
        other => other.clone(),
    }
}

fn recursive_ref(display: &str) -> Primitive {
    Primitive::Str(format!("$$recursive reference:{}$$", display))
}
