//! [`Typed`] — the decoded object graph.
//!
//! The decoder produces a tagged value: a scalar/opaque primitive, a
//! sequence, an instance of a declared record type, or an open record
//! absorbing undeclared fields. Record nodes are reference-counted so a
//! graph may legally contain shared or self-referencing structure; the
//! encoder's cycle guard keys off that identity.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::EncodeError;
use crate::type_def::TypeDescriptor;
use crate::value::Primitive;

pub type RecordRef = Rc<RefCell<RecordValue>>;
pub type OpenRef = Rc<RefCell<OpenValue>>;

/// A decoded value.
#[derive(Debug, Clone)]
pub enum Typed {
    /// Scalar, or an opaque (reserved-type) primitive subtree.
    Prim(Primitive),
    /// Decoded sequence; also the result of parsing a tuple literal.
    Seq(Vec<Typed>),
    /// Instance of a declared record type.
    Record(RecordRef),
    /// Open record ("DataObject"): arbitrary named fields, insertion order.
    Open(OpenRef),
    /// Arbitrary application value, presented to the encoder through
    /// [`DynValue`].
    Dyn(Rc<dyn DynValue>),
}

impl Typed {
    pub fn null() -> Self {
        Self::Prim(Primitive::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Prim(Primitive::Null))
    }

    /// Scalar vs. composite classification for typed values. Records, open
    /// records, sequences, and primitive composites recurse; everything else
    /// is terminal.
    pub fn is_scalar(&self) -> bool {
        match self {
            Self::Prim(p) => p.is_scalar(),
            Self::Seq(_) | Self::Record(_) | Self::Open(_) | Self::Dyn(_) => false,
        }
    }

    /// Wraps a fresh instance of the given declared type.
    pub fn record(desc: &'static TypeDescriptor) -> Self {
        Self::Record(Rc::new(RefCell::new(RecordValue::new(desc))))
    }

    /// Wraps a fresh open record.
    pub fn open() -> Self {
        Self::Open(Rc::new(RefCell::new(OpenValue::new())))
    }

    pub fn as_prim(&self) -> Option<&Primitive> {
        match self {
            Self::Prim(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Typed]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_open(&self) -> Option<&OpenRef> {
        match self {
            Self::Open(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Primitive> for Typed {
    fn from(p: Primitive) -> Self {
        Self::Prim(p)
    }
}

/// Instance of a declared record type: the descriptor plus an ordered field
/// map. A declared field that was never set is absent from the map, while a
/// field set to null holds `Prim(Null)`; the two are distinguishable.
#[derive(Debug, Clone)]
pub struct RecordValue {
    desc: &'static TypeDescriptor,
    pub fields: IndexMap<String, Typed>,
}

impl RecordValue {
    pub fn new(desc: &'static TypeDescriptor) -> Self {
        Self {
            desc,
            fields: IndexMap::new(),
        }
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.desc
    }

    pub fn get(&self, name: &str) -> Option<&Typed> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Typed) {
        self.fields.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} record>", self.desc.name)
    }
}

/// Open record backed by an ordered mapping of field name to value.
#[derive(Debug, Clone, Default)]
pub struct OpenValue {
    pub fields: IndexMap<String, Typed>,
}

impl OpenValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: IndexMap<String, Typed>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Typed> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Typed) {
        self.fields.insert(name.into(), value);
    }
}

impl fmt::Display for OpenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<open record>")
    }
}

/// Arbitrary application value at the encoder boundary.
///
/// The encoder treats a `DynValue` as a leaf unless it exposes row
/// semantics. Rendering may fail; a failed node degrades to null and the
/// traversal continues.
pub trait DynValue: fmt::Debug {
    /// Label used in cycle sentinels and diagnostics.
    fn type_label(&self) -> &str;

    /// Callable/function-like values encode to null.
    fn is_callable(&self) -> bool {
        false
    }

    /// Tabular-result-row shape: when present, the encoder converts the value
    /// directly to a mapping of its columns.
    fn row_fields(&self) -> Option<Vec<(String, Primitive)>> {
        None
    }

    /// Renders the value as a primitive.
    fn render(&self) -> Result<Primitive, EncodeError>;
}
