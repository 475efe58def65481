//! Decoder — primitive tree → typed object graph.
//!
//! Dispatch follows the runtime shape of the input, not the declared target
//! alone, so a field declared as a single record tolerates arriving as a
//! list of records and vice versa.

pub mod coerce;
pub mod literal;

pub use coerce::coerce_scalar;
pub use literal::parse_tuple_literal;

use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::trace;

use crate::error::DecodeError;
use crate::type_def::{ensure_constructible, resolved_fields, Record, ScalarKind, TypeRef};
use crate::value::{OpenValue, Primitive, RecordValue, Typed};

/// Options controlling one decode invocation.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Keep input fields absent from the type descriptor as extra dynamic
    /// fields (open-record semantics). When false they are dropped.
    pub reserve_extra_attr: bool,
    /// Set declared-but-absent fields to null. When false they stay unset.
    pub init_empty_attr: bool,
    /// Declared types passed through unconverted (opaque payload), by
    /// descriptor name.
    pub reserved_types: HashSet<&'static str>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            reserve_extra_attr: true,
            init_empty_attr: true,
            reserved_types: HashSet::new(),
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve_extra_attr(mut self, v: bool) -> Self {
        self.reserve_extra_attr = v;
        self
    }

    pub fn init_empty_attr(mut self, v: bool) -> Self {
        self.init_empty_attr = v;
        self
    }

    /// Marks `T` as a reserved type: subtrees targeting it bypass recursion.
    pub fn reserve<T: Record>(mut self) -> Self {
        self.reserved_types.insert(T::descriptor().name);
        self
    }
}

/// Decodes a primitive tree against an optional target type.
///
/// `Ok(None)` means the node is dropped: sequences omit the element,
/// mappings leave the field unset. With no target and
/// `reserve_extra_attr` false the whole subtree is dropped.
///
/// ```
/// use objbind::{decode, DecodeOptions, Primitive, Typed};
///
/// let value = Primitive::from(serde_json::json!({"name": "Tom", "age": 20}));
/// let decoded = decode(&value, None, &DecodeOptions::default()).unwrap();
/// assert!(matches!(decoded, Some(Typed::Open(_))));
/// ```
pub fn decode(
    value: &Primitive,
    target: Option<&TypeRef>,
    opts: &DecodeOptions,
) -> Result<Option<Typed>, DecodeError> {
    if target.is_none() && !opts.reserve_extra_attr {
        return Ok(None);
    }
    if let Some(desc) = target.and_then(TypeRef::descriptor) {
        if opts.reserved_types.contains(desc.name) {
            trace!(type_name = desc.name, "reserved type passthrough");
            return Ok(Some(Typed::Prim(value.clone())));
        }
    }
    match value {
        Primitive::Array(items) => decode_sequence(items, target, opts),
        Primitive::Object(map) => decode_mapping(map, target, opts),
        scalar => decode_scalar(scalar, target),
    }
}

/// Decodes a primitive tree into an instance of the declared type `T`.
pub fn decode_as<T: Record>(
    value: &Primitive,
    opts: &DecodeOptions,
) -> Result<Typed, DecodeError> {
    let target = TypeRef::record::<T>();
    Ok(decode(value, Some(&target), opts)?.unwrap_or_else(Typed::null))
}

fn decode_sequence(
    items: &[Primitive],
    target: Option<&TypeRef>,
    opts: &DecodeOptions,
) -> Result<Option<Typed>, DecodeError> {
    // A declared container contributes its element type; any other target is
    // used directly as the element type.
    let element = match target {
        None => None,
        Some(TypeRef::Seq(t)) => Some(&**t),
        Some(other) => Some(other),
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(typed) = decode(item, element, opts)? {
            out.push(typed);
        }
    }
    Ok(Some(Typed::Seq(out)))
}

fn decode_mapping(
    map: &IndexMap<String, Primitive>,
    target: Option<&TypeRef>,
    opts: &DecodeOptions,
) -> Result<Option<Typed>, DecodeError> {
    // Mapping-of-K-to-T: every value decodes against the declared value type.
    if let Some(TypeRef::Map(value_ty)) = target {
        let mut fields = IndexMap::new();
        for (k, v) in map {
            if let Some(typed) = decode(v, Some(value_ty), opts)? {
                fields.insert(k.clone(), typed);
            }
        }
        return Ok(Some(open_record(fields)));
    }

    let desc = target.and_then(TypeRef::descriptor);
    if let Some(d) = desc {
        ensure_constructible(d).map_err(|_| DecodeError::ConstructorRequiresArguments {
            type_name: d.name,
        })?;
    }
    let declared = desc.map(resolved_fields);

    let mut fields: IndexMap<String, Typed> = IndexMap::new();
    for (k, v) in map {
        let field_ty = declared.as_ref().and_then(|d| d.get(k.as_str()));
        // An undeclared field recurses with no target; the top-level rule
        // then drops it when extra attrs are not reserved.
        if let Some(typed) = decode(v, field_ty, opts)? {
            fields.insert(k.clone(), typed);
        }
    }

    if opts.init_empty_attr {
        if let Some(declared) = &declared {
            for name in declared.keys() {
                if !fields.contains_key(*name) {
                    fields.insert((*name).to_string(), Typed::null());
                }
            }
        }
    }

    Ok(Some(match desc {
        Some(d) => {
            let mut rec = RecordValue::new(d);
            rec.fields = fields;
            Typed::Record(Rc::new(RefCell::new(rec)))
        }
        None => open_record(fields),
    }))
}

fn decode_scalar(
    value: &Primitive,
    target: Option<&TypeRef>,
) -> Result<Option<Typed>, DecodeError> {
    if value.is_null() {
        // A null node is dropped: sequences omit it, mappings skip the
        // assignment and leave back-filling to `init_empty_attr`.
        return Ok(None);
    }
    let Some(target) = target else {
        return Ok(Some(Typed::Prim(value.clone())));
    };
    match target {
        TypeRef::Any => Ok(Some(Typed::Prim(value.clone()))),
        TypeRef::Tuple => match value {
            Primitive::Str(s) => Ok(Some(Typed::Seq(
                parse_tuple_literal(s)?.into_iter().map(Typed::Prim).collect(),
            ))),
            other => Err(DecodeError::ScalarCoercionFailure {
                target: "tuple",
                value_kind: other.kind(),
            }),
        },
        TypeRef::Scalar(kind) => {
            if scalar_kind(value) == Some(*kind) {
                Ok(Some(Typed::Prim(value.clone())))
            } else {
                coerce_scalar(value, *kind).map(|p| Some(Typed::Prim(p)))
            }
        }
        TypeRef::Record(f) => {
            let d = f();
            match d.from_scalar {
                Some(ctor) => ctor(value).map(Some),
                None => Err(DecodeError::ScalarCoercionFailure {
                    target: d.name,
                    value_kind: value.kind(),
                }),
            }
        }
        TypeRef::Seq(_) => Err(DecodeError::ScalarCoercionFailure {
            target: "sequence",
            value_kind: value.kind(),
        }),
        TypeRef::Map(_) => Err(DecodeError::ScalarCoercionFailure {
            target: "mapping",
            value_kind: value.kind(),
        }),
    }
}

fn open_record(fields: IndexMap<String, Typed>) -> Typed {
    Typed::Open(Rc::new(RefCell::new(OpenValue::with_fields(fields))))
}

fn scalar_kind(value: &Primitive) -> Option<ScalarKind> {
    match value {
        Primitive::Bool(_) => Some(ScalarKind::Bool),
        Primitive::Int(_) => Some(ScalarKind::Int),
        Primitive::Float(_) => Some(ScalarKind::Float),
        Primitive::Decimal(_) => Some(ScalarKind::Decimal),
        Primitive::Str(_) => Some(ScalarKind::Str),
        Primitive::Bytes(_) => Some(ScalarKind::Bytes),
        Primitive::Date(_) => Some(ScalarKind::Date),
        Primitive::Time(_) => Some(ScalarKind::Time),
        Primitive::DateTime(_) => Some(ScalarKind::DateTime),
        Primitive::Duration(_) => Some(ScalarKind::Duration),
        Primitive::Null | Primitive::Array(_) | Primitive::Object(_) => None,
    }
}
