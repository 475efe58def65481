//! Declared-type descriptors.
//!
//! The mapper never inspects live values to learn a type's shape. Each
//! record type registers a [`TypeDescriptor`] holding its ordered field
//! list, its base type, and its construction capabilities, either by hand
//! through [`DescriptorBuilder`] or via `#[derive(Record)]`.

pub mod builder;
pub mod descriptor;

pub use builder::DescriptorBuilder;
pub use descriptor::{ensure_constructible, resolved_fields};

use crate::error::DecodeError;
use crate::value::{Primitive, Typed};

/// Terminal scalar kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    Int,
    Float,
    Bool,
    Decimal,
    Bytes,
    Date,
    Time,
    DateTime,
    Duration,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
        }
    }
}

/// Lazily resolves a record descriptor. The indirection keeps descriptors
/// in `static` storage while still allowing recursive and mutually
/// recursive type declarations.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

/// Constructs a record value from a single scalar, the coercion escape
/// hatch for custom value types wrapping primitives.
pub type ScalarCtor = fn(&Primitive) -> Result<Typed, DecodeError>;

/// The declared type of a field or decode target.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// No expectation; the value passes through shaped as it arrives.
    Any,
    Scalar(ScalarKind),
    /// Tuple-like shape, decoded from a strict string literal.
    Tuple,
    /// Sequence of the element type.
    Seq(Box<TypeRef>),
    /// Mapping of string keys to the element type.
    Map(Box<TypeRef>),
    /// A declared record type.
    Record(DescriptorFn),
}

impl TypeRef {
    pub fn str() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    pub fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    pub fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    pub fn decimal() -> Self {
        Self::Scalar(ScalarKind::Decimal)
    }

    pub fn bytes() -> Self {
        Self::Scalar(ScalarKind::Bytes)
    }

    pub fn date() -> Self {
        Self::Scalar(ScalarKind::Date)
    }

    pub fn time() -> Self {
        Self::Scalar(ScalarKind::Time)
    }

    pub fn date_time() -> Self {
        Self::Scalar(ScalarKind::DateTime)
    }

    pub fn duration() -> Self {
        Self::Scalar(ScalarKind::Duration)
    }

    pub fn seq(element: TypeRef) -> Self {
        Self::Seq(Box::new(element))
    }

    pub fn map(value: TypeRef) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn record<T: Record>() -> Self {
        Self::Record(T::descriptor)
    }

    /// For container refs, the declared element type; `None` otherwise.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Seq(t) | Self::Map(t) => Some(t),
            _ => None,
        }
    }

    /// Descriptor of the referenced record type, if this is a record ref.
    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        match self {
            Self::Record(f) => Some(f()),
            _ => None,
        }
    }
}

/// Whether a type can be instantiated with zero arguments. Only zero-arg
/// constructible types are decodable from a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructibility {
    ZeroArg,
    RequiresArgs,
}

/// Registered shape of one declared record type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub name: &'static str,
    /// Base type whose fields merge in before this type's own fields.
    pub base: Option<DescriptorFn>,
    /// Own fields, declaration order.
    pub fields: Vec<(&'static str, TypeRef)>,
    pub constructible: Constructibility,
    /// Single-argument construction from a scalar, when supported.
    pub from_scalar: Option<ScalarCtor>,
}

/// A statically declared record type.
///
/// Implemented by hand over a [`DescriptorBuilder`]-built `Lazy` static, or
/// generated by `#[derive(Record)]`.
pub trait Record {
    fn descriptor() -> &'static TypeDescriptor;
}
