//! `objbind` — bidirectional mapping between untyped primitive trees and
//! statically declared record types.
//!
//! A [`Primitive`] tree is the shape an external JSON/YAML parser produces:
//! scalars, ordered sequences, key-ordered mappings. [`decode`] binds such a
//! tree to registered record types, producing a [`Typed`] graph; [`encode`]
//! walks a typed graph (including cyclic ones) back into a primitive tree
//! ready for an external dumper.
//!
//! ```
//! use objbind::{decode_as, encode, DecodeOptions, EncodeOptions, Record};
//! use objbind::Primitive;
//!
//! #[derive(Record)]
//! #[allow(dead_code)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! let input = Primitive::from(serde_json::json!({"name": "Tom", "age": 20}));
//! let person = decode_as::<Person>(&input, &DecodeOptions::default()).unwrap();
//! let tree = encode(&person, &EncodeOptions::default());
//! assert_eq!(serde_json::Value::from(tree), serde_json::json!({"name": "Tom", "age": 20}));
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod type_def;
pub mod value;

pub use decode::{coerce_scalar, decode, decode_as, parse_tuple_literal, DecodeOptions};
pub use encode::{
    encode, EncodeOptions, PathSet, DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT,
    DEFAULT_MAX_DEPTH, DEFAULT_TIME_FORMAT,
};
pub use error::{DecodeError, EncodeError};
pub use type_def::{
    ensure_constructible, resolved_fields, Constructibility, DescriptorBuilder, DescriptorFn,
    Record, ScalarCtor, ScalarKind, TypeDescriptor, TypeRef,
};
pub use value::{DynValue, OpenRef, OpenValue, Primitive, RecordRef, RecordValue, Typed};

pub use objbind_derive::Record;

// Used by generated code; not public API.
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
