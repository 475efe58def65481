//! Field resolution over registered descriptors.

use indexmap::IndexMap;

use super::{Constructibility, TypeDescriptor, TypeRef};
use crate::error::DecodeError;

/// Ordered field-name-to-type mapping for a declared type: base-type fields
/// first (deepest base first), own fields appended, own fields overriding on
/// name collision without changing the inherited position.
///
/// Resolution is lazy: run per decode call, never cached across calls.
pub fn resolved_fields(desc: &'static TypeDescriptor) -> IndexMap<&'static str, TypeRef> {
    let mut out = match desc.base {
        Some(base) => resolved_fields(base()),
        None => IndexMap::new(),
    };
    for (name, ty) in &desc.fields {
        out.insert(*name, ty.clone());
    }
    out
}

/// Checked before any instance is created: mapping-to-record decode always
/// constructs first and populates second, so a type requiring constructor
/// arguments can never be decoded from a mapping.
pub fn ensure_constructible(desc: &'static TypeDescriptor) -> Result<(), DecodeError> {
    match desc.constructible {
        Constructibility::ZeroArg => Ok(()),
        Constructibility::RequiresArgs => Err(DecodeError::NotZeroArgConstructible {
            type_name: desc.name,
        }),
    }
}
