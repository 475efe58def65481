//! [`DescriptorBuilder`] — fluent construction of type descriptors.

use super::{Constructibility, DescriptorFn, Record, ScalarCtor, TypeDescriptor, TypeRef};

/// Builds a [`TypeDescriptor`] for manual registration.
///
/// ```
/// use objbind::{DescriptorBuilder, TypeRef};
///
/// let desc = DescriptorBuilder::new("Person")
///     .field("name", TypeRef::str())
///     .field("age", TypeRef::int())
///     .build();
/// assert_eq!(desc.fields.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: &'static str,
    base: Option<DescriptorFn>,
    fields: Vec<(&'static str, TypeRef)>,
    constructible: Constructibility,
    from_scalar: Option<ScalarCtor>,
}

impl DescriptorBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            base: None,
            fields: Vec::new(),
            constructible: Constructibility::ZeroArg,
            from_scalar: None,
        }
    }

    /// Declares the base type whose fields merge in before this type's own.
    pub fn base(mut self, base: DescriptorFn) -> Self {
        self.base = Some(base);
        self
    }

    /// Same as [`base`](Self::base), resolved from a `Record` impl.
    pub fn extends<T: Record>(self) -> Self {
        self.base(T::descriptor)
    }

    pub fn field(mut self, name: &'static str, ty: TypeRef) -> Self {
        self.fields.push((name, ty));
        self
    }

    /// Marks the type as needing constructor arguments; decoding it from a
    /// mapping then always fails.
    pub fn requires_args(mut self) -> Self {
        self.constructible = Constructibility::RequiresArgs;
        self
    }

    /// Registers single-argument construction from a scalar.
    pub fn from_scalar(mut self, ctor: ScalarCtor) -> Self {
        self.from_scalar = Some(ctor);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            base: self.base,
            fields: self.fields,
            constructible: self.constructible,
            from_scalar: self.from_scalar,
        }
    }
}
