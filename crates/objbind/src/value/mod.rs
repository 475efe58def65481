pub mod primitive;
pub mod typed;

pub use primitive::Primitive;
pub use typed::{DynValue, OpenRef, OpenValue, RecordRef, RecordValue, Typed};
