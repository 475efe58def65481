use thiserror::Error;

/// Fatal decode failures. A decode error aborts the whole tree: these are
/// structural-contract violations, not per-node conditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("type `{type_name}` cannot be constructed without arguments")]
    NotZeroArgConstructible { type_name: &'static str },

    #[error("cannot instantiate `{type_name}` from a mapping: its constructor requires arguments")]
    ConstructorRequiresArguments { type_name: &'static str },

    #[error("malformed tuple literal: `{input}`")]
    UnparsableLiteral { input: String },

    #[error("cannot coerce {value_kind} scalar into `{target}`")]
    ScalarCoercionFailure {
        target: &'static str,
        value_kind: &'static str,
    },
}

/// Per-node encode failure. Recovered at the failing node: the node's value
/// degrades to null and traversal continues for siblings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("{reason}")]
    Node { reason: String },
}

impl EncodeError {
    pub fn node(reason: impl Into<String>) -> Self {
        Self::Node {
            reason: reason.into(),
        }
    }
}
