//! Resolved constructor-argument nodes.

use crate::ValueType;

/// A resolved constructor argument attached to a specification node.
///
/// One tagged variant per resolved reference kind. Transformers match on
/// these exhaustively, so an unhandled combination is a compile error in
/// the backend rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentNode {
    /// A literal value with its declared type.
    Literal {
        key: String,
        value_type: ValueType,
        value: String,
    },

    /// A reference to a declared function, carrying its concrete
    /// runtime type.
    FunctionRef {
        key: String,
        function_name: String,
        concrete_type: String,
    },

    /// A reference to a field owned directly by a record type.
    DirectFieldRef {
        key: String,
        record_type_key: String,
        field_name: String,
        field_type: ValueType,
    },

    /// A reference to a record type's pointer-like association with
    /// another record type.
    RecordReferenceRef {
        key: String,
        record_type_key: String,
        reference_name: String,
        target_type_key: String,
    },

    /// A reference to a field reached through one reference hop.
    ReferencedFieldRef {
        key: String,
        record_type_key: String,
        reference_name: String,
        target_type_key: String,
        field_name: String,
        field_type: ValueType,
    },

    /// A reference to a hydrator in the enclosing sequence.
    HydratorRef { key: String, hydrator_key: String },

    /// A reference to a named string set.
    StringSetRef { key: String, set_key: String },
}

impl ArgumentNode {
    /// The argument key this node resolves under.
    pub fn key(&self) -> &str {
        match self {
            Self::Literal { key, .. }
            | Self::FunctionRef { key, .. }
            | Self::DirectFieldRef { key, .. }
            | Self::RecordReferenceRef { key, .. }
            | Self::ReferencedFieldRef { key, .. }
            | Self::HydratorRef { key, .. }
            | Self::StringSetRef { key, .. } => key,
        }
    }

    /// The variant name, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "Literal",
            Self::FunctionRef { .. } => "FunctionRef",
            Self::DirectFieldRef { .. } => "DirectFieldRef",
            Self::RecordReferenceRef { .. } => "RecordReferenceRef",
            Self::ReferencedFieldRef { .. } => "ReferencedFieldRef",
            Self::HydratorRef { .. } => "HydratorRef",
            Self::StringSetRef { .. } => "StringSetRef",
        }
    }
}

/// A node that carries constructor-argument descriptors plus the resolved
/// argument nodes they refer to.
///
/// Descriptor keys resolve within the implementing node's own argument map
/// only; there is no outer scope to fall back to.
pub trait ArgumentSource {
    /// The ordered constructor-argument descriptors, verbatim.
    fn constructor_args(&self) -> &[String];

    /// Look up a resolved argument node by key.
    fn argument(&self, key: &str) -> Option<&ArgumentNode>;
}
