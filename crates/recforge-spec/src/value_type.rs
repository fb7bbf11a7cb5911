//! Field value types understood by the generated runtime.

/// A field's resolved value type.
///
/// Mirrors the scalar types of the generated runtime plus vector-of-scalar
/// nesting. The compilers never infer types; they consume what the resolver
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// Signed integer types.
    I16,
    I32,
    I64,

    /// Unsigned integer types.
    I16u,
    I32u,
    I64u,

    /// Fixed-point decimal type.
    Decimal,

    /// Single character type.
    Char,

    /// Calendar date type.
    Date,

    /// String type.
    String,

    /// Enumerated type; the owning [`Field`](crate::Field) back-references
    /// an enum set, and the stored value is an ordinal into that set.
    Enum,

    /// Vector-of-scalar type.
    Vector(Box<ValueType>),
}

impl ValueType {
    /// The type name as spelled in emitted runtime source.
    pub fn cpp_name(&self) -> String {
        match self {
            Self::I16 => "I16".to_string(),
            Self::I32 => "I32".to_string(),
            Self::I64 => "I64".to_string(),
            Self::I16u => "I16u".to_string(),
            Self::I32u => "I32u".to_string(),
            Self::I64u => "I64u".to_string(),
            Self::Decimal => "Decimal".to_string(),
            Self::Char => "Char".to_string(),
            Self::Date => "Date".to_string(),
            Self::String => "String".to_string(),
            Self::Enum => "Enum".to_string(),
            Self::Vector(inner) => format!("vector<{}>", inner.cpp_name()),
        }
    }

    /// Whether range predicates apply to this type.
    ///
    /// Non-numeric fields are excluded from range predicates at the type
    /// level; this is the single source of truth for that decision.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I16 | Self::I32 | Self::I64 | Self::I16u | Self::I32u | Self::I64u | Self::Decimal
        )
    }

    /// Whether this is a vector-of-scalar type.
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// The single-element type: the inner type for vectors, `self` otherwise.
    pub fn element_type(&self) -> &ValueType {
        match self {
            Self::Vector(inner) => inner,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn cpp_name___scalars___match_runtime_spelling() {
        assert_eq!(ValueType::I64u.cpp_name(), "I64u");
        assert_eq!(ValueType::Decimal.cpp_name(), "Decimal");
        assert_eq!(ValueType::String.cpp_name(), "String");
        assert_eq!(ValueType::Enum.cpp_name(), "Enum");
    }

    #[test]
    fn cpp_name___vector___nests_element_type() {
        let ty = ValueType::Vector(Box::new(ValueType::I32u));
        assert_eq!(ty.cpp_name(), "vector<I32u>");
    }

    #[test]
    fn is_numeric___integers_and_decimal___true() {
        assert!(ValueType::I16.is_numeric());
        assert!(ValueType::I64u.is_numeric());
        assert!(ValueType::Decimal.is_numeric());
    }

    #[test]
    fn is_numeric___string_enum_date_vector___false() {
        assert!(!ValueType::String.is_numeric());
        assert!(!ValueType::Enum.is_numeric());
        assert!(!ValueType::Date.is_numeric());
        assert!(!ValueType::Vector(Box::new(ValueType::I64)).is_numeric());
    }

    #[test]
    fn element_type___vector___returns_inner() {
        let ty = ValueType::Vector(Box::new(ValueType::I16u));
        assert_eq!(ty.element_type(), &ValueType::I16u);
        assert_eq!(ValueType::Char.element_type(), &ValueType::Char);
    }
}
