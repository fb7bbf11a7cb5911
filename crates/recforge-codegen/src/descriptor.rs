//! Constructor-argument descriptor parsing.
//!
//! Specification nodes describe their constructor arguments with a compact
//! descriptor mini-language: `Kind(arg)` with an optional trailing `*`
//! marking the argument optional, e.g. `Literal(probability)` or
//! `FieldGetter(field)*`. The descriptor names which transformer lowers the
//! argument and which key to resolve in the enclosing node's argument map.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CodegenError, Result};

static DESCRIPTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: pattern is a literal
    Regex::new(r"^([A-Za-z_]+)\(([A-Za-z_]*)\)(\*)?$").expect("descriptor pattern is valid")
});

/// The closed set of argument transformer kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformerKind {
    /// Lowers a literal value, expanding parameter references.
    Literal,
    /// Lowers a field/reference ref to a pointer-to-member setter.
    FieldSetter,
    /// Lowers a field ref to a typed getter construction.
    FieldGetter,
    /// Lowers a field/reference ref to a generator-pool inspector access.
    RandomSetInspector,
    /// Lowers a function ref to a typed registry lookup.
    FunctionRef,
    /// Emits an environment-variable name captured at parse time; takes no
    /// argument node.
    EnvVariable { var_name: String },
}

impl TransformerKind {
    /// The kind name as spelled in descriptors, for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Literal => "Literal",
            Self::FieldSetter => "FieldSetter",
            Self::FieldGetter => "FieldGetter",
            Self::RandomSetInspector => "RandomSetInspector",
            Self::FunctionRef => "FunctionRef",
            Self::EnvVariable { .. } => "EnvVariable",
        }
    }
}

/// A parsed constructor-argument descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Which transformer lowers this argument.
    pub kind: TransformerKind,

    /// The key to resolve in the enclosing node's own argument map.
    /// `None` for `EnvVariable` descriptors (which consume their
    /// parenthesized text as the variable name) and for empty-key
    /// descriptors.
    pub arg_key: Option<String>,

    /// Whether an absent argument node is tolerated.
    pub optional: bool,
}

/// Parse one descriptor string.
///
/// Fails with [`CodegenError::InvalidDescriptor`] when the string does not
/// match the grammar and [`CodegenError::UnknownTransformerKind`] when the
/// kind is not one of the closed set.
pub fn parse(descriptor: &str) -> Result<Descriptor> {
    let captures = DESCRIPTOR_PATTERN
        .captures(descriptor)
        .ok_or_else(|| CodegenError::InvalidDescriptor(descriptor.to_string()))?;

    let kind_name = &captures[1];
    let arg_text = &captures[2];
    let optional = captures.get(3).is_some();

    let (kind, arg_key) = match kind_name {
        "Literal" => (TransformerKind::Literal, key_of(arg_text)),
        "FieldSetter" => (TransformerKind::FieldSetter, key_of(arg_text)),
        "FieldGetter" => (TransformerKind::FieldGetter, key_of(arg_text)),
        "RandomSetInspector" => (TransformerKind::RandomSetInspector, key_of(arg_text)),
        "FunctionRef" => (TransformerKind::FunctionRef, key_of(arg_text)),
        // The parenthesized text is the environment variable name itself,
        // not an argument-node lookup key.
        "EnvVariable" => (
            TransformerKind::EnvVariable {
                var_name: arg_text.to_string(),
            },
            None,
        ),
        other => return Err(CodegenError::UnknownTransformerKind(other.to_string())),
    };

    Ok(Descriptor {
        kind,
        arg_key,
        optional,
    })
}

fn key_of(arg_text: &str) -> Option<String> {
    if arg_text.is_empty() {
        None
    } else {
        Some(arg_text.to_string())
    }
}
