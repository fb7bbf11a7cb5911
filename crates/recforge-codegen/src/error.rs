//! Error types for the code-generation backend.

use thiserror::Error;

/// Result alias used throughout the backend.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while compiling a specification to source.
///
/// Every variant here is fatal and aborts the generation run; a mistyped
/// descriptor must not silently produce broken code. The one recoverable
/// condition — a record sequence whose kind has no emission rule — is not
/// an error: the sequence is skipped with a logged diagnostic.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Malformed constructor-argument descriptor.
    #[error("bad argument transformer descriptor `{0}`")]
    InvalidDescriptor(String),

    /// Descriptor names a transformer kind that does not exist.
    #[error("unknown argument transformer kind `{0}`")]
    UnknownTransformerKind(String),

    /// A transformer received an argument-node variant it cannot lower.
    #[error("unsupported argument `{key}` of kind `{kind}`")]
    UnsupportedArgument { key: String, kind: &'static str },

    /// Non-optional descriptor with no matching argument node.
    #[error("missing required argument `{0}`")]
    MissingRequiredArgument(String),

    /// Vector-typed fields have no serializer emission rule.
    #[error("unsupported vector field `{field}` in record type `{record}`")]
    UnsupportedVectorField { record: String, field: String },

    /// I/O error during artifact emission or the parameter-file merge.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn CodegenError___invalid_descriptor___displays_descriptor() {
        let err = CodegenError::InvalidDescriptor("Literal(".to_string());

        assert_eq!(
            err.to_string(),
            "bad argument transformer descriptor `Literal(`"
        );
    }

    #[test]
    fn CodegenError___unsupported_argument___displays_key_and_kind() {
        let err = CodegenError::UnsupportedArgument {
            key: "field".to_string(),
            kind: "StringSetRef",
        };

        let msg = err.to_string();
        assert!(msg.contains("`field`"));
        assert!(msg.contains("StringSetRef"));
    }

    #[test]
    fn CodegenError___from_io_error___converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing properties file");
        let err: CodegenError = io_err.into();

        assert!(matches!(err, CodegenError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
