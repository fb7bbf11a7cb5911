//! Code generation backend for the RecForge data-generation runtime.
//!
//! Translates a resolved generator specification — record types, fields,
//! cross-references, hydration pipelines — into a tree of typed C++ source
//! files that link against the RecForge runtime library. The backend is
//! deterministic: identical input trees produce identical base artifacts.
//!
//! Emitted files come in two tiers. Base artifacts are regenerated on every
//! run; derived artifacts are created once and never overwritten, so user
//! customizations survive regeneration. See [`artifact`] for the policy and
//! [`compilers`] for the components that own each slice of the output tree.

pub mod artifact;
pub mod compilers;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod transform;

pub use artifact::{Tier, write_artifact};
pub use compilers::{
    ConfigCompiler, FrontendCompiler, GeneratorConfig, GeneratorSubsystemCompiler,
    OutputCollectorCompiler, RecordGeneratorCompiler, RecordTypeCompiler, WordSize,
    compile_specification,
};
pub use error::{CodegenError, Result};
