//! Generation components.
//!
//! Each component owns one slice of the emitted source tree and exposes
//! `compile(&Specification)`. [`compile_specification`] runs them all in the
//! order the output layout expects. Components are stateless beyond the
//! shared [`GeneratorConfig`]; all ordering in the emitted code comes from
//! order keys and sorted name lists, never from map iteration order.

mod collector;
mod config;
mod frontend;
mod generator;
mod record_type;
mod subsystem;

pub use collector::OutputCollectorCompiler;
pub use config::ConfigCompiler;
pub use frontend::FrontendCompiler;
pub use generator::RecordGeneratorCompiler;
pub use record_type::RecordTypeCompiler;
pub use subsystem::GeneratorSubsystemCompiler;

use std::path::PathBuf;

use recforge_spec::Specification;

use crate::error::Result;

/// The namespace of the runtime library the emitted sources link against.
pub(crate) const RUNTIME_NS: &str = "RecForge";

/// Target word width of the machine the emitted sources are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSize {
    Bits32,
    Bits64,
}

impl WordSize {
    /// The fixed-width type Enum field values are stored as.
    pub const fn enum_storage_type(self) -> &'static str {
        match self {
            Self::Bits32 => "I32u",
            Self::Bits64 => "I64u",
        }
    }
}

/// Run configuration shared by every generation component.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root of the emitted source tree.
    pub output_root: PathBuf,

    /// Generator name; names the parameter file and the application.
    pub generator_name: String,

    /// C++ namespace the emitted record types and generators live in.
    pub namespace: String,

    /// Word width of the generation target.
    pub word_size: WordSize,
}

impl GeneratorConfig {
    pub(crate) fn path(&self, relative: &str) -> PathBuf {
        self.output_root.join(relative)
    }
}

/// Append a banner-style section heading to an emitted source buffer.
pub(crate) fn push_section(code: &mut String, title: &str) {
    const RULE: &str =
        "// ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~";

    code.push_str(RULE);
    code.push('\n');
    code.push_str(&format!("// {title}\n"));
    code.push_str(RULE);
    code.push('\n');
}

/// Run every generation component over a specification.
pub fn compile_specification(config: &GeneratorConfig, spec: &Specification) -> Result<()> {
    FrontendCompiler::new(config).compile(spec)?;
    GeneratorSubsystemCompiler::new(config).compile(spec)?;
    ConfigCompiler::new(config).compile(spec)?;
    OutputCollectorCompiler::new(config).compile(spec)?;
    RecordTypeCompiler::new(config).compile(spec)?;
    RecordGeneratorCompiler::new(config).compile(spec)?;

    Ok(())
}
