//! Output collector stub emission.

use recforge_spec::Specification;
use tracing::info;

use super::{GeneratorConfig, RUNTIME_NS};
use crate::artifact::{Tier, write_artifact};
use crate::error::Result;

/// Emits `io/OutputCollector.cpp`, an empty extension point for custom
/// collector specializations. Derived-tier.
pub struct OutputCollectorCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> OutputCollectorCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, _spec: &Specification) -> Result<()> {
        info!("compiling output collector sources");

        let mut code = String::new();
        code.push_str("#include \"io/OutputCollector.h\"\n");
        code.push_str("#include \"record/Record.h\"\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str(&format!("}}  // namespace {RUNTIME_NS}\n"));

        write_artifact(
            &self.config.path("io/OutputCollector.cpp"),
            Tier::Derived,
            &code,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::super::WordSize;
    use super::*;

    #[test]
    fn compile___emits_empty_namespace_stub() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output_root: dir.path().to_path_buf(),
            generator_name: "shop".to_string(),
            namespace: "Shop".to_string(),
            word_size: WordSize::Bits64,
        };

        OutputCollectorCompiler::new(&config)
            .compile(&Specification::default())
            .unwrap();

        let stub = std::fs::read_to_string(dir.path().join("io/OutputCollector.cpp")).unwrap();
        assert!(stub.contains("#include \"io/OutputCollector.h\""));
        assert!(stub.contains("namespace RecForge {"));
    }
}
