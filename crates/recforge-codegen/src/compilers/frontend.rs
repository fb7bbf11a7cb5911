//! Application entry-point emission.

use recforge_spec::Specification;
use tracing::info;

use super::{GeneratorConfig, RUNTIME_NS};
use crate::artifact::{Tier, write_artifact};
use crate::error::Result;

/// Emits `core/main.cpp`, the application entry point.
///
/// The file is derived-tier: users routinely customize the entry point, so
/// it is written once and never regenerated.
pub struct FrontendCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> FrontendCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, _spec: &Specification) -> Result<()> {
        info!("compiling frontend sources");

        write_artifact(
            &self.config.path("core/main.cpp"),
            Tier::Derived,
            &self.generate_main(),
        )?;

        Ok(())
    }

    fn generate_main(&self) -> String {
        let mut code = String::new();

        code.push_str("#include \"core/constants.h\"\n");
        code.push_str("#include \"core/Frontend.h\"\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("/**\n");
        code.push_str(" * Application name.\n");
        code.push_str(" */\n");
        code.push_str(&format!(
            "const String Constant::APP_NAME = \"{} - Parallel Data Generator\";\n",
            self.config.generator_name
        ));
        code.push('\n');
        code.push_str("/**\n");
        code.push_str(" * Application version.\n");
        code.push_str(" */\n");
        code.push_str("const String Constant::APP_VERSION = \"0.1.0\";\n");
        code.push('\n');
        code.push_str(&format!("}} // {RUNTIME_NS} namespace\n"));
        code.push('\n');
        code.push_str("// define the application main method\n");
        code.push_str(&format!("POCO_APP_MAIN({RUNTIME_NS}::Frontend)\n"));

        code
    }
}
