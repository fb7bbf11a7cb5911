//! Generator subsystem emission.
//!
//! The subsystem is the runtime component that owns the generation stages.
//! Its base class is regenerated on every run: it includes every sequence
//! generator header, seeds the stage-id counter, builds the stage list in
//! sequence order (ids assigned once, monotonically from zero), and
//! registers one generator per record sequence. The derived pair is the
//! user extension point and is written once.

use recforge_spec::Specification;
use tracing::info;

use super::{GeneratorConfig, RUNTIME_NS};
use crate::artifact::{Tier, write_artifact};
use crate::error::Result;
use crate::naming::to_pascal_case;

pub struct GeneratorSubsystemCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> GeneratorSubsystemCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, spec: &Specification) -> Result<()> {
        info!("compiling generator subsystem sources");

        write_artifact(
            &self.config.path("generator/base/BaseGeneratorSubsystem.h"),
            Tier::Base,
            &self.generate_base_header(),
        )?;
        write_artifact(
            &self.config.path("generator/base/BaseGeneratorSubsystem.cpp"),
            Tier::Base,
            &self.generate_base_source(spec),
        )?;
        write_artifact(
            &self.config.path("generator/GeneratorSubsystem.h"),
            Tier::Derived,
            &self.generate_header(),
        )?;
        write_artifact(
            &self.config.path("generator/GeneratorSubsystem.cpp"),
            Tier::Derived,
            &self.generate_source(),
        )?;

        Ok(())
    }

    fn generate_base_header(&self) -> String {
        let mut code = String::new();

        code.push_str("// auto-generated base generator subsystem C++ file\n");
        code.push('\n');
        code.push_str("#ifndef BASEGENERATORSUBSYSTEM_H_\n");
        code.push_str("#define BASEGENERATORSUBSYSTEM_H_\n");
        code.push('\n');
        code.push_str("#include \"generator/AbstractGeneratorSubsystem.h\"\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("class BaseGeneratorSubsystem: public AbstractGeneratorSubsystem\n");
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(
            "    BaseGeneratorSubsystem(NotificationCenter& notificationCenter, \
             const vector<bool>& executeStages) :\n",
        );
        code.push_str("        AbstractGeneratorSubsystem(notificationCenter, executeStages)\n");
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    virtual ~BaseGeneratorSubsystem()\n");
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    virtual void registerGenerators();\n");
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str("#endif /* BASEGENERATORSUBSYSTEM_H_ */\n");

        code
    }

    fn generate_base_source(&self, spec: &Specification) -> String {
        let mut code = String::new();

        code.push_str("// auto-generated base generator subsystem C++ file\n");
        code.push('\n');
        code.push_str("#include \"generator/base/BaseGeneratorSubsystem.h\"\n");

        for sequence in &spec.record_sequences {
            code.push_str(&format!(
                "#include \"generator/{}Generator.h\"\n",
                to_pascal_case(&sequence.key)
            ));
        }

        code.push('\n');
        code.push_str("using namespace std;\n");
        code.push_str("using namespace Poco;\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("// the initial stage ID should always be zero\n");
        code.push_str("I32u RecordGenerator::Stage::NEXT_STAGE_ID = 0;\n");
        code.push('\n');
        code.push_str("// register the valid generation stages\n");
        code.push_str("RecordGenerator::StageList initList()\n");
        code.push_str("{\n");
        code.push_str("    RecordGenerator::StageList tmp;\n");
        code.push('\n');

        for sequence in &spec.record_sequences {
            code.push_str(&format!(
                "    tmp.push_back(RecordGenerator::Stage(\"{}\"));\n",
                sequence.key
            ));
        }

        code.push('\n');
        code.push_str("    return tmp;\n");
        code.push_str("}\n");
        code.push('\n');
        code.push_str("const RecordGenerator::StageList RecordGenerator::STAGES(initList());\n");
        code.push('\n');
        code.push_str("// register the record sequence generators\n");
        code.push_str("void BaseGeneratorSubsystem::registerGenerators()\n");
        code.push_str("{\n");

        for sequence in &spec.record_sequences {
            code.push_str(&format!(
                "    registerGenerator<{}::{}Generator>(\"{}\");\n",
                self.config.namespace,
                to_pascal_case(&sequence.key),
                sequence.key
            ));
        }

        code.push_str("}\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));

        code
    }

    fn generate_header(&self) -> String {
        let mut code = String::new();

        code.push_str("#ifndef GENERATORSUBSYSTEM_H_\n");
        code.push_str("#define GENERATORSUBSYSTEM_H_\n");
        code.push('\n');
        code.push_str("#include \"generator/base/BaseGeneratorSubsystem.h\"\n");
        code.push('\n');
        code.push_str("using namespace std;\n");
        code.push_str("using namespace Poco;\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("class GeneratorSubsystem : public BaseGeneratorSubsystem\n");
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(
            "    GeneratorSubsystem(NotificationCenter& notificationCenter, \
             const vector<bool>& executeStages) :\n",
        );
        code.push_str("        BaseGeneratorSubsystem(notificationCenter, executeStages)\n");
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    virtual ~GeneratorSubsystem()\n");
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    virtual void registerGenerators();\n");
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str("#endif /* GENERATORSUBSYSTEM_H_ */\n");

        code
    }

    fn generate_source(&self) -> String {
        let mut code = String::new();

        code.push_str("#include \"generator/GeneratorSubsystem.h\"\n");
        code.push('\n');
        code.push_str("using namespace std;\n");
        code.push_str("using namespace Poco;\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("void GeneratorSubsystem::registerGenerators()\n");
        code.push_str("{\n");
        code.push_str("    BaseGeneratorSubsystem::registerGenerators();\n");
        code.push('\n');
        code.push_str("    // register additional generators here\n");
        code.push_str("}\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));

        code
    }
}
