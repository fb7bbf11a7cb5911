//! Record sequence generator emission.
//!
//! Per record sequence: the regenerated base generator header holding the
//! generator class and the hydrator chain, and the write-once derived
//! header wiring the chain override back into the generator. Only random
//! sequences have an emission rule; other kinds are skipped with a logged
//! diagnostic and processing continues.

use std::collections::BTreeMap;

use recforge_spec::{ArgumentNode, Hydrator, RecordSequence, SequenceKind, Specification, ValueType};
use tracing::{info, warn};

use super::{GeneratorConfig, RUNTIME_NS, push_section};
use crate::artifact::{Tier, write_artifact};
use crate::descriptor::{Descriptor, TransformerKind};
use crate::error::{CodegenError, Result};
use crate::naming::{to_camel_case, to_pascal_case, to_screaming};
use crate::transform::{compile_constructor_arguments, transform};

pub struct RecordGeneratorCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RecordGeneratorCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, spec: &Specification) -> Result<()> {
        for sequence in &spec.record_sequences {
            match sequence.kind {
                SequenceKind::Random => {
                    info!(sequence = %sequence.key, "compiling generator sources");
                    self.compile_sequence(sequence)?;
                }
                SequenceKind::Other(ref kind) => {
                    warn!(
                        sequence = %sequence.key,
                        kind = %kind,
                        "unsupported generation kind, skipping sequence"
                    );
                }
            }
        }

        Ok(())
    }

    fn compile_sequence(&self, sequence: &RecordSequence) -> Result<()> {
        let type_name = to_pascal_case(&sequence.key);

        write_artifact(
            &self
                .config
                .path(&format!("generator/base/Base{type_name}Generator.h")),
            Tier::Base,
            &self.generate_base(sequence)?,
        )?;
        write_artifact(
            &self.config.path(&format!("generator/{type_name}Generator.h")),
            Tier::Derived,
            &self.generate_derived(sequence),
        )?;

        Ok(())
    }

    fn generate_base(&self, sequence: &RecordSequence) -> Result<String> {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&sequence.key);
        let guard = format!("BASE{}GENERATOR_H_", to_screaming(&type_name));
        let hydrators = sequence.hydrators_ordered();

        let mut code = String::new();

        code.push_str(&format!("// auto-generated C++ generator for `{}`\n", sequence.key));
        code.push('\n');
        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str("#include \"generator/RandomSetGenerator.h\"\n");
        for reference_type in sequence.record_type.reference_type_keys() {
            code.push_str(&format!(
                "#include \"generator/{}Generator.h\"\n",
                to_pascal_case(&reference_type)
            ));
        }
        code.push_str(&format!("#include \"record/{type_name}.h\"\n"));
        code.push_str(&format!("#include \"record/{type_name}Util.h\"\n"));
        for hydrator in &hydrators {
            code.push_str(&format!("#include \"hydrator/{}.h\"\n", hydrator.template_type));
        }
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        push_section(&mut code, "RecordGenerator specialization (base class)");
        code.push('\n');
        code.push_str(&format!(
            "class Base{type_name}Generator: public RandomSetGenerator<{type_name}>\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!(
            "    Base{type_name}Generator(const string& name, GeneratorConfig& config, \
             NotificationCenter& notificationCenter) :\n"
        ));
        code.push_str(&format!(
            "        RandomSetGenerator<{type_name}>(name, config, notificationCenter)\n"
        ));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    void prepare(Stage stage, const GeneratorPool& pool)\n");
        code.push_str("    {\n");
        code.push_str("        // call generator implementation\n");
        code.push_str(&format!(
            "        RandomSetGenerator<{type_name}>::prepare(stage, pool);\n"
        ));

        if let Some(iterator) = &sequence.sequence_iterator {
            let args = compile_constructor_arguments(iterator, Some("_config"))?;

            code.push('\n');
            code.push_str("        if (stage.name() == name())\n");
            code.push_str("        {\n");
            code.push_str(&format!(
                "            registerTask(new {} ({}));\n",
                iterator.concrete_type,
                args.join(", ")
            ));
            code.push_str("        }\n");
        }

        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        push_section(&mut code, "HydratorChain specialization (base class)");
        code.push('\n');
        code.push_str("/**\n");
        code.push_str(&format!(" * Hydrator chain specialization for {type_name}.\n"));
        code.push_str(" */\n");
        code.push_str(&format!(
            "class Base{type_name}HydratorChain : public HydratorChain<{type_name}>\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str("    // hydrator typedefs\n");
        for hydrator in &hydrators {
            code.push_str(&format!(
                "    typedef {} {};\n",
                hydrator.concrete_type, hydrator.type_alias
            ));
        }
        code.push('\n');
        code.push_str(&format!(
            "    Base{type_name}HydratorChain(OperationMode& opMode, RandomStream& random, \
             GeneratorConfig& config) :\n"
        ));
        code.push_str(&format!("        HydratorChain<{type_name}>(opMode, random),\n"));

        for hydrator in &hydrators {
            let args = compile_constructor_arguments(*hydrator, Some("config"))?;
            code.push_str(&format!(
                "        _{}({}),\n",
                to_camel_case(&hydrator.key),
                args.join(", ")
            ));
        }

        code.push_str(&format!(
            "        _logger(Logger::get(\"{}.hydrator\"))\n",
            sequence.key
        ));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str(&format!("    virtual ~Base{type_name}HydratorChain()\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    /**\n");
        code.push_str("     * Object hydrating function.\n");
        code.push_str("     */\n");
        code.push_str(&format!("    void operator()(AutoPtr<{type_name}> recordPtr) const\n"));
        code.push_str("    {\n");
        code.push_str("        ensurePosition(recordPtr->genID());\n");
        code.push('\n');

        for hydrator in sequence.hydration_plan_hydrators() {
            code.push_str(&format!(
                "        apply(_{}, recordPtr);\n",
                to_camel_case(&hydrator.key)
            ));
        }

        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    /**\n");
        code.push_str("     * Invertible hydrator getter.\n");
        code.push_str("     */\n");
        code.push_str("    template<typename T>\n");
        code.push_str(&format!(
            "    const InvertibleHydrator<{type_name}, T>& invertableHydrator(\
             typename MethodTraits<{type_name}, T>::Setter setter)\n"
        ));
        code.push_str("    {\n");
        code.push_str(&format!(
            "        return HydratorChain<{type_name}>::invertableHydrator<T>(setter);\n"
        ));
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    // hydrator members\n");
        for hydrator in &hydrators {
            code.push_str(&format!(
                "    {} _{};\n",
                hydrator.type_alias,
                to_camel_case(&hydrator.key)
            ));
        }
        code.push('\n');
        code.push_str("    /**\n");
        code.push_str("     * Logger instance.\n");
        code.push_str("     */\n");
        code.push_str("    Logger& _logger;\n");
        code.push_str("};\n");
        code.push('\n');

        self.push_invertible_specializations(&mut code, sequence, &type_name)?;

        code.push('\n');
        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        Ok(code)
    }

    /// One `invertableHydrator` specialization per distinct storage type,
    /// sorted by type name. Each branch compares the incoming setter
    /// against the setter the hydrator was constructed with; the first
    /// match wins, unmatched setters fall through to the base chain.
    fn push_invertible_specializations(
        &self,
        code: &mut String,
        sequence: &RecordSequence,
        type_name: &str,
    ) -> Result<()> {
        let mut groups: BTreeMap<String, Vec<&Hydrator>> = BTreeMap::new();
        for hydrator in sequence.hydrators_ordered() {
            if hydrator.invertible {
                groups
                    .entry(self.storage_type(hydrator)?)
                    .or_default()
                    .push(hydrator);
            }
        }

        for (storage_type, hydrators) in &groups {
            code.push_str("/**\n");
            code.push_str(&format!(
                " * Invertible hydrator getter ({storage_type} specialization).\n"
            ));
            code.push_str(" */\n");
            code.push_str("template<>\n");
            code.push_str(&format!(
                "const InvertibleHydrator<{type_name}, {storage_type}>& \
                 Base{type_name}HydratorChain::invertableHydrator<{storage_type}>(\
                 MethodTraits<{type_name}, {storage_type}>::Setter setter)\n"
            ));
            code.push_str("{\n");

            for hydrator in hydrators {
                let setter = self.field_setter(hydrator)?;
                code.push_str(&format!(
                    "    if (setter == static_cast<MethodTraits<{type_name}, \
                     {storage_type}>::Setter>({setter}))\n"
                ));
                code.push_str("    {\n");
                code.push_str(&format!("        return _{};\n", to_camel_case(&hydrator.key)));
                code.push_str("    }\n");
            }

            code.push('\n');
            code.push_str(&format!(
                "    return HydratorChain<{type_name}>::\
                 invertableHydrator<{storage_type}>(setter);\n"
            ));
            code.push_str("}\n");
        }

        Ok(())
    }

    /// The fixed-width type an invertible hydrator's field is stored as.
    /// Enum values are stored as machine-word-sized unsigned integers.
    fn storage_type(&self, hydrator: &Hydrator) -> Result<String> {
        let node = hydrator
            .arguments
            .get("field")
            .ok_or_else(|| CodegenError::MissingRequiredArgument("field".to_string()))?;

        let ArgumentNode::DirectFieldRef { field_type, .. } = node else {
            return Err(CodegenError::UnsupportedArgument {
                key: node.key().to_string(),
                kind: node.kind_name(),
            });
        };

        Ok(match field_type {
            ValueType::Enum => self.config.word_size.enum_storage_type().to_string(),
            other => other.cpp_name(),
        })
    }

    fn field_setter(&self, hydrator: &Hydrator) -> Result<String> {
        let descriptor = Descriptor {
            kind: TransformerKind::FieldSetter,
            arg_key: Some("field".to_string()),
            optional: false,
        };

        transform(&descriptor, hydrator.arguments.get("field"), None)?
            .ok_or_else(|| CodegenError::MissingRequiredArgument("field".to_string()))
    }

    fn generate_derived(&self, sequence: &RecordSequence) -> String {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&sequence.key);
        let guard = format!("{}GENERATOR_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str(&format!(
            "#include \"generator/base/Base{type_name}Generator.h\"\n"
        ));
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        push_section(&mut code, "RecordGenerator specialization");
        code.push('\n');
        code.push_str(&format!(
            "class {type_name}Generator: public Base{type_name}Generator\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!(
            "    typedef RecordTraits<{type_name}>::HydratorChainType HydratorChainType;\n"
        ));
        code.push('\n');
        code.push_str(&format!(
            "    {type_name}Generator(const string& name, GeneratorConfig& config, \
             NotificationCenter& notificationCenter) :\n"
        ));
        code.push_str(&format!(
            "        Base{type_name}Generator(name, config, notificationCenter)\n"
        ));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str(
            "    HydratorChainType hydratorChain(BaseHydratorChain::OperationMode opMode, \
             RandomStream& random);\n",
        );
        code.push_str("};\n");
        code.push('\n');
        push_section(&mut code, "HydratorChain specialization");
        code.push('\n');
        code.push_str(&format!(
            "class {type_name}HydratorChain : public Base{type_name}HydratorChain\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!(
            "    {type_name}HydratorChain(OperationMode& opMode, RandomStream& random, \
             GeneratorConfig& config) :\n"
        ));
        code.push_str(&format!(
            "        Base{type_name}HydratorChain(opMode, random, config)\n"
        ));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str(&format!("    virtual ~{type_name}HydratorChain()\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        push_section(&mut code, "base method definitions (don't modify)");
        code.push('\n');
        code.push_str(&format!(
            "inline {type_name}HydratorChain {type_name}Generator::hydratorChain(\
             BaseHydratorChain::OperationMode opMode, RandomStream& random)\n"
        ));
        code.push_str("{\n");
        code.push_str(&format!(
            "    return {type_name}HydratorChain(opMode, random, _config);\n"
        ));
        code.push_str("}\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }
}
