//! Generator configuration emission.
//!
//! Three outputs: the parameter-file merge (the one place where existing
//! user content and specification content meet in a single file), the
//! regenerated `BaseGeneratorConfig.h`, and the write-once
//! `GeneratorConfig.h` extension point.

use std::fs;

use recforge_spec::{ArgumentNode, ArgumentSource, EstimatorKind, Specification};
use tracing::info;

use super::{GeneratorConfig, RUNTIME_NS};
use crate::artifact::{Tier, write_artifact};
use crate::descriptor::{Descriptor, TransformerKind};
use crate::error::{CodegenError, Result};
use crate::transform::{compile_constructor_arguments, transform};

/// Prefix of specification-managed keys in the parameter file.
const PARAM_PREFIX: &str = "generator.";

pub struct ConfigCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ConfigCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, spec: &Specification) -> Result<()> {
        info!("compiling generator config sources");

        self.merge_parameters(spec)?;
        write_artifact(
            &self.config.path("config/base/BaseGeneratorConfig.h"),
            Tier::Base,
            &self.generate_base_config(spec)?,
        )?;
        write_artifact(
            &self.config.path("config/GeneratorConfig.h"),
            Tier::Derived,
            &self.generate_config(),
        )?;

        Ok(())
    }

    /// Merge the current parameters into `config/<name>-node.properties`.
    ///
    /// The file must already exist; it is a required input, not an emitted
    /// artifact. Comment and blank lines survive verbatim, as do lines
    /// whose key is unprefixed or whose prefixed suffix the specification
    /// no longer declares. Lines being re-emitted are dropped, then one
    /// `generator.key = value` line per current parameter is appended in
    /// deterministic key order.
    fn merge_parameters(&self, spec: &Specification) -> Result<()> {
        let path = self.config.path(&format!(
            "config/{}-node.properties",
            self.config.generator_name
        ));
        let existing = fs::read_to_string(&path)?;

        let mut lines: Vec<String> = Vec::new();
        for line in existing.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                lines.push(line.to_string());
                continue;
            }

            let key = match line.find('=') {
                Some(pos) => line[..pos].trim(),
                None => line,
            };

            let Some(suffix) = key.strip_prefix(PARAM_PREFIX) else {
                lines.push(line.to_string());
                continue;
            };

            if !spec.parameters.contains_key(suffix) {
                lines.push(line.to_string());
            }
        }

        let mut merged = String::new();
        for line in &lines {
            merged.push_str(line);
            merged.push('\n');
        }
        for (key, value) in &spec.parameters {
            merged.push_str(&format!("{PARAM_PREFIX}{key} = {value}\n"));
        }

        fs::write(&path, merged)?;

        Ok(())
    }

    fn generate_base_config(&self, spec: &Specification) -> Result<String> {
        let mut code = String::new();

        code.push_str("// auto-generated base generator config C++ file\n");
        code.push('\n');
        code.push_str("#ifndef BASEGENERATORCONFIG_H_\n");
        code.push_str("#define BASEGENERATORCONFIG_H_\n");
        code.push('\n');
        code.push_str("#include \"config/AbstractGeneratorConfig.h\"\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("class BaseGeneratorConfig: public AbstractGeneratorConfig\n");
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(
            "    BaseGeneratorConfig(GeneratorPool& generatorPool) : \
             AbstractGeneratorConfig(generatorPool)\n",
        );
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    virtual void configurePartitioning()\n");
        code.push_str("    {\n");

        for sequence in &spec.record_sequences {
            let Some(estimator) = &sequence.cardinality_estimator else {
                continue;
            };

            match estimator.kind {
                EstimatorKind::LinearScale => {
                    let node = estimator.argument("base_cardinality").ok_or_else(|| {
                        CodegenError::MissingRequiredArgument("base_cardinality".to_string())
                    })?;
                    let ArgumentNode::Literal { value_type, .. } = node else {
                        return Err(CodegenError::UnsupportedArgument {
                            key: node.key().to_string(),
                            kind: node.kind_name(),
                        });
                    };
                    let expr = lower_literal(node, "base_cardinality")?;

                    code.push_str(&format!(
                        "        // setup linear scale estimator for {}\n",
                        sequence.key
                    ));
                    code.push_str(&format!(
                        "        setString(\"partitioning.{}.base-cardinality\", \
                         toString<{}>({}));\n",
                        sequence.key,
                        value_type.cpp_name(),
                        expr
                    ));
                    code.push_str(&format!(
                        "        computeLinearScalePartitioning(\"{}\");\n",
                        sequence.key
                    ));
                }
            }
        }

        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    virtual void configureFunctions()\n");
        code.push_str("    {\n");
        code.push_str("        // register prototype functions\n");

        for function in &spec.functions {
            let args = compile_constructor_arguments(function, None)?;
            code.push_str(&format!(
                "        addFunction(new {}({}));\n",
                function.concrete_type,
                args.join(", ")
            ));
        }

        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    virtual void configureSets()\n");
        code.push_str("    {\n");
        code.push_str("        // bind enumerated sets to config members\n");

        for enum_set in &spec.enum_sets {
            let node = enum_set
                .argument("path")
                .ok_or_else(|| CodegenError::MissingRequiredArgument("path".to_string()))?;
            let path = lower_literal(node, "path")?;

            code.push_str(&format!(
                "        bindEnumSet(\"{}\", {});\n",
                enum_set.key, path
            ));
        }

        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str("#endif /* BASEGENERATORCONFIG_H_ */\n");

        Ok(code)
    }

    fn generate_config(&self) -> String {
        let mut code = String::new();

        code.push_str("#ifndef GENERATORCONFIG_H_\n");
        code.push_str("#define GENERATORCONFIG_H_\n");
        code.push('\n');
        code.push_str("#include \"config/base/BaseGeneratorConfig.h\"\n");
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("class GeneratorConfig: public BaseGeneratorConfig\n");
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(
            "    GeneratorConfig(GeneratorPool& generatorPool) : \
             BaseGeneratorConfig(generatorPool)\n",
        );
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("protected:\n");
        code.push('\n');

        for (method, comment) in [
            ("configurePartitioning", "override or add partitioning config here"),
            ("configureFunctions", "override or add functions here"),
            ("configureSets", "override or add enumerated sets here"),
        ] {
            code.push_str(&format!("    virtual void {method}()\n"));
            code.push_str("    {\n");
            code.push_str(&format!("        BaseGeneratorConfig::{method}();\n"));
            code.push_str(&format!("        // {comment}\n"));
            code.push_str("    }\n");
            code.push('\n');
        }

        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str("#endif /* GENERATORCONFIG_H_ */\n");

        code
    }
}

/// Lower a literal node with no configuration accessor in scope.
fn lower_literal(node: &ArgumentNode, key: &str) -> Result<String> {
    let descriptor = Descriptor {
        kind: TransformerKind::Literal,
        arg_key: Some(key.to_string()),
        optional: false,
    };

    transform(&descriptor, Some(node), None)?
        .ok_or_else(|| CodegenError::MissingRequiredArgument(key.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use std::collections::BTreeMap;

    use recforge_spec::{
        CardinalityEstimator, EnumSet, FunctionDef, RecordSequence, RecordType, SequenceKind,
        ValueType,
    };

    use super::super::WordSize;
    use super::*;

    fn test_config(output_root: &std::path::Path) -> GeneratorConfig {
        GeneratorConfig {
            output_root: output_root.to_path_buf(),
            generator_name: "shop".to_string(),
            namespace: "Shop".to_string(),
            word_size: WordSize::Bits64,
        }
    }

    fn literal(key: &str, value_type: ValueType, value: &str) -> (String, ArgumentNode) {
        (
            key.to_string(),
            ArgumentNode::Literal {
                key: key.to_string(),
                value_type,
                value: value.to_string(),
            },
        )
    }

    fn write_properties(config: &GeneratorConfig, contents: &str) {
        let path = config.path("config/shop-node.properties");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn merge_parameters___keeps_comments_and_foreign_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_properties(
            &config,
            "# node settings\n\nlogging.level = debug\ngenerator.scale = 1.0\n",
        );

        let spec = Specification {
            parameters: BTreeMap::from([("scale".to_string(), "2.0".to_string())]),
            ..Specification::default()
        };
        ConfigCompiler::new(&config).compile(&spec).unwrap();

        let merged =
            std::fs::read_to_string(config.path("config/shop-node.properties")).unwrap();
        assert_eq!(
            merged,
            "# node settings\n\nlogging.level = debug\ngenerator.scale = 2.0\n"
        );
    }

    #[test]
    fn merge_parameters___undeclared_prefixed_key___is_retained() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_properties(&config, "generator.legacy = 7\n");

        let spec = Specification {
            parameters: BTreeMap::from([("scale".to_string(), "2.0".to_string())]),
            ..Specification::default()
        };
        ConfigCompiler::new(&config).compile(&spec).unwrap();

        let merged =
            std::fs::read_to_string(config.path("config/shop-node.properties")).unwrap();
        assert_eq!(merged, "generator.legacy = 7\ngenerator.scale = 2.0\n");
    }

    #[test]
    fn merge_parameters___parameters_appended_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_properties(&config, "");

        let spec = Specification {
            parameters: BTreeMap::from([
                ("zeta".to_string(), "1".to_string()),
                ("alpha".to_string(), "2".to_string()),
            ]),
            ..Specification::default()
        };
        ConfigCompiler::new(&config).compile(&spec).unwrap();

        let merged =
            std::fs::read_to_string(config.path("config/shop-node.properties")).unwrap();
        assert_eq!(merged, "generator.alpha = 2\ngenerator.zeta = 1\n");
    }

    #[test]
    fn compile___missing_properties_file___fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let err = ConfigCompiler::new(&config)
            .compile(&Specification::default())
            .unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }

    #[test]
    fn generate_base_config___estimator_function_and_set_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_properties(&config, "");

        let spec = Specification {
            functions: vec![FunctionDef {
                name: "Pr[card_type]".to_string(),
                concrete_type: "CombinedPrFunction<I64u>".to_string(),
                constructor_args: vec!["Literal(name)".to_string(), "Literal(path)".to_string()],
                arguments: BTreeMap::from([
                    literal("name", ValueType::String, "Pr[card_type]"),
                    literal("path", ValueType::String, "card_type.distribution"),
                ]),
            }],
            enum_sets: vec![EnumSet {
                key: "card_types".to_string(),
                constructor_args: vec!["Literal(path)".to_string()],
                arguments: BTreeMap::from([literal(
                    "path",
                    ValueType::String,
                    "card_types.set",
                )]),
            }],
            record_sequences: vec![RecordSequence {
                key: "customer".to_string(),
                kind: SequenceKind::Random,
                record_type: RecordType::default(),
                hydrators: vec![],
                hydration_plan: vec![],
                sequence_iterator: None,
                cardinality_estimator: Some(CardinalityEstimator {
                    kind: EstimatorKind::LinearScale,
                    constructor_args: vec!["Literal(base_cardinality)".to_string()],
                    arguments: BTreeMap::from([literal(
                        "base_cardinality",
                        ValueType::I64u,
                        "%customer.base-cardinality%",
                    )]),
                }),
            }],
            ..Specification::default()
        };

        ConfigCompiler::new(&config).compile(&spec).unwrap();

        let base =
            std::fs::read_to_string(config.path("config/base/BaseGeneratorConfig.h")).unwrap();
        assert!(base.contains(
            "setString(\"partitioning.customer.base-cardinality\", \
             toString<I64u>(parameter<I64u>(\"customer.base-cardinality\")));"
        ));
        assert!(base.contains("computeLinearScalePartitioning(\"customer\");"));
        assert!(base.contains(
            "addFunction(new CombinedPrFunction<I64u>(\"Pr[card_type]\", \
             \"card_type.distribution\"));"
        ));
        assert!(base.contains("bindEnumSet(\"card_types\", \"card_types.set\");"));
    }

    #[test]
    fn compile___derived_config___written_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_properties(&config, "");

        ConfigCompiler::new(&config)
            .compile(&Specification::default())
            .unwrap();

        let derived_path = config.path("config/GeneratorConfig.h");
        std::fs::write(&derived_path, "// customized\n").unwrap();

        write_properties(&config, "");
        ConfigCompiler::new(&config)
            .compile(&Specification::default())
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&derived_path).unwrap(),
            "// customized\n"
        );
    }
}
