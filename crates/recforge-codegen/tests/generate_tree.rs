//! End-to-end generation over a small two-sequence specification.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use recforge_codegen::{GeneratorConfig, WordSize, compile_specification};
use recforge_spec::{
    ArgumentNode, CardinalityEstimator, EnumSet, EstimatorKind, Field, FunctionDef, Hydrator,
    RecordSequence, RecordType, Reference, Specification, SequenceKind, ValueType,
};

/// Route compiler diagnostics through the test writer so `--nocapture`
/// shows them interleaved with assertions.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
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

fn field_ref(record: &str, name: &str, field_type: ValueType) -> (String, ArgumentNode) {
    (
        "field".to_string(),
        ArgumentNode::DirectFieldRef {
            key: "field".to_string(),
            record_type_key: record.to_string(),
            field_name: name.to_string(),
            field_type,
        },
    )
}

/// A shop generator: customers plus credit cards referencing them.
fn shop_spec() -> Specification {
    let customer_type = RecordType {
        key: "customer".to_string(),
        fields: vec![
            Field {
                name: "id".to_string(),
                order_key: 1,
                value_type: ValueType::I64u,
                enum_set: None,
            },
            Field {
                name: "status".to_string(),
                order_key: 2,
                value_type: ValueType::Enum,
                enum_set: Some("customer_status".to_string()),
            },
        ],
        references: vec![],
    };

    let customer = RecordSequence {
        key: "customer".to_string(),
        kind: SequenceKind::Random,
        record_type: customer_type,
        hydrators: vec![
            Hydrator {
                key: "set_id".to_string(),
                order_key: 1,
                template_type: "ConstValueHydrator".to_string(),
                concrete_type: "ConstValueHydrator<Customer, I64u>".to_string(),
                type_alias: "IdHydrator".to_string(),
                invertible: true,
                constructor_args: vec![
                    "FieldSetter(field)".to_string(),
                    "Literal(value)".to_string(),
                ],
                arguments: BTreeMap::from([
                    field_ref("customer", "id", ValueType::I64u),
                    literal("value", ValueType::I64u, "%customer.sequence.base%"),
                ]),
            },
            Hydrator {
                key: "set_status".to_string(),
                order_key: 2,
                template_type: "ClusteredEnumSetHydrator".to_string(),
                concrete_type: "ClusteredEnumSetHydrator<Customer, I64u>".to_string(),
                type_alias: "StatusHydrator".to_string(),
                invertible: true,
                constructor_args: vec!["FieldSetter(field)".to_string()],
                arguments: BTreeMap::from([field_ref("customer", "status", ValueType::Enum)]),
            },
        ],
        hydration_plan: vec!["set_status".to_string(), "set_id".to_string()],
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
    };

    let card_type = RecordType {
        key: "credit_card".to_string(),
        fields: vec![Field {
            name: "balance".to_string(),
            order_key: 1,
            value_type: ValueType::Decimal,
            enum_set: None,
        }],
        references: vec![Reference {
            name: "owner".to_string(),
            order_key: 1,
            record_type_key: "customer".to_string(),
        }],
    };

    let credit_card = RecordSequence {
        key: "credit_card".to_string(),
        kind: SequenceKind::Random,
        record_type: card_type,
        hydrators: vec![],
        hydration_plan: vec![],
        sequence_iterator: None,
        cardinality_estimator: None,
    };

    Specification {
        parameters: BTreeMap::from([
            ("customer.base-cardinality".to_string(), "1000".to_string()),
            ("scaling-factor".to_string(), "1.0".to_string()),
        ]),
        functions: vec![FunctionDef {
            name: "Pr[status]".to_string(),
            concrete_type: "CombinedPrFunction<I64u>".to_string(),
            constructor_args: vec!["Literal(name)".to_string(), "Literal(path)".to_string()],
            arguments: BTreeMap::from([
                literal("name", ValueType::String, "Pr[status]"),
                literal("path", ValueType::String, "status.distribution"),
            ]),
        }],
        enum_sets: vec![EnumSet {
            key: "customer_status".to_string(),
            constructor_args: vec!["Literal(path)".to_string()],
            arguments: BTreeMap::from([literal("path", ValueType::String, "status.set")]),
        }],
        record_sequences: vec![customer, credit_card],
    }
}

fn shop_config(output_root: &Path) -> GeneratorConfig {
    GeneratorConfig {
        output_root: output_root.to_path_buf(),
        generator_name: "shop".to_string(),
        namespace: "Shop".to_string(),
        word_size: WordSize::Bits64,
    }
}

fn seed_properties(output_root: &Path) {
    let config_dir = output_root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("shop-node.properties"),
        "# shop node\nlogging.level = info\ngenerator.scaling-factor = 0.5\n",
    )
    .unwrap();
}

#[test]
fn full_generation_produces_the_expected_tree() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = shop_config(dir.path());
    seed_properties(dir.path());

    compile_specification(&config, &shop_spec()).unwrap();

    for artifact in [
        "core/main.cpp",
        "generator/base/BaseGeneratorSubsystem.h",
        "generator/base/BaseGeneratorSubsystem.cpp",
        "generator/GeneratorSubsystem.h",
        "generator/GeneratorSubsystem.cpp",
        "config/base/BaseGeneratorConfig.h",
        "config/GeneratorConfig.h",
        "io/OutputCollector.cpp",
        "record/base/BaseCustomerMeta.h",
        "record/CustomerMeta.h",
        "record/base/BaseCustomer.h",
        "record/Customer.h",
        "record/base/BaseCustomerUtil.h",
        "record/CustomerUtil.h",
        "record/base/BaseCreditCard.h",
        "record/CreditCard.h",
        "generator/base/BaseCustomerGenerator.h",
        "generator/CustomerGenerator.h",
        "generator/base/BaseCreditCardGenerator.h",
        "generator/CreditCardGenerator.h",
    ] {
        assert!(dir.path().join(artifact).exists(), "missing {artifact}");
    }
}

#[test]
fn parameter_file_merge_keeps_foreign_lines_and_replaces_managed_ones() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = shop_config(dir.path());
    seed_properties(dir.path());

    compile_specification(&config, &shop_spec()).unwrap();

    let merged = fs::read_to_string(dir.path().join("config/shop-node.properties")).unwrap();
    assert_eq!(
        merged,
        "# shop node\nlogging.level = info\n\
         generator.customer.base-cardinality = 1000\ngenerator.scaling-factor = 1.0\n"
    );
}

#[test]
fn regeneration_overwrites_base_and_preserves_derived() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = shop_config(dir.path());
    seed_properties(dir.path());

    compile_specification(&config, &shop_spec()).unwrap();

    let base = dir.path().join("record/base/BaseCustomer.h");
    let derived = dir.path().join("record/Customer.h");
    fs::write(&base, "// stale\n").unwrap();
    fs::write(&derived, "// customized\n").unwrap();

    compile_specification(&config, &shop_spec()).unwrap();

    assert!(fs::read_to_string(&base).unwrap().contains("class BaseCustomer"));
    assert_eq!(fs::read_to_string(&derived).unwrap(), "// customized\n");
}

#[test]
fn customer_generator_wires_hydrators_and_invertible_dispatch() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = shop_config(dir.path());
    seed_properties(dir.path());

    compile_specification(&config, &shop_spec()).unwrap();

    let header =
        fs::read_to_string(dir.path().join("generator/base/BaseCustomerGenerator.h")).unwrap();

    // Constructor arguments flow through the argument compiler.
    assert!(header.contains(
        "_setId(&Customer::id, config.parameter<I64u>(\"customer.sequence.base\")),"
    ));
    assert!(header.contains("_setStatus(&Customer::status),"));

    // The plan reorders application relative to the order keys.
    let status_apply = header.find("apply(_setStatus, recordPtr);").unwrap();
    let id_apply = header.find("apply(_setId, recordPtr);").unwrap();
    assert!(status_apply < id_apply);

    // On a 64-bit target the Enum-setting hydrator shares the I64u group.
    assert_eq!(header.matches("invertableHydrator<I64u>(MethodTraits").count(), 1);
    assert!(header.contains(
        "if (setter == static_cast<MethodTraits<Customer, I64u>::Setter>(&Customer::status))"
    ));
}

#[test]
fn subsystem_registers_stages_in_sequence_order() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = shop_config(dir.path());
    seed_properties(dir.path());

    compile_specification(&config, &shop_spec()).unwrap();

    let source = fs::read_to_string(
        dir.path().join("generator/base/BaseGeneratorSubsystem.cpp"),
    )
    .unwrap();

    assert!(source.contains("I32u RecordGenerator::Stage::NEXT_STAGE_ID = 0;"));
    let customer = source.find("Stage(\"customer\")").unwrap();
    let card = source.find("Stage(\"credit_card\")").unwrap();
    assert!(customer < card);
    assert!(source.contains("registerGenerator<Shop::CreditCardGenerator>(\"credit_card\");"));
}
