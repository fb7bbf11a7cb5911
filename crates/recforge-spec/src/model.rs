//! Specification tree nodes.

use std::collections::{BTreeMap, BTreeSet};

use crate::{ArgumentNode, ArgumentSource, ValueType};

/// The root of a resolved generator specification.
#[derive(Debug, Clone, Default)]
pub struct Specification {
    /// Generator parameters, keyed without the persisted-file prefix.
    pub parameters: BTreeMap<String, String>,

    /// Declared prototype functions.
    pub functions: Vec<FunctionDef>,

    /// Declared enumerated sets.
    pub enum_sets: Vec<EnumSet>,

    /// Record sequences, in declaration order.
    pub record_sequences: Vec<RecordSequence>,
}

/// The generation strategy of a record sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceKind {
    /// Random-access sequence driven by a seeded pseudorandom stream.
    Random,

    /// A sequence kind without an emission rule yet. Carried through so
    /// the backend can name it when skipping.
    Other(String),
}

/// One generation pipeline producing instances of one record type.
#[derive(Debug, Clone)]
pub struct RecordSequence {
    /// Sequence key (snake_case), also the stage name.
    pub key: String,

    /// Generation strategy.
    pub kind: SequenceKind,

    /// The record type this sequence produces. Exactly one per sequence.
    pub record_type: RecordType,

    /// The full hydrator set.
    pub hydrators: Vec<Hydrator>,

    /// Hydrator keys in application order. A possibly reordered, possibly
    /// partial subset of the hydrator set; plan order governs runtime side
    /// effects.
    pub hydration_plan: Vec<String>,

    /// Optional per-stage sequence-iterator task.
    pub sequence_iterator: Option<SequenceIterator>,

    /// Optional cardinality estimator for partitioning.
    pub cardinality_estimator: Option<CardinalityEstimator>,
}

impl RecordSequence {
    /// Hydrators sorted by their stable order key.
    pub fn hydrators_ordered(&self) -> Vec<&Hydrator> {
        let mut out: Vec<&Hydrator> = self.hydrators.iter().collect();
        out.sort_by_key(|h| h.order_key);
        out
    }

    /// Look up a hydrator by key.
    pub fn hydrator(&self, key: &str) -> Option<&Hydrator> {
        self.hydrators.iter().find(|h| h.key == key)
    }

    /// The hydrators named by the hydration plan, in plan order.
    ///
    /// Plan entries not present in the hydrator set are ignored; the
    /// resolver guarantees the plan is a subset of the set.
    pub fn hydration_plan_hydrators(&self) -> Vec<&Hydrator> {
        self.hydration_plan
            .iter()
            .filter_map(|key| self.hydrator(key))
            .collect()
    }
}

/// A named record schema.
#[derive(Debug, Clone, Default)]
pub struct RecordType {
    /// Type key (snake_case).
    pub key: String,

    /// Owned fields.
    pub fields: Vec<Field>,

    /// Pointer-like associations to other record types.
    pub references: Vec<Reference>,
}

impl RecordType {
    /// Fields sorted by their stable order key.
    pub fn fields_ordered(&self) -> Vec<&Field> {
        let mut out: Vec<&Field> = self.fields.iter().collect();
        out.sort_by_key(|f| f.order_key);
        out
    }

    /// References sorted by their stable order key.
    pub fn references_ordered(&self) -> Vec<&Reference> {
        let mut out: Vec<&Reference> = self.references.iter().collect();
        out.sort_by_key(|r| r.order_key);
        out
    }

    /// Enum-kind fields, in declaration order.
    pub fn enum_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.is_enum()).collect()
    }

    /// Whether any field is Enum-kind.
    pub fn has_enum_fields(&self) -> bool {
        self.fields.iter().any(|f| f.is_enum())
    }

    /// The distinct record-type keys this type references, sorted.
    pub fn reference_type_keys(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .references
            .iter()
            .map(|r| r.record_type_key.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

/// A field owned by a record type.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name (snake_case).
    pub name: String,

    /// Stable ordinal assigned at resolution time; strictly increasing
    /// per record type.
    pub order_key: u32,

    /// Resolved value type.
    pub value_type: ValueType,

    /// The enum set this field draws its labels from; `Some` exactly for
    /// Enum-kind fields.
    pub enum_set: Option<String>,
}

impl Field {
    /// Whether this field is Enum-kind.
    pub const fn is_enum(&self) -> bool {
        matches!(self.value_type, ValueType::Enum)
    }
}

/// A pointer-like association to another record type.
#[derive(Debug, Clone)]
pub struct Reference {
    /// Reference name (snake_case).
    pub name: String,

    /// Stable ordinal assigned at resolution time.
    pub order_key: u32,

    /// The referenced record type's key (snake_case).
    pub record_type_key: String,
}

/// A named value-assignment unit in a hydration pipeline.
#[derive(Debug, Clone)]
pub struct Hydrator {
    /// Hydrator key (snake_case).
    pub key: String,

    /// Stable ordinal governing member declaration/construction order.
    pub order_key: u32,

    /// The runtime template the hydrator instantiates (include name).
    pub template_type: String,

    /// The fully parameterized runtime type.
    pub concrete_type: String,

    /// The typedef alias used for the member declaration.
    pub type_alias: String,

    /// Whether the hydrator supports reverse lookup by the setter it uses.
    pub invertible: bool,

    /// Constructor-argument descriptors, in constructor order.
    pub constructor_args: Vec<String>,

    /// Resolved argument nodes by key.
    pub arguments: BTreeMap<String, ArgumentNode>,
}

impl ArgumentSource for Hydrator {
    fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn argument(&self, key: &str) -> Option<&ArgumentNode> {
        self.arguments.get(key)
    }
}

/// A declared prototype function.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name, the key it registers under.
    pub name: String,

    /// The fully parameterized runtime type.
    pub concrete_type: String,

    /// Constructor-argument descriptors.
    pub constructor_args: Vec<String>,

    /// Resolved argument nodes by key.
    pub arguments: BTreeMap<String, ArgumentNode>,
}

impl ArgumentSource for FunctionDef {
    fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn argument(&self, key: &str) -> Option<&ArgumentNode> {
        self.arguments.get(key)
    }
}

/// A declared enumerated set, bound to a label file at configuration time.
#[derive(Debug, Clone)]
pub struct EnumSet {
    /// Set key.
    pub key: String,

    /// Constructor-argument descriptors.
    pub constructor_args: Vec<String>,

    /// Resolved argument nodes by key; carries the `path` literal.
    pub arguments: BTreeMap<String, ArgumentNode>,
}

impl ArgumentSource for EnumSet {
    fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn argument(&self, key: &str) -> Option<&ArgumentNode> {
        self.arguments.get(key)
    }
}

/// A per-stage iteration task registered by a generator.
#[derive(Debug, Clone)]
pub struct SequenceIterator {
    /// The fully parameterized runtime task type.
    pub concrete_type: String,

    /// Constructor-argument descriptors.
    pub constructor_args: Vec<String>,

    /// Resolved argument nodes by key.
    pub arguments: BTreeMap<String, ArgumentNode>,
}

impl ArgumentSource for SequenceIterator {
    fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn argument(&self, key: &str) -> Option<&ArgumentNode> {
        self.arguments.get(key)
    }
}

/// The cardinality estimation strategy of a record sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimatorKind {
    /// Base cardinality multiplied by the configured scaling factor.
    LinearScale,
}

/// A cardinality estimator attached to a record sequence.
#[derive(Debug, Clone)]
pub struct CardinalityEstimator {
    /// Estimation strategy.
    pub kind: EstimatorKind,

    /// Constructor-argument descriptors.
    pub constructor_args: Vec<String>,

    /// Resolved argument nodes by key; linear-scale estimators carry the
    /// `base_cardinality` literal.
    pub arguments: BTreeMap<String, ArgumentNode>,
}

impl ArgumentSource for CardinalityEstimator {
    fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    fn argument(&self, key: &str) -> Option<&ArgumentNode> {
        self.arguments.get(key)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn field(name: &str, order_key: u32, value_type: ValueType) -> Field {
        Field {
            name: name.to_string(),
            order_key,
            value_type,
            enum_set: None,
        }
    }

    #[test]
    fn fields_ordered___out_of_order_input___sorts_by_order_key() {
        let record_type = RecordType {
            key: "customer".to_string(),
            fields: vec![
                field("status", 3, ValueType::Enum),
                field("id", 1, ValueType::I64u),
                field("name", 2, ValueType::String),
            ],
            references: vec![],
        };

        let names: Vec<&str> = record_type
            .fields_ordered()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "name", "status"]);
    }

    #[test]
    fn reference_type_keys___duplicates___deduplicated_and_sorted() {
        let record_type = RecordType {
            key: "order".to_string(),
            fields: vec![],
            references: vec![
                Reference {
                    name: "buyer".to_string(),
                    order_key: 1,
                    record_type_key: "customer".to_string(),
                },
                Reference {
                    name: "seller".to_string(),
                    order_key: 2,
                    record_type_key: "customer".to_string(),
                },
                Reference {
                    name: "item".to_string(),
                    order_key: 3,
                    record_type_key: "article".to_string(),
                },
            ],
        };

        assert_eq!(record_type.reference_type_keys(), vec!["article", "customer"]);
    }

    #[test]
    fn hydration_plan_hydrators___partial_reordered_plan___follows_plan_order() {
        let hydrator = |key: &str, order_key: u32| Hydrator {
            key: key.to_string(),
            order_key,
            template_type: "ConstValueHydrator".to_string(),
            concrete_type: "ConstValueHydrator<Customer, I64u>".to_string(),
            type_alias: format!("{key}_type"),
            invertible: false,
            constructor_args: vec![],
            arguments: BTreeMap::new(),
        };

        let sequence = RecordSequence {
            key: "customer".to_string(),
            kind: SequenceKind::Random,
            record_type: RecordType::default(),
            hydrators: vec![hydrator("a", 1), hydrator("b", 2), hydrator("c", 3)],
            hydration_plan: vec!["c".to_string(), "a".to_string()],
            sequence_iterator: None,
            cardinality_estimator: None,
        };

        let keys: Vec<&str> = sequence
            .hydration_plan_hydrators()
            .iter()
            .map(|h| h.key.as_str())
            .collect();
        assert_eq!(keys, vec!["c", "a"]);
    }

    #[test]
    fn enum_fields___mixed_fields___selects_enum_kind_only() {
        let record_type = RecordType {
            key: "customer".to_string(),
            fields: vec![
                field("id", 1, ValueType::I64u),
                Field {
                    name: "status".to_string(),
                    order_key: 2,
                    value_type: ValueType::Enum,
                    enum_set: Some("customer_status".to_string()),
                },
            ],
            references: vec![],
        };

        assert!(record_type.has_enum_fields());
        assert_eq!(record_type.enum_fields().len(), 1);
        assert_eq!(record_type.enum_fields()[0].name, "status");
    }
}
