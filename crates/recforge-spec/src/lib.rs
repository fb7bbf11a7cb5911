//! Resolved specification tree for recforge data generators.
//!
//! This crate defines the model consumed by the code-generation backend.
//! It provides a simplified, already-resolved view of a generator
//! specification: record types, their fields and cross-references, the
//! hydration pipelines that assign field values, and the functions,
//! enumerated sets and cardinality estimators they draw on.
//!
//! # Purpose
//!
//! The model serves as the bridge between the front-end resolver and the
//! source compilers. The front end parses and semantically resolves a
//! textual specification once; everything in this crate is a read-only
//! snapshot for the duration of a generation run. The compilers create no
//! entities — they only read this tree and write files.
//!
//! # Structure
//!
//! - [`Specification`]: the root; owns parameters, functions, enum sets
//!   and record sequences
//! - [`RecordSequence`]: one generation pipeline for one record type
//! - [`RecordType`], [`Field`], [`Reference`]: a named record schema
//! - [`Hydrator`]: one value-assignment unit in a hydration pipeline
//! - [`ArgumentNode`]: the resolved constructor-argument variants
//! - [`ArgumentSource`]: the seam between argument-bearing nodes and the
//!   argument compiler
//!
//! # Determinism
//!
//! Fields, references and hydrators carry explicit `order_key` ordinals
//! assigned by the resolver. Emission order is always governed by these
//! ordinals (or by sorted name lists), never by container iteration order.

mod argument;
mod model;
mod value_type;

pub use argument::{ArgumentNode, ArgumentSource};
pub use model::{
    CardinalityEstimator, EnumSet, EstimatorKind, Field, FunctionDef, Hydrator, RecordSequence,
    RecordType, Reference, SequenceIterator, SequenceKind, Specification,
};
pub use value_type::ValueType;
