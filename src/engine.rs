//! Rule evaluation and batch validation

pub mod batch;
pub mod evaluator;

pub use batch::{BatchResult, BatchValidator, FieldRecord, RecordOutcome};
pub use evaluator::{ValidationResult, evaluate, evaluate_category};
