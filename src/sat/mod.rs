//! SAT reduction and solving for the hazard puzzle

pub mod decoder;
pub mod dpll;
pub mod encoder;
pub mod enumerator;
pub mod formula;
pub mod oracle;
pub mod solver;
pub mod variables;

pub use decoder::decode_model;
pub use dpll::BacktrackingSolver;
pub use encoder::{CnfEncoder, Encoding};
pub use enumerator::ExhaustiveSolver;
pub use formula::{Clause, CnfFormula};
pub use oracle::OracleSolver;
pub use solver::{Model, SolveOutcome, UnifiedSolver};
pub use variables::{Position, VariableMap};
