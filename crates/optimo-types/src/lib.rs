pub mod matrix;
pub mod problem;

// Re-exports
pub use matrix::{Matrix, MatrixError};
pub use problem::{LinearProblem, ProblemError, Relation};
