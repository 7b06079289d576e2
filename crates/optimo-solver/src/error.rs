use thiserror::Error;

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Errors reported by the simplex and branch & bound drivers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Phase 1 left a residual artificial objective, or branch & bound
    /// exhausted its queue without an integer incumbent
    #[error("problem is infeasible")]
    Infeasible,

    /// The ratio test found no qualifying row in Phase 2
    #[error("problem is unbounded")]
    Unbounded,

    /// Safety cap on simplex pivots / branch & bound nodes
    #[error("iteration limit ({0}) reached, problem may be degenerate or cycling")]
    IterationLimit(usize),

    /// Shape violations on programmatic input, or a basic artificial
    /// surviving Phase 1
    #[error("malformed problem: {0}")]
    Malformed(String),
}
