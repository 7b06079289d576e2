use thiserror::Error;

/// Errors produced while turning problem text into a `LinearProblem`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty problem text")]
    EmptyInput,

    /// Grammar-level failure: missing direction token, missing relation,
    /// stray tokens. Carries the rendered pest error.
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("invalid number '{token}' on line {line}")]
    InvalidNumber { token: String, line: usize },

    #[error("constraint on line {line} has {got} coefficients, expected {expected}")]
    CoefficientCount {
        line: usize,
        expected: usize,
        got: usize,
    },
}
