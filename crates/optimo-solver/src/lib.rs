//! Two-phase simplex and branch & bound for integer linear programs
//!
//! The solver works on the [`optimo_types::LinearProblem`] value as it
//! comes out of the parser: the tableau builder augments it with slack,
//! surplus and artificial columns, the simplex core pivots it in place,
//! and the branch & bound loop drives the whole thing over a FIFO queue
//! of subproblems.
//!
//! # Example
//!
//! ```
//! use optimo_types::{LinearProblem, Matrix, Relation};
//! use optimo_solver::solve_ilp;
//!
//! // maximize z = 3x1 + 5x2
//! // subject to:
//! //   x1 <= 4
//! //   2x2 <= 12
//! //   3x1 + 2x2 <= 18
//! //   x1, x2 >= 0 and integer
//! let problem = LinearProblem::new(
//!     true,
//!     vec![3.0, 5.0],
//!     Matrix::new(3, 2, vec![1.0, 0.0, 0.0, 2.0, 3.0, 2.0]).unwrap(),
//!     vec![Relation::Le, Relation::Le, Relation::Le],
//!     vec![4.0, 12.0, 18.0],
//! ).unwrap();
//!
//! let solution = solve_ilp(&problem).unwrap();
//! assert_eq!(solution.objective, 36.0);
//! ```

pub mod error;
pub mod integer;
pub mod linear;
pub mod queue;
pub mod solution;
pub mod steps;

// Re-exports
pub use error::{Result, SolverError};
pub use integer::branch_bound::{solve_ilp, solve_ilp_with_steps};
pub use linear::two_phase::solve_lp;
pub use queue::Queue;
pub use solution::IlpSolution;
pub use steps::TableauSnapshot;

/// Tolerance shared by the Phase-1 feasibility test and the
/// integrality check.
pub const TOLERANCE: f64 = 1e-8;
