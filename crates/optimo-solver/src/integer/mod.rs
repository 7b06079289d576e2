pub mod branch_bound;

// Re-exports
pub use branch_bound::{solve_ilp, solve_ilp_with_steps};
