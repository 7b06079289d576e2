use serde::Serialize;

use crate::steps::TableauSnapshot;

/// Outcome of a branch & bound solve.
///
/// `objective` is expressed in the user's convention (the value of the
/// original objective at `values`), whatever sign gymnastics the
/// minimization-form tableau went through internally.
#[derive(Debug, Clone, Serialize)]
pub struct IlpSolution {
    /// One value per original decision variable
    pub values: Vec<f64>,
    /// Original objective evaluated at `values`
    pub objective: f64,
    /// Subproblems dequeued before the queue drained
    pub nodes_explored: usize,
    /// Tableau trail, empty unless step recording was requested
    pub steps: Vec<TableauSnapshot>,
}
