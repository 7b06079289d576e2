//! Branch & bound over the two-phase simplex relaxation
//!
//! Subproblems wait in a FIFO queue in their raw (un-augmented) form.
//! Each dequeued node is solved through a working copy, so the node
//! itself stays available for branching; children are the node plus one
//! bound constraint on the chosen fractional variable.

mod helpers;

use optimo_types::{LinearProblem, Relation};

use crate::error::{Result, SolverError};
use crate::linear::two_phase;
use crate::queue::Queue;
use crate::solution::IlpSolution;
use crate::steps::StepRecorder;

/// Safety cap on dequeued subproblems
const MAX_NODES: usize = 10_000;

/// Solve `problem` as an integer linear program.
pub fn solve_ilp(problem: &LinearProblem) -> Result<IlpSolution> {
    let mut recorder = StepRecorder::disabled();
    solve(problem, &mut recorder)
}

/// Same as [`solve_ilp`], but the returned solution carries the full
/// tableau trail of every relaxation in exploration order.
pub fn solve_ilp_with_steps(problem: &LinearProblem) -> Result<IlpSolution> {
    let mut recorder = StepRecorder::enabled();
    solve(problem, &mut recorder)
}

fn solve(problem: &LinearProblem, recorder: &mut StepRecorder) -> Result<IlpSolution> {
    let maximize = problem.maximize;
    let mut queue = Queue::new();
    queue.enqueue(problem.clone());

    let mut incumbent: Option<LinearProblem> = None;
    let mut best_value = if maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut nodes_explored = 0usize;

    while let Some(node) = queue.dequeue() {
        nodes_explored += 1;
        if nodes_explored > MAX_NODES {
            return Err(SolverError::IterationLimit(MAX_NODES));
        }
        let at_root = nodes_explored == 1;

        // Solve the relaxation on a working copy; `node` stays raw so
        // branching below can clone it cheaply.
        let mut relaxed = node.clone();
        match two_phase::solve_lp_recorded(&mut relaxed, recorder) {
            Ok(()) => {}
            // An infeasible or unbounded child just disappears; at the
            // root those conditions belong to the whole program.
            Err(SolverError::Infeasible) if !at_root => continue,
            Err(SolverError::Unbounded) if !at_root => continue,
            Err(e) => return Err(e),
        }

        let z = relaxed.optimal_z;
        if helpers::should_prune(z, best_value, maximize) {
            continue;
        }

        if helpers::is_integer_solution(&relaxed.optimal_values) {
            best_value = z;
            incumbent = Some(relaxed);
            continue;
        }

        if let Some(k) = helpers::branch_variable(&relaxed.optimal_values) {
            let floor = relaxed.optimal_values[k].floor();
            queue.enqueue(node.branch_child(k, Relation::Le, floor));
            queue.enqueue(node.branch_child(k, Relation::Ge, floor + 1.0));
        }
    }

    match incumbent {
        Some(best) => Ok(IlpSolution {
            values: best.optimal_values,
            objective: best_value,
            nodes_explored,
            steps: recorder.take_steps(),
        }),
        None => Err(SolverError::Infeasible),
    }
}
