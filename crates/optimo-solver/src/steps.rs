use serde::Serialize;

use optimo_types::LinearProblem;

/// Read-only picture of the tableau at one point of the solve.
///
/// Phase 0 is the raw problem as enqueued, phases 1 and 2 are the
/// simplex phases; the iteration index counts pivots within a phase.
/// Each row carries its rhs entry as the last element, and the final
/// row is the objective row with `rhs[m]`.
#[derive(Debug, Clone, Serialize)]
pub struct TableauSnapshot {
    pub phase: u8,
    pub iteration: usize,
    pub basis: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Collects tableau snapshots during a solve.
///
/// A disabled recorder stores nothing, so the default solve paths pay
/// only the cost of a branch. Recording copies the numeric state and
/// never mutates it.
#[derive(Debug, Default)]
pub struct StepRecorder {
    active: bool,
    steps: Vec<TableauSnapshot>,
}

impl StepRecorder {
    pub fn enabled() -> Self {
        Self {
            active: true,
            steps: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: u8, iteration: usize, problem: &LinearProblem) {
        if !self.active {
            return;
        }

        let m = problem.num_rows();
        let n = problem.num_cols();

        let mut columns: Vec<String> = (0..n).map(|j| column_label(problem, j)).collect();
        columns.push("rhs".to_string());
        let basis = problem
            .basis
            .iter()
            .map(|&j| column_label(problem, j))
            .collect();

        let mut rows = Vec::with_capacity(m + 1);
        for i in 0..m {
            let mut row = problem.constraints.data[i * n..(i + 1) * n].to_vec();
            row.push(problem.rhs[i]);
            rows.push(row);
        }
        let mut objective_row = problem.objective.clone();
        objective_row.push(problem.rhs[m]);
        rows.push(objective_row);

        self.steps.push(TableauSnapshot {
            phase,
            iteration,
            basis,
            columns,
            rows,
        });
    }

    /// Drain the collected snapshots
    pub fn take_steps(&mut self) -> Vec<TableauSnapshot> {
        std::mem::take(&mut self.steps)
    }
}

/// Human label for a column: original variables, then slack/surplus,
/// then artificials, matching the augmented band layout.
fn column_label(problem: &LinearProblem, j: usize) -> String {
    let originals = problem.original_cols;
    let slack_end = originals + problem.surplus_count;
    if j < originals {
        format!("x{}", j + 1)
    } else if j < slack_end {
        format!("s{}", j - originals + 1)
    } else {
        format!("a{}", j - slack_end + 1)
    }
}
