use std::sync::Arc;

use optimo_types::{LinearProblem, Matrix, Relation};

use crate::error::{Result, SolverError};

/// Build the Phase-1 tableau for a raw problem.
///
/// Augmentation per constraint:
///
/// ```text
/// relation | added columns            | initial basis
/// ---------+--------------------------+--------------
///   <=     | slack (+1)               | slack
///   >=     | surplus (-1), artificial | artificial
///   =      | artificial (+1)          | artificial
/// ```
///
/// Columns land in three contiguous bands: the original variables,
/// then one slack/surplus column per `<=`/`>=` constraint in input
/// order, then the artificials in input order. Every relation becomes
/// `=` and the basis picks the identity structure shown above.
///
/// Rows with a negative rhs are multiplied by -1 (relation flipped)
/// before augmentation, so the initial tableau is always primal
/// feasible for Phase 1.
///
/// The Phase-1 objective row minimizes the sum of artificials: it
/// starts as +1 in each artificial column and the artificial-basic
/// rows are then subtracted out, leaving zeros in basic columns and
/// `rhs[m] = -sum(artificial rhs)`. Phase 1 therefore always runs
/// under the minimization column rule and pivots `rhs[m]` up toward 0.
pub fn build_phase1(problem: &LinearProblem) -> Result<LinearProblem> {
    let m = problem.num_rows();
    let original_cols = problem.original_cols;

    if problem.constraints.cols != original_cols
        || problem.objective.len() != original_cols
        || problem.relations.len() != m
        || problem.rhs.len() != m + 1
    {
        return Err(SolverError::Malformed(format!(
            "expected a raw problem with {} columns and {} rows",
            original_cols, m
        )));
    }

    // Normalize negative rhs rows so the artificial basis is feasible.
    let mut rows: Vec<Vec<f64>> = (0..m)
        .map(|i| problem.constraints.data[i * original_cols..(i + 1) * original_cols].to_vec())
        .collect();
    let mut relations = problem.relations.clone();
    let mut rhs: Vec<f64> = problem.rhs[..m].to_vec();
    for i in 0..m {
        if rhs[i] < 0.0 {
            for value in rows[i].iter_mut() {
                *value = -*value;
            }
            rhs[i] = -rhs[i];
            relations[i] = relations[i].flipped();
        }
    }

    let surplus_count = relations
        .iter()
        .filter(|r| matches!(r, Relation::Le | Relation::Ge))
        .count();
    let artificial_count = relations
        .iter()
        .filter(|r| matches!(r, Relation::Ge | Relation::Eq))
        .count();
    let n = original_cols + surplus_count + artificial_count;

    let mut constraints = Matrix::zeros(m, n);
    let mut basis = vec![0usize; m];
    let mut slack_col = original_cols;
    let mut artificial_col = original_cols + surplus_count;
    for i in 0..m {
        constraints.data[i * n..i * n + original_cols].copy_from_slice(&rows[i]);
        match relations[i] {
            Relation::Le => {
                constraints.data[i * n + slack_col] = 1.0;
                basis[i] = slack_col;
                slack_col += 1;
            }
            Relation::Ge => {
                constraints.data[i * n + slack_col] = -1.0;
                slack_col += 1;
                constraints.data[i * n + artificial_col] = 1.0;
                basis[i] = artificial_col;
                artificial_col += 1;
            }
            Relation::Eq => {
                constraints.data[i * n + artificial_col] = 1.0;
                basis[i] = artificial_col;
                artificial_col += 1;
            }
        }
    }

    // Phase-1 objective: artificial costs with the basic columns
    // eliminated, so the row is consistent with the starting basis.
    let mut objective = vec![0.0; n];
    for cell in objective[original_cols + surplus_count..].iter_mut() {
        *cell = 1.0;
    }
    let mut offset = 0.0;
    for i in 0..m {
        if basis[i] >= original_cols + surplus_count {
            for j in 0..n {
                objective[j] -= constraints.data[i * n + j];
            }
            offset -= rhs[i];
        }
    }
    rhs.push(offset);

    Ok(LinearProblem {
        objective,
        constraints,
        relations: vec![Relation::Eq; m],
        rhs,
        maximize: problem.maximize,
        original_cols,
        original_rows: m,
        surplus_count,
        artificial_count,
        basis,
        original_objective: Arc::clone(&problem.original_objective),
        optimal_values: Vec::new(),
        optimal_z: 0.0,
        has_solution: false,
    })
}
