use std::sync::Arc;

use optimo_types::{LinearProblem, Matrix};

use crate::error::{Result, SolverError};
use crate::linear::simplex::{self, PhaseOutcome};
use crate::linear::tableau;
use crate::steps::StepRecorder;
use crate::TOLERANCE;

/// Solve the linear relaxation of `problem` in place.
///
/// The problem is augmented into Phase-1 form, pivoted to feasibility,
/// stripped of its artificial band, re-costed with the original
/// objective and pivoted again. On success `optimal_values`,
/// `optimal_z` (in the user's convention) and `has_solution` are
/// populated; the tableau is left in its final pivoted state.
///
/// Sign discipline: the stored objective row keeps the minimization
/// form, so `rhs[m]` holds `-z` for a maximization and `+z` for a
/// minimization. Only the column selector and the readout below know
/// about it.
pub fn solve_lp(problem: &mut LinearProblem) -> Result<()> {
    let mut recorder = StepRecorder::disabled();
    solve_lp_recorded(problem, &mut recorder)
}

pub(crate) fn solve_lp_recorded(
    problem: &mut LinearProblem,
    recorder: &mut StepRecorder,
) -> Result<()> {
    recorder.record(0, 0, problem);
    *problem = tableau::build_phase1(problem)?;

    // Phase 1: drive the artificials out. The artificials are bounded
    // below by zero and above by the constraint rows, so an unbounded
    // report here means the subproblem has no feasible point.
    match simplex::run_phase(problem, false, 1, recorder)? {
        PhaseOutcome::Unbounded => return Err(SolverError::Infeasible),
        PhaseOutcome::Optimal => {}
    }
    let m = problem.num_rows();
    if problem.rhs[m].abs() > TOLERANCE {
        return Err(SolverError::Infeasible);
    }

    strip_artificials(problem)?;
    restart_objective(problem);

    // Phase 2: optimize the original objective from the feasible basis.
    let maximize = problem.maximize;
    match simplex::run_phase(problem, maximize, 2, recorder)? {
        PhaseOutcome::Unbounded => return Err(SolverError::Unbounded),
        PhaseOutcome::Optimal => {}
    }

    save_solution(problem);
    Ok(())
}

/// Drop the trailing artificial band from the tableau.
fn strip_artificials(problem: &mut LinearProblem) -> Result<()> {
    if problem.artificial_count == 0 {
        return Ok(());
    }

    let m = problem.num_rows();
    let old_n = problem.num_cols();
    let n = old_n - problem.artificial_count;

    // A zero-level artificial can survive Phase 1 in a degenerate
    // basis; pivoting it out is not supported here.
    if problem.basis.iter().any(|&b| b >= n) {
        return Err(SolverError::Malformed(
            "artificial variable remained basic after phase 1".to_string(),
        ));
    }

    let mut data = Vec::with_capacity(m * n);
    for i in 0..m {
        data.extend_from_slice(&problem.constraints.data[i * old_n..i * old_n + n]);
    }
    problem.constraints =
        Matrix::new(m, n, data).map_err(|e| SolverError::Malformed(e.to_string()))?;
    problem.objective.truncate(n);
    problem.artificial_count = 0;
    Ok(())
}

/// Rebuild the objective row from the original coefficients and the
/// current basis.
///
/// With `c` the original objective (zero past the original columns):
///
/// ```text
/// objective[j] = s * (-c[j] + sum_i constraints[i][j] * c[basis[i]])
/// rhs[m]       = s * (        sum_i rhs[i]            * c[basis[i]])
/// ```
///
/// where `s` is -1 for a maximization and +1 for a minimization. The
/// sum over basic rows zeroes out every basic column, and the stored
/// `rhs[m]` comes out as `-z` (max) or `+z` (min).
fn restart_objective(problem: &mut LinearProblem) {
    let m = problem.num_rows();
    let n = problem.num_cols();
    let sign = if problem.maximize { -1.0 } else { 1.0 };
    let original = Arc::clone(&problem.original_objective);
    let cost = |j: usize| -> f64 {
        if j < original.len() {
            original[j]
        } else {
            0.0
        }
    };

    let mut objective = vec![0.0; n];
    for (j, cell) in objective.iter_mut().enumerate() {
        let mut reduced = -cost(j);
        for i in 0..m {
            reduced += problem.constraints.data[i * n + j] * cost(problem.basis[i]);
        }
        *cell = sign * reduced;
    }

    let mut offset = 0.0;
    for i in 0..m {
        offset += problem.rhs[i] * cost(problem.basis[i]);
    }

    problem.objective = objective;
    problem.rhs[m] = sign * offset;
}

/// Read the primal solution out of the final tableau.
fn save_solution(problem: &mut LinearProblem) {
    let m = problem.num_rows();
    let mut values = vec![0.0; problem.original_cols];
    for (i, &basic) in problem.basis.iter().enumerate() {
        if basic < problem.original_cols {
            values[basic] = problem.rhs[i];
        }
    }
    problem.optimal_values = values;
    problem.optimal_z = if problem.maximize {
        -problem.rhs[m]
    } else {
        problem.rhs[m]
    };
    problem.has_solution = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optimo_types::Relation;

    fn raw(
        maximize: bool,
        objective: Vec<f64>,
        rows: Vec<f64>,
        relations: Vec<Relation>,
        rhs: Vec<f64>,
    ) -> LinearProblem {
        let m = relations.len();
        let n = objective.len();
        LinearProblem::new(
            maximize,
            objective,
            Matrix::new(m, n, rows).unwrap(),
            relations,
            rhs,
        )
        .unwrap()
    }

    #[test]
    fn test_le_maximization() {
        // maximize z = 3x1 + 5x2 -> x = (2, 6), z = 36
        let mut p = raw(
            true,
            vec![3.0, 5.0],
            vec![1.0, 0.0, 0.0, 2.0, 3.0, 2.0],
            vec![Relation::Le, Relation::Le, Relation::Le],
            vec![4.0, 12.0, 18.0],
        );
        solve_lp(&mut p).unwrap();

        assert!(p.has_solution);
        assert_relative_eq!(p.optimal_values[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(p.optimal_values[1], 6.0, epsilon = 1e-9);
        assert_relative_eq!(p.optimal_z, 36.0, epsilon = 1e-9);
        // internal convention: rhs[m] carries -z for a maximization
        let m = p.num_rows();
        assert_relative_eq!(p.rhs[m], -36.0, epsilon = 1e-9);
    }

    #[test]
    fn test_infeasible_system() {
        // x1 + x2 <= 1 and x1 + x2 >= 5 cannot both hold
        let mut p = raw(
            false,
            vec![1.0, 1.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![Relation::Le, Relation::Ge],
            vec![1.0, 5.0],
        );
        assert_eq!(solve_lp(&mut p), Err(SolverError::Infeasible));
    }

    #[test]
    fn test_equality_with_surplus() {
        // min z = x1 + 2x2, x1 + x2 = 3, x1 >= 1
        let mut p = raw(
            false,
            vec![1.0, 2.0],
            vec![1.0, 1.0, 1.0, 0.0],
            vec![Relation::Eq, Relation::Ge],
            vec![3.0, 1.0],
        );
        solve_lp(&mut p).unwrap();

        assert_relative_eq!(p.optimal_values[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.optimal_values[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(p.optimal_z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unbounded_direction() {
        // maximize x1 with no constraint touching x1
        let mut p = raw(
            true,
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![Relation::Le],
            vec![10.0],
        );
        assert_eq!(solve_lp(&mut p), Err(SolverError::Unbounded));
    }

    #[test]
    fn test_negative_rhs_feasible_region() {
        // -x1 - x2 <= -2 (i.e. x1 + x2 >= 2), x1 + x2 <= 5
        let mut p = raw(
            true,
            vec![1.0, 1.0],
            vec![-1.0, -1.0, 1.0, 1.0],
            vec![Relation::Le, Relation::Le],
            vec![-2.0, 5.0],
        );
        solve_lp(&mut p).unwrap();

        let sum: f64 = p.optimal_values.iter().sum();
        assert!(sum >= 2.0 - 1e-6, "x1 + x2 should be >= 2");
        assert!(sum <= 5.0 + 1e-6, "x1 + x2 should be <= 5");
        assert_relative_eq!(p.optimal_z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_final_basis_is_identity() {
        let mut p = raw(
            true,
            vec![3.0, 5.0],
            vec![1.0, 0.0, 0.0, 2.0, 3.0, 2.0],
            vec![Relation::Le, Relation::Le, Relation::Le],
            vec![4.0, 12.0, 18.0],
        );
        solve_lp(&mut p).unwrap();

        let n = p.num_cols();
        for (i, &basic) in p.basis.iter().enumerate() {
            for row in 0..p.num_rows() {
                let expected = if row == i { 1.0 } else { 0.0 };
                assert!(
                    (p.constraints.data[row * n + basic] - expected).abs() < 1e-6,
                    "basis column {} is not unit in row {}",
                    basic,
                    row
                );
            }
        }
        for i in 0..p.num_rows() {
            assert!(p.rhs[i] >= -1e-9, "rhs[{}] went negative", i);
        }
    }

    #[test]
    fn test_rhs_scaling_scales_solution() {
        let solve_scaled = |scale: f64| {
            let mut p = raw(
                true,
                vec![3.0, 5.0],
                vec![1.0, 0.0, 0.0, 2.0, 3.0, 2.0],
                vec![Relation::Le, Relation::Le, Relation::Le],
                vec![4.0 * scale, 12.0 * scale, 18.0 * scale],
            );
            solve_lp(&mut p).unwrap();
            p
        };

        let base = solve_scaled(1.0);
        let doubled = solve_scaled(2.0);
        for j in 0..2 {
            assert_relative_eq!(
                doubled.optimal_values[j],
                2.0 * base.optimal_values[j],
                epsilon = 1e-6
            );
        }
        assert_relative_eq!(doubled.optimal_z, 2.0 * base.optimal_z, epsilon = 1e-6);
    }
}
