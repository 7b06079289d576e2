use optimo_types::LinearProblem;

use crate::error::{Result, SolverError};
use crate::steps::StepRecorder;

/// Entries this close to zero never enter the basis or the ratio test
const PIVOT_EPS: f64 = 1e-10;

/// Safety cap per phase
const MAX_ITERATIONS: usize = 10_000;

/// Terminal state of one simplex phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    Optimal,
    Unbounded,
}

/// Pick the entering column, or `None` when the phase is optimal.
///
/// The tableau is kept in minimization form; the direction of the
/// current phase is encoded entirely here. A maximizing row enters on
/// the largest strictly positive reduced cost, a minimizing row on the
/// smallest strictly negative one. Ties go to the first column.
pub fn entering_column(problem: &LinearProblem, maximize_row: bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (j, &cost) in problem.objective.iter().enumerate() {
        let candidate = if maximize_row {
            cost > PIVOT_EPS && best.map_or(true, |(_, b)| cost > b)
        } else {
            cost < -PIVOT_EPS && best.map_or(true, |(_, b)| cost < b)
        };
        if candidate {
            best = Some((j, cost));
        }
    }
    best.map(|(j, _)| j)
}

/// Min-ratio test over rows with a strictly positive entry in `col`.
///
/// The first row attaining the minimum wins. `None` means no row
/// qualifies and the problem is unbounded in this direction.
pub fn pivot_row(problem: &LinearProblem, col: usize) -> Option<usize> {
    let n = problem.num_cols();
    let mut best: Option<(usize, f64)> = None;
    for i in 0..problem.num_rows() {
        let coeff = problem.constraints.data[i * n + col];
        if coeff > PIVOT_EPS {
            let ratio = problem.rhs[i] / coeff;
            if best.map_or(true, |(_, r)| ratio < r) {
                best = Some((i, ratio));
            }
        }
    }
    best.map(|(i, _)| i)
}

/// Gauss-Jordan pivot on (`row`, `col`).
///
/// Normalizes the pivot row (including its rhs), eliminates the pivot
/// column from every other constraint row and from the objective row
/// together with `rhs[m]`, then records the basis exchange.
pub fn pivot(problem: &mut LinearProblem, row: usize, col: usize) {
    let n = problem.num_cols();
    let m = problem.num_rows();

    let pivot_element = problem.constraints.data[row * n + col];
    for j in 0..n {
        problem.constraints.data[row * n + j] /= pivot_element;
    }
    problem.rhs[row] /= pivot_element;

    let pivot_coeffs: Vec<f64> = problem.constraints.data[row * n..(row + 1) * n].to_vec();
    let pivot_rhs = problem.rhs[row];

    for i in 0..m {
        if i == row {
            continue;
        }
        let factor = problem.constraints.data[i * n + col];
        if factor == 0.0 {
            continue;
        }
        for j in 0..n {
            problem.constraints.data[i * n + j] -= factor * pivot_coeffs[j];
        }
        problem.rhs[i] -= factor * pivot_rhs;
    }

    let factor = problem.objective[col];
    if factor != 0.0 {
        for j in 0..n {
            problem.objective[j] -= factor * pivot_coeffs[j];
        }
        problem.rhs[m] -= factor * pivot_rhs;
    }

    problem.basis[row] = col;
}

/// Pivot until the phase is optimal or unbounded.
///
/// A snapshot is recorded at the top of every iteration, so the trail
/// contains the starting tableau and the state after each pivot.
pub fn run_phase(
    problem: &mut LinearProblem,
    maximize_row: bool,
    phase: u8,
    recorder: &mut StepRecorder,
) -> Result<PhaseOutcome> {
    for iteration in 0..MAX_ITERATIONS {
        recorder.record(phase, iteration, problem);

        let col = match entering_column(problem, maximize_row) {
            Some(col) => col,
            None => return Ok(PhaseOutcome::Optimal),
        };
        let row = match pivot_row(problem, col) {
            Some(row) => row,
            None => return Ok(PhaseOutcome::Unbounded),
        };
        pivot(problem, row, col);
    }
    Err(SolverError::IterationLimit(MAX_ITERATIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::tableau::build_phase1;
    use optimo_types::{Matrix, Relation};

    fn le_tableau() -> LinearProblem {
        // maximize z = 3x1 + 5x2
        //   x1 <= 4, 2x2 <= 12, 3x1 + 2x2 <= 18
        let p = LinearProblem::new(
            true,
            vec![3.0, 5.0],
            Matrix::new(3, 2, vec![1.0, 0.0, 0.0, 2.0, 3.0, 2.0]).unwrap(),
            vec![Relation::Le, Relation::Le, Relation::Le],
            vec![4.0, 12.0, 18.0],
        )
        .unwrap();
        let mut t = build_phase1(&p).unwrap();
        // Phase-2 row for a maximization: +c in the original columns
        t.objective = vec![3.0, 5.0, 0.0, 0.0, 0.0];
        t
    }

    #[test]
    fn test_entering_column_selectors() {
        let mut t = le_tableau();
        // maximizing row: largest positive coefficient
        assert_eq!(entering_column(&t, true), Some(1));
        // minimizing row: nothing negative, already optimal
        assert_eq!(entering_column(&t, false), None);

        t.objective = vec![-3.0, -5.0, 0.0, 0.0, 0.0];
        assert_eq!(entering_column(&t, true), None);
        assert_eq!(entering_column(&t, false), Some(1));
    }

    #[test]
    fn test_ratio_test_skips_nonpositive_rows() {
        let t = le_tableau();
        // column 1: rows have coefficients 0, 2, 2 -> ratios -, 6, 9
        assert_eq!(pivot_row(&t, 1), Some(1));
        // column 0: coefficients 1, 0, 3 -> ratios 4, -, 6
        assert_eq!(pivot_row(&t, 0), Some(0));
    }

    #[test]
    fn test_ratio_test_reports_unbounded() {
        // maximize x1 with only x2 bounded
        let p = LinearProblem::new(
            true,
            vec![1.0, 0.0],
            Matrix::new(1, 2, vec![0.0, 1.0]).unwrap(),
            vec![Relation::Le],
            vec![10.0],
        )
        .unwrap();
        let mut t = build_phase1(&p).unwrap();
        t.objective = vec![1.0, 0.0, 0.0];
        assert_eq!(pivot_row(&t, 0), None);
    }

    #[test]
    fn test_pivot_restores_unit_column() {
        let mut t = le_tableau();
        pivot(&mut t, 1, 1);

        let n = t.num_cols();
        assert!((t.constraints.data[n + 1] - 1.0).abs() < 1e-12);
        assert!(t.constraints.data[1].abs() < 1e-12);
        assert!(t.constraints.data[2 * n + 1].abs() < 1e-12);
        assert!(t.objective[1].abs() < 1e-12);
        assert_eq!(t.basis[1], 1);
        // objective offset moved by -5 * 6
        assert_eq!(t.rhs[3], -30.0);
    }

    #[test]
    fn test_run_phase_reaches_optimum() {
        let mut t = le_tableau();
        let mut recorder = StepRecorder::disabled();
        let outcome = run_phase(&mut t, true, 2, &mut recorder).unwrap();

        assert_eq!(outcome, PhaseOutcome::Optimal);
        // optimum at x1 = 2, x2 = 6 with z = 36 stored negated
        assert!((t.rhs[3] + 36.0).abs() < 1e-9);
        assert!(t.basis.contains(&0));
        assert!(t.basis.contains(&1));
    }
}
