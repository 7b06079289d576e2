use std::fmt;
use std::sync::Arc;

use crate::matrix::Matrix;

/// Constraint relation as it appears in the problem text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

impl Relation {
    /// Relation after multiplying a constraint row by -1
    pub fn flipped(self) -> Self {
        match self {
            Relation::Le => Relation::Ge,
            Relation::Ge => Relation::Le,
            Relation::Eq => Relation::Eq,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
            Relation::Eq => write!(f, "="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    DimensionMismatch { what: &'static str, expected: usize, got: usize },
    EmptyObjective,
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::DimensionMismatch { what, expected, got } => {
                write!(f, "{} has {} entries, expected {}", what, got, expected)
            }
            ProblemError::EmptyObjective => write!(f, "Objective has no coefficients"),
        }
    }
}

impl std::error::Error for ProblemError {}

/// A linear program, either as parsed or in augmented tableau form.
///
/// The same value travels through the whole solve: the parser produces it
/// raw (no slack/surplus/artificial columns, empty basis), the tableau
/// builder augments it, and the simplex mutates it in place. After
/// augmentation the columns sit in three contiguous bands:
///
/// ```text
/// [ original variables | slack/surplus | artificials ]
///   0 .. original_cols   .. + surplus_count   .. cols
/// ```
///
/// `rhs` has one entry per constraint plus a final slot holding the
/// current objective-row offset, so `rhs[m]` moves together with the
/// objective row during pivoting.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProblem {
    /// Current objective row (reduced costs once augmented)
    pub objective: Vec<f64>,
    /// Constraint coefficient matrix, one row per constraint
    pub constraints: Matrix,
    /// Relation of each constraint; all `Eq` once augmented
    pub relations: Vec<Relation>,
    /// Constraint right-hand sides, then the objective-row offset
    pub rhs: Vec<f64>,
    /// True if the problem text started with `max`
    pub maximize: bool,
    /// Decision variables in the user input
    pub original_cols: usize,
    /// Constraint rows (grows by one per branching bound)
    pub original_rows: usize,
    /// Slack and surplus columns added by augmentation
    pub surplus_count: usize,
    /// Artificial columns added by augmentation
    pub artificial_count: usize,
    /// basis[i] is the column currently basic in row i
    pub basis: Vec<usize>,
    /// Un-augmented objective coefficients, shared across subproblems.
    /// Never mutated after construction, so branching clones are cheap.
    pub original_objective: Arc<Vec<f64>>,
    /// Values of the original variables once solved
    pub optimal_values: Vec<f64>,
    /// Objective value at `optimal_values`, in the user's convention
    pub optimal_z: f64,
    pub has_solution: bool,
}

impl LinearProblem {
    /// Build a raw problem from its parts, validating shapes.
    ///
    /// `rhs` carries one entry per constraint; the objective-row slot is
    /// appended here.
    pub fn new(
        maximize: bool,
        objective: Vec<f64>,
        constraints: Matrix,
        relations: Vec<Relation>,
        rhs: Vec<f64>,
    ) -> Result<Self, ProblemError> {
        if objective.is_empty() {
            return Err(ProblemError::EmptyObjective);
        }
        let m = constraints.rows;
        let n = objective.len();
        if constraints.cols != n {
            return Err(ProblemError::DimensionMismatch {
                what: "constraint row",
                expected: n,
                got: constraints.cols,
            });
        }
        if relations.len() != m {
            return Err(ProblemError::DimensionMismatch {
                what: "relations",
                expected: m,
                got: relations.len(),
            });
        }
        if rhs.len() != m {
            return Err(ProblemError::DimensionMismatch {
                what: "rhs",
                expected: m,
                got: rhs.len(),
            });
        }

        let mut rhs = rhs;
        rhs.push(0.0);

        Ok(Self {
            original_objective: Arc::new(objective.clone()),
            objective,
            constraints,
            relations,
            rhs,
            maximize,
            original_cols: n,
            original_rows: m,
            surplus_count: 0,
            artificial_count: 0,
            basis: Vec::new(),
            optimal_values: Vec::new(),
            optimal_z: 0.0,
            has_solution: false,
        })
    }

    /// Number of constraint rows
    pub fn num_rows(&self) -> usize {
        self.constraints.rows
    }

    /// Number of columns in the current form
    pub fn num_cols(&self) -> usize {
        self.constraints.cols
    }

    /// Clone this (raw) problem and append one branching bound
    /// `x_var <relation> bound` as a fresh constraint row.
    ///
    /// The new rhs entry slots in just before the objective-row offset,
    /// keeping `rhs` one longer than the constraint count.
    pub fn branch_child(&self, var: usize, relation: Relation, bound: f64) -> Self {
        let mut child = self.clone();
        let mut row = vec![0.0; child.constraints.cols];
        row[var] = 1.0;
        child
            .constraints
            .push_row(row)
            .expect("bound row width matches the constraint matrix");
        child.relations.push(relation);
        let z_slot = child.rhs.len() - 1;
        child.rhs.insert(z_slot, bound);
        child.original_rows += 1;
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinearProblem {
        // maximize z = 3x1 + 5x2
        // subject to:
        //   x1 <= 4
        //   2x2 <= 12
        LinearProblem::new(
            true,
            vec![3.0, 5.0],
            Matrix::new(2, 2, vec![1.0, 0.0, 0.0, 2.0]).unwrap(),
            vec![Relation::Le, Relation::Le],
            vec![4.0, 12.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_appends_objective_slot() {
        let p = sample();
        assert_eq!(p.rhs, vec![4.0, 12.0, 0.0]);
        assert_eq!(p.original_cols, 2);
        assert_eq!(p.original_rows, 2);
        assert!(p.basis.is_empty());
        assert_eq!(*p.original_objective, vec![3.0, 5.0]);
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        let err = LinearProblem::new(
            false,
            vec![1.0, 1.0],
            Matrix::new(1, 3, vec![1.0, 1.0, 1.0]).unwrap(),
            vec![Relation::Le],
            vec![1.0],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_branch_child_appends_bound() {
        let p = sample();
        let child = p.branch_child(1, Relation::Ge, 3.0);

        assert_eq!(child.original_rows, 3);
        assert_eq!(child.original_cols, 2);
        assert_eq!(child.constraints.row(2).unwrap(), &[0.0, 1.0]);
        assert_eq!(child.relations[2], Relation::Ge);
        // bound lands before the objective-row slot
        assert_eq!(child.rhs, vec![4.0, 12.0, 3.0, 0.0]);
    }

    #[test]
    fn test_branch_child_is_isolated() {
        let p = sample();
        let mut child = p.branch_child(0, Relation::Le, 2.0);
        child.constraints.set(0, 0, 99.0).unwrap();
        child.rhs[0] = -1.0;

        assert_eq!(p.constraints.get(0, 0).unwrap(), 1.0);
        assert_eq!(p.rhs[0], 4.0);
        assert_eq!(p.original_rows, 2);
    }

    #[test]
    fn test_relation_flipped() {
        assert_eq!(Relation::Le.flipped(), Relation::Ge);
        assert_eq!(Relation::Ge.flipped(), Relation::Le);
        assert_eq!(Relation::Eq.flipped(), Relation::Eq);
        assert_eq!(Relation::Ge.to_string(), ">=");
    }
}
