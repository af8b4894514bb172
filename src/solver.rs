use std::fmt;

use crate::error::SimplexError;
use crate::model::{Model, OptDir};
use crate::simplex::Simplex;
use crate::tableau::Tableau;

pub trait SolveAlgorithm {
    fn solve(&self, mdl: &Model) -> Result<Solution, SimplexError>;
}

/// Optimal values of the structural variables and of the objective.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    obj_fn_val: f64,
    var_values: Vec<f64>,
    iterations: usize,
}

impl Solution {
    pub fn new(obj_fn_val: f64, var_values: Vec<f64>, iterations: usize) -> Self {
        Self {
            obj_fn_val,
            var_values,
            iterations,
        }
    }

    /// Reads the basic feasible solution off a tableau. Variable `k` lives in
    /// column `k + 1`; a variable without a unit column is non-basic and 0.
    pub fn from_tableau(tbl: &Tableau, n_structural: usize, tol: f64) -> Self {
        let mut var_values = vec![0.0_f64; n_structural];
        for (row, col) in tbl.basis(tol).into_iter().enumerate() {
            if let Some(col) = col.filter(|&c| c <= n_structural) {
                var_values[col - 1] = tbl.rhs(row + 1);
            }
        }
        Self::new(tbl.objective_value(), var_values, 0)
    }

    /// Reads a solved tableau back in terms of `mdl`: its structural
    /// variables and its own optimization direction.
    pub fn for_model(tbl: &Tableau, mdl: &Model, iterations: usize, tol: f64) -> Self {
        let mut solution = Self::from_tableau(tbl, mdl.n_vars(), tol);
        solution.iterations = iterations;
        if mdl.opt_dir() == OptDir::Max {
            solution.obj_fn_val *= -1.0_f64;
        }
        solution
    }

    pub fn obj_fn_val(&self) -> f64 {
        self.obj_fn_val
    }

    /// Value of structural variable `var` (0-based), `None` if out of range.
    pub fn var_value(&self, var: usize) -> Option<f64> {
        self.var_values.get(var).copied()
    }

    pub fn var_values(&self) -> &[f64] {
        &self.var_values
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Solution:")?;
        for (j, val) in self.var_values.iter().enumerate() {
            writeln!(f, "x{} = {}", j + 1, val)?;
        }
        write!(f, "Optimal Value (z) = {}", self.obj_fn_val)
    }
}

impl SolveAlgorithm for Simplex {
    fn solve(&self, mdl: &Model) -> Result<Solution, SimplexError> {
        let mut tableau = mdl.as_tableau()?;
        let report = Simplex::solve(self, &mut tableau)?;

        Ok(Solution::for_model(
            &tableau,
            mdl,
            report.iterations,
            self.config().basis_tolerance(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Comp, Constraint};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn reads_basic_variables_with_tolerance() {
        let tbl = Tableau::new(array![
            [1.0, 0.0, 1.0, 3.0, 0.0, 12.0],
            [0.0, 1.0 - 1.0e-13, 1.0, 1.0, 0.0, 4.0],
            [0.0, 1.0e-14, 2.0, -1.0, 1.0, 2.0],
        ]);
        let sol = Solution::from_tableau(&tbl, 2, 1.0e-9);
        assert_eq!(sol.var_values(), &[4.0, 0.0]);
        assert_eq!(sol.obj_fn_val(), -12.0);
    }

    #[test]
    fn duplicate_unit_column_does_not_reuse_a_row() {
        let tbl = Tableau::new(array![
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 1.0, 0.0, 3.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
        ]);
        let sol = Solution::from_tableau(&tbl, 2, 1.0e-9);
        assert_eq!(sol.var_values(), &[3.0, 0.0]);
    }

    #[test]
    fn solves_model_in_its_own_direction() {
        let mut mdl = Model::new(OptDir::Max, [3, 5]);
        mdl.add_constraint(Constraint::new([1, 0], Comp::Le, 4));
        mdl.add_constraint(Constraint::new([0, 2], Comp::Le, 12));
        mdl.add_constraint(Constraint::new([3, 2], Comp::Le, 18));

        let sol = SolveAlgorithm::solve(&Simplex::default(), &mdl).unwrap();
        assert_abs_diff_eq!(sol.obj_fn_val(), 36.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(sol.var_value(0).unwrap(), 2.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(sol.var_value(1).unwrap(), 6.0, epsilon = 1.0e-9);
        assert_eq!(sol.iterations(), 2);
    }

    #[test]
    fn min_model_reports_minimum() {
        // min x1 - x2; x2 <= 3
        let mut mdl = Model::new(OptDir::Min, [1, -1]);
        mdl.add_constraint(Constraint::new([0, 1], Comp::Le, 3));

        let sol = SolveAlgorithm::solve(&Simplex::default(), &mdl).unwrap();
        assert_abs_diff_eq!(sol.obj_fn_val(), -3.0, epsilon = 1.0e-9);
        assert_eq!(sol.var_values(), &[0.0, 3.0]);
        assert_eq!(sol.iterations(), 1);
        assert_eq!(sol.var_value(2), None);
    }

    #[test]
    fn for_model_keeps_iterations_and_flips_max() {
        let tbl = Tableau::new(array![
            [1.0, 0.0, 1.0, 3.0, 0.0, 12.0],
            [0.0, 1.0, 1.0, 1.0, 0.0, 4.0],
            [0.0, 0.0, 2.0, -1.0, 1.0, 2.0],
        ]);
        let max = Model::new(OptDir::Max, [3, 2]);
        let sol = Solution::for_model(&tbl, &max, 1, 1.0e-9);
        assert_eq!(sol.obj_fn_val(), 12.0);
        assert_eq!(sol.iterations(), 1);
        assert_eq!(sol.var_value(0), Some(4.0));
        assert_eq!(sol.var_value(5), None);

        let min = Model::new(OptDir::Min, [-3, -2]);
        let sol = Solution::for_model(&tbl, &min, 1, 1.0e-9);
        assert_eq!(sol.obj_fn_val(), -12.0);
        assert_eq!(sol.iterations(), 1);
    }

    #[test]
    fn unsupported_constraint_surfaces_as_malformed_input() {
        let mut mdl = Model::new(OptDir::Max, [1]);
        mdl.add_constraint(Constraint::new([1], Comp::Eq, 1));
        let err = SolveAlgorithm::solve(&Simplex::default(), &mdl).unwrap_err();
        assert!(matches!(err, SimplexError::MalformedInput(_)));
    }
}
