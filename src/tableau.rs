use ndarray::{s, Array2, ArrayView1};

use std::cmp::Ordering;
use std::fmt;

use tabular::{Row, Table};

use crate::error::MalformedInput;

/// Index of a single tableau cell, `i` the row and `j` the column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableauIx {
    i: usize,
    j: usize,
}

impl TableauIx {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }
}

impl fmt::Display for TableauIx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.i, self.j)
    }
}

/// Dense simplex tableau.
///
/// Row 0 is the objective row, rows `1..` are constraint rows. Column 0 is the
/// objective (`z`) column and is never pivoted on, columns `1..=width-2` hold
/// the variable coefficients and the last column is the right-hand side. The
/// rhs cell of row 0 holds the negated objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    pub(crate) tbl: Array2<f64>,
}

impl Tableau {
    pub fn new(tbl: Array2<f64>) -> Self {
        Self { tbl }
    }

    /// Builds a tableau from row vectors, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MalformedInput> {
        let width = rows.first().ok_or(MalformedInput::Empty)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(MalformedInput::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let height = rows.len();
        let data = rows.into_iter().flatten().collect::<Vec<f64>>();
        let tbl = Array2::from_shape_vec((height, width), data)
            .map_err(|_| MalformedInput::Empty)?;
        Ok(Self { tbl })
    }

    pub fn tbl(&self) -> &Array2<f64> {
        &self.tbl
    }

    pub fn n_rows(&self) -> usize {
        self.tbl.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.tbl.ncols()
    }

    pub fn rhs_col(&self) -> usize {
        self.n_cols() - 1
    }

    /// Current value of the right-hand side of `row`.
    pub fn rhs(&self, row: usize) -> f64 {
        self.tbl[[row, self.rhs_col()]]
    }

    /// Reduced costs of the variable columns, in column order starting at 1.
    pub fn reduced_costs(&self) -> ArrayView1<f64> {
        self.tbl.slice(s![0, 1..-1])
    }

    /// Objective value of the minimization the tableau encodes.
    pub fn objective_value(&self) -> f64 {
        -self.rhs(0)
    }

    /// Checks the shape and the starting basis before any pivot is made.
    pub fn validate(&self, tol: f64) -> Result<(), MalformedInput> {
        if self.n_rows() == 0 {
            return Err(MalformedInput::Empty);
        }
        if self.n_cols() < 3 {
            return Err(MalformedInput::TooFewColumns);
        }
        if let Some(((row, column), _)) = self.tbl.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(MalformedInput::NonFinite { row, column });
        }
        if let Some(row) = (1..self.n_rows()).find(|&i| self.rhs(i) < 0.0_f64) {
            return Err(MalformedInput::NegativeRhs { row });
        }
        let basis = self.basis(tol);
        if let Some(row) = basis.iter().position(Option::is_none) {
            return Err(MalformedInput::NoBasicVariable { row: row + 1 });
        }
        Ok(())
    }

    /// True iff no reduced cost is negative.
    pub fn is_optimal(&self) -> bool {
        self.reduced_costs().iter().all(|&v| v >= 0.0_f64)
    }

    /// Entering column by the most negative reduced cost, first one on ties.
    /// Falls back to column 1 when nothing is negative.
    pub fn pivot_col(&self) -> usize {
        self.reduced_costs()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < 0.0_f64)
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(j, _)| j + 1)
            .unwrap_or(1)
    }

    /// Leaving row by the minimum ratio test over rows with a strictly
    /// positive entry in `col`. `None` means the column is unbounded.
    pub fn pivot_row(&self, col: usize) -> Option<usize> {
        let rhs = self.rhs_col();
        self.tbl
            .slice(s![1.., col])
            .iter()
            .zip(self.tbl.slice(s![1.., rhs]))
            .enumerate()
            .filter(|(_, (a, _))| **a > 0.0_f64)
            .map(|(i, (a, b))| (i + 1, *b / *a))
            .min_by(|(_, r1), (_, r2)| r1.partial_cmp(r2).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i)
    }

    /// Gauss-Jordan elimination on `pivot_ind`. Entries whose magnitude ends
    /// below `zero_tol` are set to exactly zero.
    #[inline(always)]
    pub fn pivot(&mut self, pivot_ind: &TableauIx, zero_tol: f64) {
        assert!(pivot_ind.i() < self.n_rows());
        assert!(pivot_ind.j() < self.n_cols());

        //normalize pivot row
        let div = self.tbl[[pivot_ind.i(), pivot_ind.j()]];
        for j in 0..self.n_cols() {
            self.tbl[[pivot_ind.i(), j]] /= div;
        }

        //eliminate pivot column from every other row
        for i in 0..self.n_rows() {
            if i == pivot_ind.i() {
                continue;
            }
            let ratio = self.tbl[[i, pivot_ind.j()]];
            if ratio == 0.0_f64 {
                continue;
            }
            for j in 0..self.n_cols() {
                self.tbl[[i, j]] -= self.tbl[[pivot_ind.i(), j]] * ratio;
                if self.tbl[[i, j]].abs() < zero_tol {
                    self.tbl[[i, j]] = 0.0_f64;
                }
            }
        }
    }

    /// Row holding the single 1 of a unit column, if `col` is one.
    pub fn basic_row(&self, col: usize, tol: f64) -> Option<usize> {
        let mut found = None;
        for (i, &val) in self.tbl.column(col).iter().enumerate() {
            if (val - 1.0_f64).abs() < tol && i > 0 {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            } else if val.abs() >= tol {
                return None;
            }
        }
        found
    }

    /// Basic column of every constraint row (entry `k` is row `k + 1`).
    /// A row claimed by an earlier unit column is not given to a later one.
    pub fn basis(&self, tol: f64) -> Vec<Option<usize>> {
        let mut basis = vec![None; self.n_rows().saturating_sub(1)];
        for col in 1..self.rhs_col() {
            if let Some(row) = self.basic_row(col, tol) {
                if basis[row - 1].is_none() {
                    basis[row - 1] = Some(col);
                }
            }
        }
        basis
    }

    pub(crate) fn to_table(&self, precision: usize, highlight: Option<&TableauIx>) -> Table {
        let mut table = Table::new(&"{:>}  ".repeat(self.n_cols()));
        for (i, row) in self.tbl.rows().into_iter().enumerate() {
            let cells = row.iter().enumerate().map(|(j, v)| {
                let cell = format!("{:.*}", precision, v + 0.0_f64);
                match highlight {
                    Some(ix) if ix.i() == i && ix.j() == j => format!("[{}]", cell),
                    _ => cell,
                }
            });
            table.add_row(Row::from_cells(cells));
        }
        table
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_table(2, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn small() -> Tableau {
        Tableau::new(array![
            [-1.0, -3.0, -2.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 1.0, 0.0, 4.0],
            [1.0, 1.0, 3.0, 0.0, 1.0, 6.0],
        ])
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Tableau::from_rows(vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0]]).unwrap_err();
        assert_eq!(
            err,
            MalformedInput::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(Tableau::from_rows(vec![]).unwrap_err(), MalformedInput::Empty);
    }

    #[test]
    fn optimality_ignores_objective_and_rhs_columns() {
        let tbl = Tableau::new(array![[-5.0, 0.0, 1.0, -7.0], [0.0, 1.0, 0.0, 2.0]]);
        assert!(tbl.is_optimal());
        assert!(!small().is_optimal());
    }

    #[test]
    fn pivot_col_prefers_first_of_equal_minimums() {
        let tbl = Tableau::new(array![
            [0.0, -1.0, -4.0, -4.0, 0.0],
            [0.0, 1.0, 1.0, 1.0, 1.0]
        ]);
        assert_eq!(tbl.pivot_col(), 2);
    }

    #[test]
    fn pivot_col_defaults_to_first_variable() {
        let tbl = Tableau::new(array![[0.0, 2.0, 3.0, 0.0], [0.0, 1.0, 1.0, 1.0]]);
        assert_eq!(tbl.pivot_col(), 1);
    }

    #[test]
    fn pivot_row_uses_min_ratio_over_positive_entries() {
        let tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, -2.0, 1.0, 0.0, 0.0, 1.0],
            [0.0, 4.0, 0.0, 1.0, 0.0, 8.0],
            [0.0, 1.0, 0.0, 0.0, 1.0, 3.0],
        ]);
        assert_eq!(tbl.pivot_row(1), Some(2));
    }

    #[test]
    fn pivot_row_ties_go_to_the_top_row() {
        let tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 1.0, 0.0, 4.0],
            [0.0, 1.0, 0.0, 1.0, 2.0],
        ]);
        assert_eq!(tbl.pivot_row(1), Some(1));
    }

    #[test]
    fn pivot_row_reports_unbounded_column() {
        let tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0],
            [0.0, -1.0, 1.0, 1.0],
        ]);
        assert_eq!(tbl.pivot_row(1), None);
    }

    #[test]
    fn pivot_makes_a_unit_column() {
        let mut tbl = small();
        let ix = TableauIx::new(2, 2);
        tbl.pivot(&ix, 1.0e-12);
        for i in 0..tbl.n_rows() {
            let expected = if i == 2 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(tbl.tbl()[[i, 2]], expected, epsilon = 1.0e-9);
        }
        assert_eq!(tbl.basic_row(2, 1.0e-9), Some(2));
    }

    #[test]
    fn pivot_clamps_rounding_noise() {
        let mut tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0],
            [0.0, 1.0, 1.0e-4, 2.0],
        ]);
        tbl.pivot(&TableauIx::new(1, 1), 1.0e-3);
        assert_eq!(tbl.tbl()[[0, 1]], 0.0);
        assert_eq!(tbl.tbl()[[0, 2]], 0.0);
        assert_abs_diff_eq!(tbl.rhs(0), 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn basis_finds_slack_identity() {
        let tbl = small();
        assert_eq!(tbl.basis(1.0e-9), vec![Some(3), Some(4)]);
        assert_eq!(tbl.basic_row(1, 1.0e-9), None);
        assert!(tbl.validate(1.0e-9).is_ok());
    }

    #[test]
    fn validate_rejects_missing_basis_and_negative_rhs() {
        let tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0],
            [0.0, 1.0, 2.0, 3.0],
        ]);
        assert_eq!(
            tbl.validate(1.0e-9).unwrap_err(),
            MalformedInput::NoBasicVariable { row: 1 }
        );

        let tbl = Tableau::new(array![
            [1.0, -1.0, 0.0, 0.0],
            [0.0, 1.0, 1.0, -3.0],
        ]);
        assert_eq!(
            tbl.validate(1.0e-9).unwrap_err(),
            MalformedInput::NegativeRhs { row: 1 }
        );

        let tbl = Tableau::new(array![[1.0, f64::NAN, 0.0], [0.0, 1.0, 1.0]]);
        assert_eq!(
            tbl.validate(1.0e-9).unwrap_err(),
            MalformedInput::NonFinite { row: 0, column: 1 }
        );
    }

    #[test]
    fn display_renders_every_row() {
        let text = small().to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("-3.00"));
    }
}
