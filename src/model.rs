use ndarray::Array2;
use num::ToPrimitive;
use tabular::{Row, Table};

use std::fmt;

use crate::constraint::Constraint;
use crate::error::MalformedInput;
use crate::tableau::Tableau;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptDir {
    Max,
    Min,
}

impl fmt::Display for OptDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptDir::Max => write!(f, "Max"),
            OptDir::Min => write!(f, "Min"),
        }
    }
}

/// A linear program over non-negative structural variables `x1..xn`.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub(crate) obj_fn: Vec<f64>,
    pub(crate) opt_dir: OptDir,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) names: Vec<String>,
}

impl Model {
    pub fn new<I, T>(opt_dir: OptDir, obj_fn: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToPrimitive,
    {
        let obj_fn = obj_fn
            .into_iter()
            .map(|c| c.to_f64().unwrap_or(f64::NAN))
            .collect::<Vec<f64>>();
        let names = (1..=obj_fn.len()).map(|j| format!("x{}", j)).collect();
        Self {
            obj_fn,
            opt_dir,
            constraints: Vec::new(),
            names,
        }
    }

    /// Replaces the default `x1..xn` variable names, one per variable.
    pub fn with_names<T: ToString>(
        mut self,
        names: impl IntoIterator<Item = T>,
    ) -> Result<Self, MalformedInput> {
        let names = names.into_iter().map(|n| n.to_string()).collect::<Vec<_>>();
        if names.len() != self.obj_fn.len() {
            return Err(MalformedInput::DimensionMismatch {
                expected: self.obj_fn.len(),
                found: names.len(),
            });
        }
        self.names = names;
        Ok(self)
    }

    //add a constraint to model
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn opt_dir(&self) -> OptDir {
        self.opt_dir
    }

    pub fn n_vars(&self) -> usize {
        self.obj_fn.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Builds the starting tableau `[z | x | slack | rhs]`.
    ///
    /// Every constraint gets a slack column; together they form the identity
    /// block of the starting basis. A `Max` objective is negated so the
    /// tableau always minimizes.
    pub fn as_tableau(&self) -> Result<Tableau, MalformedInput> {
        let n = self.n_vars();
        let m = self.constraints.len();

        let mut tbl = Array2::<f64>::zeros((m + 1, n + m + 2));

        //objective row
        tbl[[0, 0]] = 1.0_f64;
        let sign = match self.opt_dir {
            OptDir::Max => -1.0_f64,
            OptDir::Min => 1.0_f64,
        };
        for (j, coeff) in self.obj_fn.iter().enumerate() {
            tbl[[0, j + 1]] = sign * coeff;
        }

        //constraint rows
        for (i, con) in self.constraints.iter().enumerate() {
            if con.coeffs().len() != n {
                return Err(MalformedInput::DimensionMismatch {
                    expected: n,
                    found: con.coeffs().len(),
                });
            }
            let con = con.as_standard_form(i)?;
            for (j, coeff) in con.coeffs().iter().enumerate() {
                tbl[[i + 1, j + 1]] = *coeff;
            }
            tbl[[i + 1, n + 1 + i]] = 1.0_f64;
            tbl[[i + 1, n + m + 1]] = con.rhs();
        }

        Ok(Tableau::new(tbl))
    }

    fn term_cells(&self, coeffs: &[f64]) -> Vec<String> {
        let mut cells = Vec::with_capacity(2 * self.names.len());
        let mut first = true;
        for (j, name) in self.names.iter().enumerate() {
            let coeff = coeffs.get(j).copied().unwrap_or(0.0_f64);
            if coeff == 0.0_f64 {
                cells.push(String::new());
                cells.push(String::new());
                continue;
            }
            let sign = match (first, coeff >= 0.0_f64) {
                (true, true) => "",
                (_, false) => "-",
                (false, true) => "+",
            };
            cells.push(sign.to_string());
            cells.push(format!("{}*{}", coeff.abs(), name));
            first = false;
        }
        cells
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //OptDir, colon, sign and term per variable, Comp, rhs
        let n = self.n_vars();
        let columns = format!("{{:<}} {{:^}} {}{{:^}} {{:>}}", "{:^}{:>} ".repeat(n));
        let mut table = Table::new(&columns);

        let mut row = vec![format!("{}", self.opt_dir), ":".to_string()];
        row.extend(self.term_cells(&self.obj_fn));
        row.extend([String::new(), String::new()]);
        table.add_row(Row::from_cells(row));

        let mut row = vec!["Subject to".to_string(), ":".to_string()];
        row.extend(vec![String::new(); 2 * n + 2]);
        table.add_row(Row::from_cells(row));

        for constraint in &self.constraints {
            let mut row = vec![String::new(), String::new()];
            row.extend(self.term_cells(constraint.coeffs()));
            row.push(format!(" {} ", constraint.comp()));
            row.push(format!("{}", constraint.rhs()));
            table.add_row(Row::from_cells(row));
        }

        write!(f, "{}", table)
    }
}
