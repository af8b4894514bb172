use num::ToPrimitive;

use std::fmt;

use crate::error::MalformedInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comp {
    Le, // <=
    Ge, // >=
    Eq, // ==
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Comp::Le => write!(f, "\u{2264}"),
            Comp::Eq => write!(f, "="),
            Comp::Ge => write!(f, "\u{2265}"),
        }
    }
}

/// A linear constraint `coeffs · x  comp  rhs` over the structural variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coeffs: Vec<f64>,
    pub comp: Comp,
    pub rhs: f64,
}

impl Constraint {
    /// Coefficients that do not convert to `f64` become NaN and are rejected
    /// when the tableau is validated.
    pub fn new<I, T, U>(coeffs: I, comp: Comp, rhs: U) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToPrimitive,
        U: ToPrimitive,
    {
        Self {
            coeffs: coeffs
                .into_iter()
                .map(|c| c.to_f64().unwrap_or(f64::NAN))
                .collect(),
            comp,
            rhs: rhs.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn comp(&self) -> Comp {
        self.comp
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Rewrites the constraint as `≤` with a non-negative rhs, so that its
    /// slack variable can start in the basis. `index` is only used for the
    /// error.
    pub fn as_standard_form(&self, index: usize) -> Result<Constraint, MalformedInput> {
        let negated = || Constraint {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
            comp: Comp::Le,
            rhs: -self.rhs,
        };
        match self.comp {
            Comp::Le if self.rhs >= 0.0_f64 => Ok(self.clone()),
            Comp::Ge if self.rhs <= 0.0_f64 => Ok(negated()),
            _ => Err(MalformedInput::UnsupportedConstraint { index }),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(j, c)| format!("{}*x{}", c, j + 1))
            .collect::<Vec<String>>();
        write!(f, "{} {} {}", terms.join(" + "), self.comp, self.rhs)
    }
}
