use log::{debug, info, warn};

use crate::config::{InstabilityPolicy, SimplexConfig};
use crate::error::SimplexError;
use crate::tableau::{Tableau, TableauIx};

/// Called after every pivot with the iteration number (starting at 1), the
/// pivot cell and the tableau after elimination.
pub trait PivotObserver {
    fn on_pivot(&mut self, iteration: usize, pivot: &TableauIx, tbl: &Tableau);
}

impl<F> PivotObserver for F
where
    F: FnMut(usize, &TableauIx, &Tableau),
{
    fn on_pivot(&mut self, iteration: usize, pivot: &TableauIx, tbl: &Tableau) {
        self(iteration, pivot, tbl)
    }
}

/// Outcome of a single loop transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Optimal,
    Pivoted(TableauIx),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,
    pub objective_value: f64,
}

/// Primal simplex driver over a caller-owned tableau.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    config: SimplexConfig,
}

impl Simplex {
    pub fn new(config: SimplexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimplexConfig {
        &self.config
    }

    #[inline(always)]
    fn pivot_ind(&self, tbl: &Tableau) -> Result<TableauIx, SimplexError> {
        let j = tbl.pivot_col();
        let i = tbl
            .pivot_row(j)
            .ok_or(SimplexError::Unbounded { column: j })?;

        let value = tbl.tbl()[[i, j]];
        if value.abs() < self.config.pivot_tolerance() {
            match self.config.instability() {
                InstabilityPolicy::Warn => {
                    warn!("pivot entry {:e} at [{}, {}] is close to zero", value, i, j)
                }
                InstabilityPolicy::Fail => {
                    return Err(SimplexError::NumericInstability {
                        row: i,
                        column: j,
                        value,
                    })
                }
            }
        }
        Ok(TableauIx::new(i, j))
    }

    /// Pivots once on a tableau that is known not to be optimal. A pivot that
    /// leaves non-finite entries behind is reported as numerically unstable.
    fn advance(&self, tbl: &mut Tableau) -> Result<TableauIx, SimplexError> {
        let ix = self.pivot_ind(tbl)?;
        let value = tbl.tbl()[[ix.i(), ix.j()]];
        tbl.pivot(&ix, self.config.zero_tolerance());
        if tbl.tbl().iter().any(|v| !v.is_finite()) {
            return Err(SimplexError::NumericInstability {
                row: ix.i(),
                column: ix.j(),
                value,
            });
        }
        Ok(ix)
    }

    /// One transition of the loop. The tableau is validated first and an
    /// optimal tableau is left untouched.
    pub fn step(&self, tbl: &mut Tableau) -> Result<Step, SimplexError> {
        tbl.validate(self.config.basis_tolerance())?;
        if tbl.is_optimal() {
            return Ok(Step::Optimal);
        }
        self.advance(tbl).map(Step::Pivoted)
    }

    pub fn solve(&self, tbl: &mut Tableau) -> Result<SolveReport, SimplexError> {
        self.solve_observed(tbl, &mut |_: usize, _: &TableauIx, _: &Tableau| {})
    }

    /// Pivots until optimal. On error the tableau keeps the state reached so
    /// far.
    pub fn solve_observed<O: PivotObserver + ?Sized>(
        &self,
        tbl: &mut Tableau,
        observer: &mut O,
    ) -> Result<SolveReport, SimplexError> {
        tbl.validate(self.config.basis_tolerance())?;

        let mut pvt_cnt = 0;
        while !tbl.is_optimal() {
            if pvt_cnt >= self.config.max_iterations() {
                warn!("giving up after {} pivots", pvt_cnt);
                return Err(SimplexError::IterationLimitExceeded {
                    iterations: pvt_cnt,
                });
            }
            let ix = self.advance(tbl)?;
            pvt_cnt += 1;
            debug!(
                "pivot {} on {}, objective {}",
                pvt_cnt,
                ix,
                tbl.objective_value()
            );
            observer.on_pivot(pvt_cnt, &ix, tbl);
        }

        info!(
            "optimal after {} pivots, objective {}",
            pvt_cnt,
            tbl.objective_value()
        );
        Ok(SolveReport {
            iterations: pvt_cnt,
            objective_value: tbl.objective_value(),
        })
    }
}
