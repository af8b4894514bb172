use log::warn;

/// What to do when the chosen pivot entry is smaller than `pivot_tolerance`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InstabilityPolicy {
    /// Log a warning and pivot anyway.
    #[default]
    Warn,
    /// Abort the solve with `SimplexError::NumericInstability`.
    Fail,
}

/// Tolerances and limits for a single solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplexConfig {
    max_iterations: usize,
    zero_tolerance: f64,
    basis_tolerance: f64,
    pivot_tolerance: f64,
    instability: InstabilityPolicy,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            zero_tolerance: 1.0e-12,
            basis_tolerance: 1.0e-9,
            pivot_tolerance: 1.0e-9,
            instability: InstabilityPolicy::Warn,
        }
    }
}

/// Out-of-range or NaN tolerances are ignored and the previous value kept.
fn accepted(name: &str, tol: f64, in_range: bool) -> bool {
    let ok = in_range && tol.is_finite();
    if !ok {
        warn!("ignoring invalid {} tolerance {}", name, tol);
    }
    ok
}

impl SimplexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of pivots before giving up with
    /// `SimplexError::IterationLimitExceeded`.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Entries smaller than this after elimination are set to zero.
    /// Zero disables the clamp.
    pub fn with_zero_tolerance(mut self, tol: f64) -> Self {
        if accepted("zero", tol, tol >= 0.0_f64) {
            self.zero_tolerance = tol;
        }
        self
    }

    /// Tolerance used when recognising unit (basic) columns.
    pub fn with_basis_tolerance(mut self, tol: f64) -> Self {
        if accepted("basis", tol, tol > 0.0_f64) {
            self.basis_tolerance = tol;
        }
        self
    }

    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        if accepted("pivot", tol, tol >= 0.0_f64) {
            self.pivot_tolerance = tol;
        }
        self
    }

    pub fn with_instability(mut self, policy: InstabilityPolicy) -> Self {
        self.instability = policy;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
    pub fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }
    pub fn basis_tolerance(&self) -> f64 {
        self.basis_tolerance
    }
    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }
    pub fn instability(&self) -> InstabilityPolicy {
        self.instability
    }
}
