//! Primal simplex over a dense tableau.
//!
//! A [`Tableau`] is built by hand or from a [`Model`], then driven to
//! optimality by [`Simplex`]. Every pivot can be traced through a
//! [`PivotObserver`], for example [`TableauPrinter`].

pub mod config;
pub mod constraint;
pub mod error;
pub mod model;
pub mod print_table;
pub mod simplex;
pub mod solver;
pub mod tableau;

pub use config::{InstabilityPolicy, SimplexConfig};
pub use constraint::{Comp, Constraint};
pub use error::{MalformedInput, SimplexError};
pub use model::{Model, OptDir};
pub use print_table::TableauPrinter;
pub use simplex::{PivotObserver, Simplex, SolveReport, Step};
pub use solver::{SolveAlgorithm, Solution};
pub use tableau::{Tableau, TableauIx};
