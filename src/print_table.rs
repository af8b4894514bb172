use colored::*;

use std::io::{self, Write};

use log::warn;

use crate::simplex::PivotObserver;
use crate::tableau::{Tableau, TableauIx};

/// Prints every intermediate tableau, bracketing the pivot entry.
pub struct TableauPrinter<W: Write> {
    out: W,
    precision: usize,
}

impl TableauPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TableauPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, precision: 2 }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes `tbl` under a bold heading, optionally marking a cell.
    pub fn print(
        &mut self,
        heading: &str,
        tbl: &Tableau,
        highlight: Option<&TableauIx>,
    ) -> io::Result<()> {
        writeln!(self.out, "{}", heading.bold())?;
        writeln!(self.out, "{}", tbl.to_table(self.precision, highlight))
    }
}

impl<W: Write> PivotObserver for TableauPrinter<W> {
    fn on_pivot(&mut self, _iteration: usize, pivot: &TableauIx, tbl: &Tableau) {
        let heading = format!("After pivoting on {}:", pivot);
        if let Err(e) = self.print(&heading, tbl, Some(pivot)) {
            warn!("could not print tableau: {}", e);
        }
    }
}
