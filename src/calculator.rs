use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::account::AccountNode;
use crate::flatten::{self, FlattenStrategy, Flattening};
use crate::month_amounts::Month;
use crate::projection;
use crate::report_view::{FullReport, ReportView, ViewMode};
use crate::selection::Selection;
use crate::suppress;

/// Computes report views over one immutable account tree.
///
/// `calculate` is a pure function of its arguments and the bound tree,
/// so a calculator can be shared between threads and called
/// concurrently. Loading another report means building another
/// calculator.
#[derive(Debug, Clone)]
pub struct ReportCalculator {
    root: Arc<AccountNode>,
    flattening: Flattening,
    accounts: Vec<String>,
    months: Vec<Month>,
}

impl ReportCalculator {
    pub fn new(root: impl Into<Arc<AccountNode>>, flattening: Flattening) -> ReportCalculator {
        let root = root.into();

        let rows = flattening.rows(&root);
        let accounts = rows.iter().map(|(_, n)| n.identity().to_string()).collect();
        let months: BTreeSet<Month> = rows
            .iter()
            .flat_map(|(_, n)| n.month_amounts().months())
            .collect();

        ReportCalculator {
            root,
            flattening,
            accounts,
            months: months.into_iter().collect(),
        }
    }

    /// Identities of the accounts that can become rows, in display
    /// order.
    pub fn available_accounts(&self) -> &[String] {
        &self.accounts
    }

    /// Months with data in any row candidate, ascending.
    pub fn available_months(&self) -> &[Month] {
        &self.months
    }

    /// Flattens, suppresses zeros on the unfiltered load only, and
    /// projects to `by`.
    pub fn calculate(&self, sel: &Selection, by: ViewMode) -> ReportView {
        let full = self.calculate_full(sel);
        projection::project(full, by)
    }

    /// Like [`Self::calculate`] but always returns the full table.
    pub fn calculate_full(&self, sel: &Selection) -> FullReport {
        let full = flatten::flatten(&self.root, sel, &self.flattening);

        // Any explicit selection keeps its zero rows and columns, even
        // one that happens to select everything.
        if sel.is_unfiltered() {
            return suppress::suppress_zeros(full);
        }

        debug!("filtered selection, zero rows kept");
        full
    }
}

/// Counts report loads, so results computed for an older load can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

/// A value computed for a given load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<T> {
    pub generation: Generation,
    pub value: T,
}

/// Holds the calculator for the currently loaded report.
#[derive(Debug, Clone, Default)]
pub enum ReportState {
    /// No report bound yet.
    #[default]
    Uninitialized,
    /// A report is bound and accepts calculations.
    Ready {
        generation: Generation,
        calculator: ReportCalculator,
    },
}

impl ReportState {
    /// Binds a freshly loaded report, replacing whatever was bound
    /// before with a new calculator.
    pub fn load(&mut self, root: AccountNode, flattening: Flattening) -> Generation {
        let generation = match self {
            ReportState::Uninitialized => Generation(1),
            ReportState::Ready { generation, .. } => Generation(generation.0 + 1),
        };

        let calculator = ReportCalculator::new(root, flattening);
        info!(
            generation = generation.0,
            accounts = calculator.available_accounts().len(),
            months = calculator.available_months().len(),
            "report loaded"
        );

        *self = ReportState::Ready {
            generation,
            calculator,
        };
        generation
    }

    pub fn calculator(&self) -> Option<&ReportCalculator> {
        match self {
            ReportState::Uninitialized => None,
            ReportState::Ready { calculator, .. } => Some(calculator),
        }
    }

    pub fn generation(&self) -> Option<Generation> {
        match self {
            ReportState::Uninitialized => None,
            ReportState::Ready { generation, .. } => Some(*generation),
        }
    }

    /// Returns `None` until a report is loaded.
    pub fn calculate(&self, sel: &Selection, by: ViewMode) -> Option<Tagged<ReportView>> {
        match self {
            ReportState::Uninitialized => None,
            ReportState::Ready {
                generation,
                calculator,
            } => Some(Tagged {
                generation: *generation,
                value: calculator.calculate(sel, by),
            }),
        }
    }

    /// True if `tagged` was computed against the report bound now.
    pub fn is_current<T>(&self, tagged: &Tagged<T>) -> bool {
        self.generation() == Some(tagged.generation)
    }
}
