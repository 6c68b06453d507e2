use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::amount::Amount;
use crate::error::UnknownTag;
use crate::month_amounts::{Month, MonthAmounts};

/// Name of the synthetic aggregate holding the column-wise sums.
pub const TOTAL_NAME: &str = "Total";

/// One row of a flattened report.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct FlatAccountAggregate {
    pub name: String,
    /// Identity of the account (full name, or short name when the source
    /// has none).
    pub identity: String,
    /// Depth in the source tree; direct children of the report root are
    /// level 1, the synthetic total is level 0.
    pub level: usize,
    pub month_amounts: MonthAmounts,
    pub total: Amount,
}

impl FlatAccountAggregate {
    /// Builds an aggregate whose `total` is the sum of `month_amounts`.
    pub fn new(
        name: impl Into<String>,
        identity: impl Into<String>,
        level: usize,
        month_amounts: MonthAmounts,
    ) -> FlatAccountAggregate {
        let total = month_amounts.total();
        FlatAccountAggregate {
            name: name.into(),
            identity: identity.into(),
            level,
            month_amounts,
            total,
        }
    }

    /// The synthetic `Total` row.
    pub fn total_row(month_amounts: MonthAmounts) -> FlatAccountAggregate {
        FlatAccountAggregate::new(TOTAL_NAME, TOTAL_NAME, 0, month_amounts)
    }
}

/// The full table: one row per surviving account plus the total row.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct FullReport {
    pub accounts: Vec<FlatAccountAggregate>,
    pub total: FlatAccountAggregate,
    /// Month columns, ascending.
    pub months: Vec<Month>,
}

impl FullReport {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.months.is_empty()
    }
}

/// Per-month totals, accounts collapsed.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct ByMonth {
    pub month_totals: BTreeMap<Month, Amount>,
    pub total: Amount,
}

/// Per-account totals keyed by identity, months collapsed.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct ByAccount {
    pub account_totals: BTreeMap<String, Amount>,
    pub total: Amount,
}

/// The result of a calculation, in the shape the caller asked for.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ReportView {
    Full(FullReport),
    ByMonth(ByMonth),
    ByAccount(ByAccount),
}

impl ReportView {
    /// The grand total, identical across the three shapes for a given
    /// selection.
    pub fn grand_total(&self) -> Amount {
        match self {
            ReportView::Full(f) => f.total.total,
            ReportView::ByMonth(m) => m.total,
            ReportView::ByAccount(a) => a.total,
        }
    }

    /// True when the selection matched nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            ReportView::Full(f) => f.is_empty(),
            ReportView::ByMonth(m) => m.month_totals.is_empty(),
            ReportView::ByAccount(a) => a.account_totals.is_empty(),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match self {
            ReportView::Full(_) => ViewMode::Full,
            ReportView::ByMonth(_) => ViewMode::ByMonth,
            ReportView::ByAccount(_) => ViewMode::ByAccount,
        }
    }
}

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ViewMode {
    /// Accounts as rows, months as columns.
    #[value(alias = "table")]
    Full,
    /// One bar per month.
    #[value(aliases = ["month", "bar-month", "chart"])]
    ByMonth,
    /// One bar per account.
    #[value(aliases = ["account", "bar-account"])]
    ByAccount,
}

impl FromStr for ViewMode {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FULL" | "TABLE" => Ok(ViewMode::Full),
            "BY_MONTH" | "BAR_MONTH" | "CHART" | "MONTH" => Ok(ViewMode::ByMonth),
            "BY_ACCOUNT" | "BAR_ACCOUNT" | "ACCOUNT" => Ok(ViewMode::ByAccount),
            _ => Err(UnknownTag {
                what: "view mode",
                tag: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ViewMode::Full => "FULL",
            ViewMode::ByMonth => "BY_MONTH",
            ViewMode::ByAccount => "BY_ACCOUNT",
        };
        write!(f, "{s}")
    }
}
