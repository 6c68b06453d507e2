use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTag;
use crate::flatten::Flattening;

/// The periodic reports the data source publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Expenses,
    Assets,
    Liabilities,
    Income,
    NetWorth,
    Savings,
}

impl ReportKind {
    /// Flattening depth used when the caller does not override it.
    /// Expenses list their top-level categories only; balance sheet
    /// style reports show the whole hierarchy.
    pub fn default_flattening(&self) -> Flattening {
        match self {
            ReportKind::Expenses => Flattening::Top,
            ReportKind::Assets
            | ReportKind::Liabilities
            | ReportKind::Income
            | ReportKind::NetWorth
            | ReportKind::Savings => Flattening::Full,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Expenses => "Expenses",
            ReportKind::Assets => "Assets",
            ReportKind::Liabilities => "Liabilities",
            ReportKind::Income => "Income",
            ReportKind::NetWorth => "Net Worth",
            ReportKind::Savings => "Savings",
        }
    }
}

impl FromStr for ReportKind {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <ReportKind as ValueEnum>::from_str(s, true).map_err(|_| UnknownTag {
            what: "report kind",
            tag: s.to_string(),
        })
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
