use std::collections::BTreeMap;

use crate::amount::Amount;
use crate::report_view::{ByAccount, ByMonth, FullReport, ReportView, ViewMode};

/// Reshapes a full report into the requested view.
pub fn project(full: FullReport, by: ViewMode) -> ReportView {
    match by {
        ViewMode::Full => ReportView::Full(full),
        ViewMode::ByMonth => ReportView::ByMonth(to_by_month(&full)),
        ViewMode::ByAccount => ReportView::ByAccount(to_by_account(&full)),
    }
}

/// Keeps only the total row: one amount per month.
pub fn to_by_month(full: &FullReport) -> ByMonth {
    ByMonth {
        month_totals: full
            .total
            .month_amounts
            .iter()
            .map(|(m, a)| (m, *a))
            .collect(),
        total: full.total.total,
    }
}

/// Keeps only each account's total, keyed and ordered by identity.
pub fn to_by_account(full: &FullReport) -> ByAccount {
    let mut account_totals: BTreeMap<String, Amount> = BTreeMap::new();
    for acc in &full.accounts {
        *account_totals.entry(acc.identity.clone()).or_default() += acc.total;
    }

    ByAccount {
        account_totals,
        total: full.total.total,
    }
}
