use std::collections::BTreeSet;
use tracing::debug;

use crate::month_amounts::Month;
use crate::ntypes::Zero;
use crate::report_view::FullReport;

/// Removes months and accounts whose total is exactly zero.
///
/// Only the unfiltered first load goes through here; see
/// [`crate::calculator::ReportCalculator::calculate`]. Negative totals
/// are kept. Account and grand totals are left as computed, and the
/// surviving accounts are restricted to the surviving months so every
/// row is keyed over the same columns.
pub fn suppress_zeros(mut full: FullReport) -> FullReport {
    let before = (full.accounts.len(), full.months.len());

    full.total.month_amounts.remove_zeros();
    let months: BTreeSet<Month> = full.total.month_amounts.months().collect();

    full.accounts.retain(|acc| !acc.total.is_zero());
    full.accounts
        .iter_mut()
        .for_each(|acc| acc.month_amounts.retain_months(&months));

    full.months = months.into_iter().collect();

    debug!(
        removed_accounts = before.0 - full.accounts.len(),
        removed_months = before.1 - full.months.len(),
        "zero suppression"
    );

    full
}
