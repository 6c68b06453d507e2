//! Flattening of an account tree into report rows.
//!
//! Every row is aggregated from the node's own `month_amounts` only,
//! filtered by the selected months. Children are never summed into
//! their parent: the source already stores whatever subtotals it wants
//! shown.

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use crate::account::AccountNode;
use crate::month_amounts::{Month, MonthAmounts};
use crate::report_view::{FlatAccountAggregate, FullReport};
use crate::selection::Selection;

/// Decides which nodes of the tree become rows, and in which order.
pub trait FlattenStrategy {
    /// Returns the candidate rows as `(level, node)` pairs in display
    /// order, before any account filtering.
    fn rows<'a>(&self, root: &'a AccountNode) -> Vec<(usize, &'a AccountNode)>;
}

/// Only the direct children of the root become rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevel;

/// Every descendant becomes a row, annotated with its depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDepth;

impl FlattenStrategy for TopLevel {
    fn rows<'a>(&self, root: &'a AccountNode) -> Vec<(usize, &'a AccountNode)> {
        sorted_children(root).into_iter().map(|c| (1, c)).collect()
    }
}

impl FlattenStrategy for FullDepth {
    fn rows<'a>(&self, root: &'a AccountNode) -> Vec<(usize, &'a AccountNode)> {
        let mut res = Vec::new();
        pre_order(root, 1, &mut res);
        res
    }
}

/// Children ordered by short name. The sort is stable, so siblings that
/// share a name keep their source order.
fn sorted_children(node: &AccountNode) -> Vec<&AccountNode> {
    let mut cs: Vec<&AccountNode> = node.children().iter().collect();
    cs.sort_by(|a, b| a.name().cmp(b.name()));
    cs
}

fn pre_order<'a>(node: &'a AccountNode, level: usize, res: &mut Vec<(usize, &'a AccountNode)>) {
    for child in sorted_children(node) {
        res.push((level, child));
        pre_order(child, level + 1, res);
    }
}

/// Selectable flattening depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Flattening {
    /// Direct children of the report root only.
    Top,
    /// Every account in the tree, indented by level.
    Full,
}

impl FlattenStrategy for Flattening {
    fn rows<'a>(&self, root: &'a AccountNode) -> Vec<(usize, &'a AccountNode)> {
        match self {
            Flattening::Top => TopLevel.rows(root),
            Flattening::Full => FullDepth.rows(root),
        }
    }
}

/// Flattens `root` into a `FullReport` honouring `sel`.
///
/// Accounts named in the selection but absent from the tree are
/// ignored. A month only shows up as a column if at least one
/// surviving account has an amount for it.
pub fn flatten(root: &AccountNode, sel: &Selection, strategy: &impl FlattenStrategy) -> FullReport {
    let accounts: Vec<FlatAccountAggregate> = strategy
        .rows(root)
        .into_iter()
        .filter(|(_, node)| sel.includes_account(node.identity()))
        .map(|(level, node)| {
            let ms = node
                .month_amounts()
                .filtered(|m| sel.includes_month(m));
            FlatAccountAggregate::new(node.name(), node.identity(), level, ms)
        })
        .collect();

    // Recomputed from the produced rows so the total row agrees with
    // them exactly. Its keys are the months of the surviving rows.
    let totals: MonthAmounts = accounts.iter().map(|a| &a.month_amounts).sum();
    let months: Vec<Month> = totals.months().collect();

    debug!(
        rows = accounts.len(),
        months = months.len(),
        "flattened report"
    );

    FullReport {
        accounts,
        total: FlatAccountAggregate::total_row(totals),
        months,
    }
}
