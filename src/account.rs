use serde::Serialize;

use crate::accname::AccName;
use crate::amount::Amount;
use crate::month_amounts::{Month, MonthAmounts};

/// One node of an account tree.
///
/// `month_amounts` holds the amounts posted directly to this account.
/// They are not assumed to be the sum of the children: a report may
/// store explicit subtotals at every level, so aggregation always
/// works from each node's own amounts. `total` is the figure shipped
/// by the data source and is kept for reference only.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
pub struct AccountNode {
    name: String,
    full_name: Option<AccName>,
    month_amounts: MonthAmounts,
    children: Vec<AccountNode>,
    total: Option<Amount>,
}

impl AccountNode {
    pub fn new(name: impl Into<String>) -> AccountNode {
        AccountNode {
            name: name.into(),
            ..AccountNode::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<AccName>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_month_amounts(mut self, ms: MonthAmounts) -> Self {
        self.month_amounts = ms;
        self
    }

    pub fn with_children(mut self, children: Vec<AccountNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: AccountNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_total(mut self, total: Amount) -> Self {
        self.total = Some(total);
        self
    }

    /// Short display label, unique among siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> Option<&AccName> {
        self.full_name.as_ref()
    }

    /// Identity used to match the account against a selection: the full
    /// name when the source provides one, the short name otherwise.
    pub fn identity(&self) -> &str {
        self.full_name
            .as_ref()
            .map_or(self.name.as_str(), |n| n.as_str())
    }

    pub fn month_amounts(&self) -> &MonthAmounts {
        &self.month_amounts
    }

    pub fn children(&self) -> &[AccountNode] {
        &self.children
    }

    /// Total as provided by the source. Aggregation never reads it.
    pub fn source_total(&self) -> Option<Amount> {
        self.total
    }

    /// Visits every descendant in pre-order with its level, direct
    /// children being level 1. The node itself is not visited.
    pub fn descendants(&self) -> Vec<(usize, &AccountNode)> {
        let mut res = Vec::new();
        collect_descendants(self, 1, &mut res);
        res
    }

    /// Every month key used anywhere below (and including) this node.
    pub fn all_months(&self) -> impl Iterator<Item = Month> + '_ {
        self.month_amounts.months().chain(
            self.descendants()
                .into_iter()
                .flat_map(|(_, n)| n.month_amounts.months().collect::<Vec<_>>()),
        )
    }
}

fn collect_descendants<'a>(
    node: &'a AccountNode,
    level: usize,
    res: &mut Vec<(usize, &'a AccountNode)>,
) {
    for child in &node.children {
        res.push((level, child));
        collect_descendants(child, level + 1, res);
    }
}
