//! Checkable filter chips: an "All" pseudo item followed by one chip
//! per real month or account.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A chip either stands for every item or for one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterItem<T> {
    All,
    Item(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip<T> {
    pub item: FilterItem<T>,
    pub selected: bool,
}

/// Builds the chips for `available` given the current selection.
///
/// `None` selects everything. The "All" chip is selected when every
/// real item is.
pub fn chips<T>(available: &[T], selected: Option<&BTreeSet<T>>) -> Vec<FilterChip<T>>
where
    T: Ord + Clone,
{
    let is_selected = |it: &T| selected.is_none_or(|s| s.contains(it));
    let all = available.iter().all(is_selected);

    std::iter::once(FilterChip {
        item: FilterItem::All,
        selected: all,
    })
    .chain(available.iter().map(|it| FilterChip {
        item: FilterItem::Item(it.clone()),
        selected: is_selected(it),
    }))
    .collect()
}

/// Returns the selection after the user toggles `item`.
///
/// Toggling "All" goes back to no filter, or to nothing selected when
/// everything already was. Toggling a real item always yields an
/// explicit set, so a later recalculation keeps zero rows.
pub fn toggle<T>(
    available: &[T],
    selected: Option<&BTreeSet<T>>,
    item: &FilterItem<T>,
) -> Option<BTreeSet<T>>
where
    T: Ord + Clone,
{
    let every = || available.iter().cloned().collect::<BTreeSet<T>>();

    match item {
        FilterItem::All => {
            let all_selected = available
                .iter()
                .all(|it| selected.is_none_or(|s| s.contains(it)));
            if all_selected {
                Some(BTreeSet::new())
            } else {
                None
            }
        }
        FilterItem::Item(it) => {
            let mut set = selected.cloned().unwrap_or_else(every);
            if !set.remove(it) {
                set.insert(it.clone());
            }
            Some(set)
        }
    }
}

impl<T: fmt::Display> fmt::Display for FilterItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterItem::All => write!(f, "All"),
            FilterItem::Item(it) => write!(f, "{it}"),
        }
    }
}
