use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::amount::Amount;
use crate::ntypes::Zero;

/// Month index, 1 (January) to 12 (December).
pub type Month = u32;

/// Monetary amounts keyed by month.
///
/// Keys need not be contiguous. Iteration is always in ascending
/// month order.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Default)]
#[serde(transparent)]
pub struct MonthAmounts {
    ms: BTreeMap<Month, Amount>,
}

impl MonthAmounts {
    pub fn new() -> Self {
        MonthAmounts::default()
    }

    pub fn get(&self, m: Month) -> Option<&Amount> {
        self.ms.get(&m)
    }

    pub fn insert(&mut self, m: Month, a: Amount) {
        self.ms.insert(m, a);
    }

    pub fn is_empty(&self) -> bool {
        self.ms.is_empty()
    }

    /// Month keys in ascending order.
    pub fn months(&self) -> impl Iterator<Item = Month> + '_ {
        self.ms.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, &Amount)> {
        self.ms.iter().map(|(m, a)| (*m, a))
    }

    /// Sum of every month.
    pub fn total(&self) -> Amount {
        self.ms.values().sum()
    }

    /// Returns a copy restricted to the months accepted by `keep`.
    pub fn filtered(&self, keep: impl Fn(Month) -> bool) -> MonthAmounts {
        self.iter()
            .filter(|(m, _)| keep(*m))
            .map(|(m, a)| (m, *a))
            .collect()
    }

    /// Keeps only the months present in `months`.
    pub fn retain_months(&mut self, months: &BTreeSet<Month>) {
        self.ms.retain(|m, _| months.contains(m));
    }

    /// Removes every month whose amount is exactly zero.
    pub fn remove_zeros(&mut self) {
        self.ms.retain(|_, a| !a.is_zero());
    }
}

impl Zero for MonthAmounts {
    fn is_zero(&self) -> bool {
        self.ms.values().all(|a| a.is_zero())
    }
}

impl IntoIterator for MonthAmounts {
    type Item = (Month, Amount);
    type IntoIter = std::collections::btree_map::IntoIter<Month, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.ms.into_iter()
    }
}

impl<'a> IntoIterator for &'a MonthAmounts {
    type Item = (&'a Month, &'a Amount);
    type IntoIter = std::collections::btree_map::Iter<'a, Month, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.ms.iter()
    }
}

impl FromIterator<(Month, Amount)> for MonthAmounts {
    fn from_iter<T: IntoIterator<Item = (Month, Amount)>>(iter: T) -> Self {
        Self {
            ms: iter.into_iter().collect(),
        }
    }
}

impl Add<MonthAmounts> for MonthAmounts {
    type Output = MonthAmounts;
    fn add(mut self, rhs: MonthAmounts) -> Self::Output {
        self += rhs;
        self
    }
}

/// Column-wise addition: a month missing on one side counts as zero.
impl AddAssign<MonthAmounts> for MonthAmounts {
    fn add_assign(&mut self, rhs: MonthAmounts) {
        rhs.ms.into_iter().for_each(|(m, a)| {
            *self.ms.entry(m).or_default() += a;
        });
    }
}

impl AddAssign<&MonthAmounts> for MonthAmounts {
    fn add_assign(&mut self, rhs: &MonthAmounts) {
        rhs.ms.iter().for_each(|(m, a)| {
            *self.ms.entry(*m).or_default() += a;
        });
    }
}

impl Sum<MonthAmounts> for MonthAmounts {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = MonthAmounts>,
    {
        iter.fold(MonthAmounts::default(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a MonthAmounts> for MonthAmounts {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a MonthAmounts>,
    {
        iter.fold(MonthAmounts::default(), |mut acc, m| {
            acc += m;
            acc
        })
    }
}
