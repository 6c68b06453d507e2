use std::collections::BTreeSet;

use crate::month_amounts::Month;

/// What the user asked to see.
///
/// `None` means "no filter, include everything". `Some` of an empty set
/// means "nothing selected" and yields an all-zero report. The two are
/// never interchangeable: zero suppression only runs when both filters
/// are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub months: Option<BTreeSet<Month>>,
    pub accounts: Option<BTreeSet<String>>,
}

impl Selection {
    /// No filter on either axis.
    pub fn all() -> Selection {
        Selection::default()
    }

    pub fn with_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.months = Some(months.into_iter().collect());
        self
    }

    pub fn with_accounts<S: Into<String>>(mut self, accounts: impl IntoIterator<Item = S>) -> Self {
        self.accounts = Some(accounts.into_iter().map(Into::into).collect());
        self
    }

    /// True when neither axis is filtered.
    pub fn is_unfiltered(&self) -> bool {
        self.months.is_none() && self.accounts.is_none()
    }

    pub fn includes_month(&self, m: Month) -> bool {
        self.months.as_ref().is_none_or(|ms| ms.contains(&m))
    }

    pub fn includes_account(&self, identity: &str) -> bool {
        self.accounts
            .as_ref()
            .is_none_or(|accs| accs.contains(identity))
    }
}
