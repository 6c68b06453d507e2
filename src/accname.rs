use serde::{Deserialize, Serialize};
use std::fmt;

/// The fully qualified name of an account.
///
/// Account names use a colon-separated hierarchy, for example
/// `"Assets:Investments:Retirement:401K"`. The full name is unique
/// across a report, unlike the short display name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AccName(String);

impl AccName {
    /// Account name separator
    const SEP: &'static str = ":";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns an iterator over the account name parts.
    ///
    /// # Examples
    /// ```
    /// use finreport::accname::AccName;
    ///
    /// let acc = AccName::from("Assets:Bank:Checking");
    /// let parts: Vec<&str> = acc.parts().collect();
    /// assert_eq!(parts, vec!["Assets", "Bank", "Checking"]);
    /// ```
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(AccName::SEP)
    }

    /// Returns the names of every ancestor, outermost first, excluding
    /// the account itself.
    ///
    /// # Examples
    /// ```
    /// use finreport::accname::AccName;
    ///
    /// let acc = AccName::from("Assets:Bank:Checking");
    /// let parents: Vec<&str> = acc.parent_accounts().collect();
    /// assert_eq!(parents, vec!["Assets", "Assets:Bank"]);
    /// ```
    pub fn parent_accounts(&self) -> impl Iterator<Item = &str> {
        self.0
            .match_indices(AccName::SEP)
            .map(|(i, _)| &self.0[..i])
    }

    /// True if `self` is `other` or one of its descendants.
    pub fn is_within(&self, other: &AccName) -> bool {
        self == other || self.parent_accounts().any(|p| p == other.as_str())
    }
}

impl From<&str> for AccName {
    fn from(value: &str) -> Self {
        AccName(value.to_string())
    }
}

impl From<String> for AccName {
    fn from(value: String) -> Self {
        AccName(value)
    }
}

impl fmt::Display for AccName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for AccName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
