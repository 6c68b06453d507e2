//! Decoding of account trees from the report JSON.
//!
//! Two encodings of the per-month amounts exist and may be mixed within
//! one document:
//!
//! ```text
//! { "name": "Rent", "fullName": "Expenses:Rent",
//!   "balances": [ { "month": 1, "amount": "900.00" } ] }
//!
//! { "name": "Rent", "fullname": "Expenses:Rent",
//!   "monthAmounts": { "1": 900 } }
//! ```
//!
//! Amounts may be JSON strings or numbers. Numbers are read from their
//! textual form so no binary floating point rounding leaks in.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use tracing::{debug, warn};

use crate::account::AccountNode;
use crate::accname::AccName;
use crate::amount::Amount;
use crate::error::LoadError;
use crate::month_amounts::{Month, MonthAmounts};

/// What to do with an amount literal that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountPolicy {
    /// Fail the whole load.
    #[default]
    Strict,
    /// Use zero and log a warning naming the account and month.
    ZeroWithWarning,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    name: String,
    #[serde(default, alias = "fullname")]
    full_name: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
    #[serde(default)]
    balances: Vec<RawBalance>,
    #[serde(default)]
    month_amounts: BTreeMap<Month, RawAmount>,
    #[serde(default)]
    total: Option<RawAmount>,
}

#[derive(Debug, Deserialize)]
struct RawBalance {
    month: Month,
    amount: RawAmount,
}

/// An amount as written in the document. Numbers keep their source
/// text (`arbitrary_precision`), so the decimal is built from the exact
/// digits.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Value")]
enum RawAmount {
    Number(Number),
    Text(String),
}

impl TryFrom<Value> for RawAmount {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Number(n) => Ok(RawAmount::Number(n)),
            Value::String(s) => Ok(RawAmount::Text(s)),
            other => Err(format!("expected a number or a string amount, found {other}")),
        }
    }
}

impl RawAmount {
    fn literal(&self) -> String {
        match self {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.clone(),
        }
    }

    fn parse(&self) -> Option<Amount> {
        match self {
            RawAmount::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Amount::from(i));
                }
                let s = n.to_string();
                Decimal::from_str_exact(&s)
                    .or_else(|_| Decimal::from_scientific(&s))
                    .ok()
                    .map(Amount::new)
            }
            RawAmount::Text(s) => s.parse().ok(),
        }
    }
}

/// Reads an account tree from `r`.
pub fn read_report(r: impl io::Read, policy: AmountPolicy) -> Result<AccountNode, LoadError> {
    let raw: RawNode = serde_json::from_reader(io::BufReader::new(r))?;
    let root = convert(raw, policy)?;
    debug!(
        accounts = root.descendants().len(),
        months = root.all_months().collect::<BTreeSet<_>>().len(),
        "report decoded"
    );
    Ok(root)
}

/// Like [`read_report`] for an in-memory document.
pub fn parse_report(s: &str, policy: AmountPolicy) -> Result<AccountNode, LoadError> {
    let raw: RawNode = serde_json::from_str(s)?;
    convert(raw, policy)
}

fn convert(raw: RawNode, policy: AmountPolicy) -> Result<AccountNode, LoadError> {
    let ident = raw.full_name.clone().unwrap_or_else(|| raw.name.clone());

    let entries = raw
        .month_amounts
        .into_iter()
        .chain(raw.balances.into_iter().map(|b| (b.month, b.amount)));

    let mut ms = MonthAmounts::new();
    for (month, raw_amount) in entries {
        if !(1..=12).contains(&month) {
            return Err(LoadError::InvalidMonth {
                account: ident,
                month,
            });
        }
        let amount = amount_or(&raw_amount, policy, &ident, month)?;
        let prev = ms.get(month).copied().unwrap_or_default();
        ms.insert(month, prev + amount);
    }

    let total = match raw.total {
        // The shipped total is informative only, a bad one is not fatal.
        Some(t) => t.parse().or_else(|| {
            warn!(account = %ident, literal = %t.literal(), "ignoring invalid total");
            None
        }),
        None => None,
    };

    let children = raw
        .children
        .into_iter()
        .map(|c| convert(c, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let mut node = AccountNode::new(raw.name)
        .with_month_amounts(ms)
        .with_children(children);
    if let Some(full_name) = raw.full_name {
        node = node.with_full_name(AccName::from(full_name));
    }
    if let Some(total) = total {
        node = node.with_total(total);
    }

    Ok(node)
}

fn amount_or(
    raw: &RawAmount,
    policy: AmountPolicy,
    account: &str,
    month: Month,
) -> Result<Amount, LoadError> {
    if let Some(a) = raw.parse() {
        return Ok(a);
    }

    match policy {
        AmountPolicy::Strict => Err(LoadError::InvalidAmount {
            account: account.to_string(),
            month,
            literal: raw.literal(),
        }),
        AmountPolicy::ZeroWithWarning => {
            warn!(
                account,
                month,
                literal = %raw.literal(),
                "invalid amount, using zero"
            );
            Ok(Amount::ZERO)
        }
    }
}
