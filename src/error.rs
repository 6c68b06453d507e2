use std::io;

use thiserror::Error;

use crate::month_amounts::Month;

/// A monetary literal that is not a valid decimal number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid amount literal {literal:?}")]
pub struct AmountParseError {
    pub literal: String,
}

/// Errors raised while decoding an account tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading report: {0}")]
    Io(#[from] io::Error),

    #[error("decoding report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("account {account:?}, month {month}: invalid amount {literal:?}")]
    InvalidAmount {
        account: String,
        month: Month,
        literal: String,
    },

    #[error("account {account:?}: month {month} is outside 1..=12")]
    InvalidMonth { account: String, month: Month },
}

/// A text tag that does not name a view mode or report kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {what} {tag:?}")]
pub struct UnknownTag {
    pub what: &'static str,
    pub tag: String,
}
