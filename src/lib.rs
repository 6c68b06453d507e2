pub mod accname;
pub mod account;
pub mod amount;
pub mod calculator;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod loader;
pub mod macros;
pub mod month_amounts;
pub mod ntypes;
pub mod printing;
pub mod projection;
pub mod report_kind;
pub mod report_view;
pub mod selection;
pub mod suppress;
