use std::io::{self, Write};

use chrono::Month as CalMonth;
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, presets};
use serde::Serialize;

use crate::amount::Amount;
use crate::filter::FilterChip;
use crate::month_amounts::Month;
use crate::ntypes::Zero;
use crate::report_view::{ByAccount, ByMonth, FlatAccountAggregate, FullReport, ReportView};

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Fmt {
    #[default]
    Tty,
    Json,
    Lisp,
}

/// Width in characters of the longest bar.
const BAR_WIDTH: usize = 40;

pub fn report(mut out: impl Write, view: &ReportView, fmt: Fmt) -> io::Result<()> {
    let res = match fmt {
        Fmt::Tty => match view {
            ReportView::Full(f) => full_tty(&mut out, f),
            ReportView::ByMonth(m) => by_month_tty(&mut out, m),
            ReportView::ByAccount(a) => by_account_tty(&mut out, a),
        },
        Fmt::Json => serialized(&mut out, view, fmt),
        Fmt::Lisp => serialized(&mut out, view, fmt),
    };

    match res {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res,
    }
}

/// Prints a list of filter chips, one per line, marked when selected.
pub fn chips<T>(mut out: impl Write, chips: &[FilterChip<T>], fmt: Fmt) -> io::Result<()>
where
    T: std::fmt::Display + Serialize,
{
    match fmt {
        Fmt::Tty => {
            for c in chips {
                let mark = if c.selected { "[x]" } else { "[ ]" };
                writeln!(out, "{mark} {}", c.item)?;
            }
            Ok(())
        }
        Fmt::Json | Fmt::Lisp => serialized(&mut out, &chips, fmt),
    }
}

fn serialized<T: Serialize>(out: &mut impl Write, value: &T, fmt: Fmt) -> io::Result<()> {
    let text = match fmt {
        Fmt::Json => serde_json::to_string(value).map_err(io::Error::other)?,
        _ => serde_lexpr::to_string(value).map_err(io::Error::other)?,
    };
    writeln!(out, "{text}")
}

fn full_tty(out: &mut impl Write, full: &FullReport) -> io::Result<()> {
    let header = std::iter::once(Cell::new(""))
        .chain(full.months.iter().map(|m| {
            Cell::new(month_label(*m))
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right)
        }))
        .chain(std::iter::once(
            Cell::new("Total")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
        ))
        .collect::<Vec<_>>();

    let mut table = Table::new();
    table.load_preset(presets::NOTHING).set_header(header);

    for acc in &full.accounts {
        table.add_row(row(acc, &full.months, false));
    }

    let width = full.months.len() + 2;
    table.add_row(vec![
        Cell::new("--------------")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right);
        width
    ]);
    table.add_row(row(&full.total, &full.months, true));

    writeln!(out, "{table}")
}

/// A table row: the indented account name, one cell per month column
/// and the row total. Months without data print as `0`.
fn row(acc: &FlatAccountAggregate, months: &[Month], bold: bool) -> Vec<Cell> {
    let indent = acc.level.saturating_sub(1);
    let mut name = Cell::new(format!("{}{}", "  ".repeat(indent), acc.name))
        .set_alignment(CellAlignment::Left);
    name = if bold {
        name.add_attribute(Attribute::Bold)
    } else {
        name.fg(Color::DarkBlue)
    };

    let mut cells = vec![name];
    cells.extend(months.iter().map(|m| {
        let a = acc.month_amounts.get(*m).copied().unwrap_or_default();
        amount(a, bold)
    }));
    cells.push(amount(acc.total, bold));
    cells
}

fn by_month_tty(out: &mut impl Write, m: &ByMonth) -> io::Result<()> {
    let rows = m
        .month_totals
        .iter()
        .map(|(k, a)| (month_label(*k), *a))
        .collect::<Vec<_>>();
    bars(out, &rows, m.total)
}

fn by_account_tty(out: &mut impl Write, a: &ByAccount) -> io::Result<()> {
    let rows = a
        .account_totals
        .iter()
        .map(|(k, a)| (k.clone(), *a))
        .collect::<Vec<_>>();
    bars(out, &rows, a.total)
}

/// Horizontal bars scaled against the largest absolute amount.
fn bars(out: &mut impl Write, rows: &[(String, Amount)], total: Amount) -> io::Result<()> {
    let max = rows
        .iter()
        .map(|(_, a)| a.abs())
        .max()
        .unwrap_or_default();

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);

    for (label, a) in rows {
        let len = (a.abs().ratio_of(max) * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(len);
        let bar = if a.is_negative() {
            console::style(bar).red().to_string()
        } else {
            console::style(bar).cyan().to_string()
        };

        table.add_row(vec![
            Cell::new(label).fg(Color::DarkBlue),
            amount(*a, false),
            Cell::new(bar),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        amount(total, true),
        Cell::new(""),
    ]);

    writeln!(out, "{table}")
}

/// Returns a right aligned `Cell` with two decimals, red when negative.
fn amount(a: Amount, bold: bool) -> Cell {
    let text = if a.is_zero() {
        "0".to_string()
    } else {
        format!("{:.2}", a.value())
    };

    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if a.is_negative() {
        cell = cell.fg(Color::DarkRed);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Three letter month name, or the bare index if out of range.
fn month_label(m: Month) -> String {
    u8::try_from(m)
        .ok()
        .and_then(|m| CalMonth::try_from(m).ok())
        .map(|m| m.name()[..3].to_string())
        .unwrap_or_else(|| m.to_string())
}
