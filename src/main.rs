use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read, Write};

use clap::{Args, Parser, Subcommand};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use finreport::{
    accname::AccName,
    calculator::ReportCalculator,
    filter,
    flatten::Flattening,
    loader::{self, AmountPolicy},
    month_amounts::Month,
    printing::{self, Fmt},
    report_kind::ReportKind,
    report_view::ViewMode,
    selection::Selection,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let input: Box<dyn Read> = match &cli.file {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("Error opening file '{}': {}", path, e);
                std::process::exit(1);
            });
            Box::new(file)
        }
        None => Box::new(io::stdin()),
    };

    let policy = if cli.lenient_amounts {
        AmountPolicy::ZeroWithWarning
    } else {
        AmountPolicy::Strict
    };

    let root = match loader::read_report(input, policy) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("Error loading report: {err}");
            std::process::exit(1);
        }
    };

    let flattening = cli.depth.unwrap_or(cli.kind.default_flattening());
    let calc = ReportCalculator::new(root, flattening);

    let sel = match cli.filters.selection(calc.available_accounts()) {
        Ok(sel) => sel,
        Err(err) => {
            eprintln!("Invalid account pattern: {err}");
            std::process::exit(2);
        }
    };

    let res = match cli.command {
        Commands::Table => print_view(&calc, &sel, ViewMode::Full, cli.kind, cli.format),
        Commands::ByMonth => print_view(&calc, &sel, ViewMode::ByMonth, cli.kind, cli.format),
        Commands::ByAccount => print_view(&calc, &sel, ViewMode::ByAccount, cli.kind, cli.format),
        Commands::Accounts => printing::chips(
            io::stdout(),
            &filter::chips(calc.available_accounts(), sel.accounts.as_ref()),
            cli.format,
        ),
        Commands::Months => printing::chips(
            io::stdout(),
            &filter::chips(calc.available_months(), sel.months.as_ref()),
            cli.format,
        ),
    };

    if let Err(err) = res {
        eprintln!("fail printing the report: {err}");
        std::process::exit(1);
    }
}

fn print_view(
    calc: &ReportCalculator,
    sel: &Selection,
    by: ViewMode,
    kind: ReportKind,
    fmt: Fmt,
) -> io::Result<()> {
    let view = calc.calculate(sel, by);
    if view.is_empty() {
        eprintln!("No data for this selection");
    }

    let mut out = io::stdout().lock();
    if fmt == Fmt::Tty {
        writeln!(out, "{}", console::style(kind).bold())?;
    }
    printing::report(out, &view, fmt)
}

#[derive(Parser)]
#[command(
    author,
    about,
    long_about = None)] // Read from `Cargo.toml`
struct Cli {
    /// The report JSON file, stdin when absent
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Kind of report, decides the default flattening depth
    #[arg(short, long, value_enum, default_value = "expenses", global = true)]
    kind: ReportKind,

    /// List only top-level accounts or every account of the tree
    #[arg(long, value_enum, global = true)]
    depth: Option<Flattening>,

    /// Treat malformed amounts as zero (with a warning) instead of failing
    #[arg(long, global = true)]
    lenient_amounts: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "tty", global = true)]
    format: Fmt,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Accounts as rows, months as columns
    #[command(alias = "full")]
    Table,

    /// Monthly totals as bars
    #[command(aliases = ["month", "chart"])]
    ByMonth,

    /// Account totals as bars
    #[command(alias = "account")]
    ByAccount,

    /// List the accounts that can be selected
    Accounts,

    /// List the months that can be selected
    Months,
}

#[derive(Args)]
struct FilterArgs {
    /// Only include this month (1-12), may be repeated
    #[arg(short, long = "month", global = true, value_parser = clap::value_parser!(u32).range(1..=12))]
    months: Vec<Month>,

    /// Only include the account with this identity, may be repeated
    #[arg(short, long = "account", global = true)]
    accounts: Vec<String>,

    /// Only include accounts whose identity matches this regular
    /// expression, may be repeated
    #[arg(long = "account-match", global = true)]
    account_match: Vec<String>,

    /// Include this account and every account below it, may be repeated
    #[arg(long = "under", global = true)]
    under: Vec<String>,
}

impl FilterArgs {
    /// No flag on an axis means no filter on it.
    fn selection(&self, available: &[String]) -> Result<Selection, regex::Error> {
        let mut sel = Selection::all();

        if !self.months.is_empty() {
            sel = sel.with_months(self.months.iter().copied());
        }

        if !self.accounts.is_empty() || !self.account_match.is_empty() || !self.under.is_empty() {
            let patterns = self
                .account_match
                .iter()
                .map(|p| Regex::new(p))
                .collect::<Result<Vec<_>, _>>()?;

            let parents: Vec<AccName> = self.under.iter().map(|p| AccName::from(p.as_str())).collect();

            let mut accounts: BTreeSet<String> = self.accounts.iter().cloned().collect();
            accounts.extend(
                available
                    .iter()
                    .filter(|a| {
                        let name = AccName::from(a.as_str());
                        patterns.iter().any(|re| re.is_match(a))
                            || parents.iter().any(|p| name.is_within(p))
                    })
                    .cloned(),
            );
            sel.accounts = Some(accounts);
        }

        Ok(sel)
    }
}
