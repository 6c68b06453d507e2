use std::collections::BTreeMap;
use std::thread;

use pretty_assertions::assert_eq;

use finreport::account::AccountNode;
use finreport::amount::Amount;
use finreport::calculator::ReportCalculator;
use finreport::flatten::Flattening;
use finreport::report_view::{ByAccount, ByMonth, FullReport, ReportView, ViewMode};
use finreport::selection::Selection;
use finreport::{amount, month_amounts};

fn siblings() -> AccountNode {
    AccountNode::new("Expenses")
        .with_child(AccountNode::new("Account1").with_month_amounts(month_amounts! {1 => 1, 2 => 2, 3 => 3, 4 => 4}))
        .with_child(AccountNode::new("Account2").with_month_amounts(month_amounts! {1 => 7, 2 => 8, 3 => 9, 4 => 10}))
        .with_child(AccountNode::new("Account3").with_month_amounts(month_amounts! {1 => 14, 2 => 15, 3 => 16, 4 => 17}))
}

/// `Account1` stores its own amounts, which are not the sum of its
/// children.
fn nested() -> AccountNode {
    AccountNode::new("Expenses")
        .with_child(
            AccountNode::new("Account1")
                .with_month_amounts(month_amounts! {1 => 6, 2 => 11, 3 => 16, 4 => 45})
                .with_child(AccountNode::new("Account11").with_month_amounts(month_amounts! {1 => 4, 2 => 5, 3 => 8, 4 => 33}))
                .with_child(AccountNode::new("Account12").with_month_amounts(month_amounts! {1 => 2, 2 => 6, 3 => 8, 4 => 12})),
        )
        .with_child(AccountNode::new("Account2").with_month_amounts(month_amounts! {1 => 7, 2 => 8, 3 => 9, 4 => 10}))
        .with_child(AccountNode::new("Account3").with_month_amounts(month_amounts! {1 => 14, 2 => 15, 3 => 16, 4 => 17}))
}

fn full(view: ReportView) -> FullReport {
    match view {
        ReportView::Full(f) => f,
        other => panic!("expected a full view, got {other:?}"),
    }
}

fn totals(f: &FullReport) -> Vec<(&str, Amount)> {
    f.accounts.iter().map(|a| (a.name.as_str(), a.total)).collect()
}

#[test]
fn full_without_filters() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let f = full(calc.calculate(&Selection::all(), ViewMode::Full));

    assert_eq!(f.total.month_amounts, month_amounts! {1 => 22, 2 => 25, 3 => 28, 4 => 31});
    assert_eq!(f.total.total, amount!(106));
    assert_eq!(
        totals(&f),
        vec![("Account1", amount!(10)), ("Account2", amount!(34)), ("Account3", amount!(62))]
    );
    assert_eq!(f.months, vec![1, 2, 3, 4]);
}

#[test]
fn full_filtered_by_accounts() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let sel = Selection::all().with_accounts(["Account2", "Account3"]);
    let f = full(calc.calculate(&sel, ViewMode::Full));

    assert_eq!(f.total.month_amounts, month_amounts! {1 => 21, 2 => 23, 3 => 25, 4 => 27});
    assert_eq!(f.total.total, amount!(96));
    assert_eq!(totals(&f), vec![("Account2", amount!(34)), ("Account3", amount!(62))]);
}

#[test]
fn full_filtered_by_months() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let sel = Selection::all().with_months([2, 3]);
    let f = full(calc.calculate(&sel, ViewMode::Full));

    assert_eq!(f.total.month_amounts, month_amounts! {2 => 25, 3 => 28});
    assert_eq!(f.total.total, amount!(53));
    assert_eq!(
        totals(&f),
        vec![("Account1", amount!(5)), ("Account2", amount!(17)), ("Account3", amount!(31))]
    );
}

#[test]
fn by_account_without_filters() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let view = calc.calculate(&Selection::all(), ViewMode::ByAccount);

    assert_eq!(
        view,
        ReportView::ByAccount(ByAccount {
            account_totals: BTreeMap::from([
                ("Account1".to_string(), amount!(10)),
                ("Account2".to_string(), amount!(34)),
                ("Account3".to_string(), amount!(62)),
            ]),
            total: amount!(106),
        })
    );
}

#[test]
fn by_month_without_filters() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let view = calc.calculate(&Selection::all(), ViewMode::ByMonth);

    assert_eq!(
        view,
        ReportView::ByMonth(ByMonth {
            month_totals: BTreeMap::from([
                (1, amount!(22)),
                (2, amount!(25)),
                (3, amount!(28)),
                (4, amount!(31)),
            ]),
            total: amount!(106),
        })
    );
}

#[test]
fn nested_accounts_use_their_own_amounts() {
    let calc = ReportCalculator::new(nested(), Flattening::Top);
    let f = full(calc.calculate(&Selection::all(), ViewMode::Full));

    assert_eq!(
        totals(&f),
        vec![("Account1", amount!(78)), ("Account2", amount!(34)), ("Account3", amount!(62))]
    );
    assert_eq!(f.total.month_amounts, month_amounts! {1 => 27, 2 => 34, 3 => 41, 4 => 72});
    assert_eq!(f.total.total, amount!(174));
    assert_eq!(calc.available_accounts(), ["Account1", "Account2", "Account3"]);
}

#[test]
fn nested_accounts_at_full_depth() {
    let calc = ReportCalculator::new(nested(), Flattening::Full);
    let f = full(calc.calculate(&Selection::all(), ViewMode::Full));

    let rows: Vec<(usize, &str, Amount)> = f
        .accounts
        .iter()
        .map(|a| (a.level, a.name.as_str(), a.total))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Account1", amount!(78)),
            (2, "Account11", amount!(50)),
            (2, "Account12", amount!(28)),
            (1, "Account2", amount!(34)),
            (1, "Account3", amount!(62)),
        ]
    );
    assert_eq!(f.total.total, amount!(252));
    assert_eq!(calc.available_accounts().len(), 5);
}

#[test]
fn empty_account_selection_is_all_zero() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let sel = Selection::all().with_accounts(Vec::<String>::new());

    let f = full(calc.calculate(&sel, ViewMode::Full));
    assert!(f.accounts.is_empty());
    assert!(f.total.month_amounts.iter().all(|(_, a)| *a == Amount::ZERO));
    assert_eq!(f.total.total, Amount::ZERO);

    let by_acc = calc.calculate(&sel, ViewMode::ByAccount);
    assert!(by_acc.is_empty());
    assert_eq!(by_acc.grand_total(), Amount::ZERO);
}

#[test]
fn unknown_accounts_are_ignored() {
    let calc = ReportCalculator::new(siblings(), Flattening::Top);
    let sel = Selection::all().with_accounts(["Account2", "Nowhere"]);
    let f = full(calc.calculate(&sel, ViewMode::Full));

    assert_eq!(totals(&f), vec![("Account2", amount!(34))]);
    assert_eq!(f.total.total, amount!(34));
}

#[test]
fn repeated_calls_are_identical() {
    let calc = ReportCalculator::new(nested(), Flattening::Full);
    let sel = Selection::all().with_months([1, 4]);

    for by in [ViewMode::Full, ViewMode::ByMonth, ViewMode::ByAccount] {
        assert_eq!(calc.calculate(&sel, by), calc.calculate(&sel, by));
    }
}

#[test]
fn concurrent_calls_share_the_tree() {
    let calc = ReportCalculator::new(nested(), Flattening::Full);
    let expected: Vec<ReportView> = (1..=4)
        .map(|m| calc.calculate(&Selection::all().with_months([m]), ViewMode::ByAccount))
        .collect();

    let got: Vec<ReportView> = thread::scope(|s| {
        let handles: Vec<_> = (1..=4)
            .map(|m| {
                let calc = &calc;
                s.spawn(move || calc.calculate(&Selection::all().with_months([m]), ViewMode::ByAccount))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(got, expected);
}
