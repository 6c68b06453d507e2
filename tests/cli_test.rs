use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn finreport(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_finreport"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("\n Can't execute finreport")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn json_of(out: &Output) -> Value {
    assert!(out.status.success(), "finreport failed: {}", stderr(out));
    serde_json::from_str(&stdout(out)).unwrap()
}

#[test]
fn by_account_hides_zero_accounts_when_unfiltered() {
    let file = fixture("expenses.json");
    let v = json_of(&finreport(&["-f", &file, "--format", "json", "by-account"]));

    assert_eq!(
        v,
        json!({
            "view": "by_account",
            "account_totals": {
                "Expenses:Account1": "10",
                "Expenses:Account2": "34",
                "Expenses:Account3": "62"
            },
            "total": "106"
        })
    );
}

#[test]
fn by_month_filtered_by_months() {
    let file = fixture("expenses.json");
    let v = json_of(&finreport(&[
        "-f", &file, "--format", "json", "-m", "2", "-m", "3", "by-month",
    ]));

    assert_eq!(v["month_totals"], json!({"2": "25", "3": "28"}));
    assert_eq!(v["total"], "53");
}

#[test]
fn explicit_account_keeps_zero_rows() {
    let file = fixture("expenses.json");
    let v = json_of(&finreport(&[
        "-f", &file, "--format", "json", "-a", "Expenses:Gym", "by-account",
    ]));

    assert_eq!(v["account_totals"], json!({"Expenses:Gym": "0"}));
    assert_eq!(v["total"], "0");
}

#[test]
fn accounts_selected_by_pattern() {
    let file = fixture("expenses.json");
    let v = json_of(&finreport(&[
        "-f",
        &file,
        "--format",
        "json",
        "--account-match",
        "^Expenses:Account[23]$",
        "table",
    ]));

    assert_eq!(v["view"], "full");
    assert_eq!(v["total"]["total"], "96");
    assert_eq!(v["accounts"].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn table_on_tty_format() {
    let file = fixture("expenses.json");
    let out = finreport(&["-f", &file, "table"]);
    assert!(out.status.success());

    let text = console::strip_ansi_codes(&stdout(&out)).to_string();
    for expected in ["Jan", "Apr", "Account1", "Account3", "Total", "106"] {
        assert!(text.contains(expected), "missing {expected:?} in\n{text}");
    }
    assert!(!text.contains("Gym"));
    assert!(!text.contains("May"));
}

#[test]
fn full_depth_for_assets() {
    let file = fixture("nested.json");
    let out = finreport(&["-f", &file, "--kind", "assets", "accounts"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "[x] All\n[x] Assets:Current\n[x] Assets:Investments\n[x] Assets:Investments:Retirement\n"
    );

    let out = finreport(&["-f", &file, "--kind", "assets", "--depth", "top", "accounts"]);
    assert_eq!(
        stdout(&out),
        "[x] All\n[x] Assets:Current\n[x] Assets:Investments\n"
    );
}

#[test]
fn subtree_selection() {
    let file = fixture("nested.json");
    let v = json_of(&finreport(&[
        "-f",
        &file,
        "--kind",
        "assets",
        "--format",
        "json",
        "--under",
        "Assets:Investments",
        "by-account",
    ]));

    assert_eq!(
        v["account_totals"],
        json!({
            "Assets:Investments": "150",
            "Assets:Investments:Retirement": "10"
        })
    );
    assert_eq!(v["total"], "160");
}

#[test]
fn month_chips_follow_the_selection() {
    let file = fixture("nested.json");
    let out = finreport(&["-f", &file, "-m", "2", "months"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "[ ] All\n[ ] 1\n[x] 2\n[ ] 3\n");
}

#[test]
fn malformed_amounts() {
    let file = fixture("bad_amount.json");

    let out = finreport(&["-f", &file, "by-month"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("12,40"));

    let out = finreport(&["-f", &file, "--lenient-amounts", "--format", "json", "by-month"]);
    assert!(stderr(&out).contains("invalid amount, using zero"));
    let v = json_of(&out);
    assert_eq!(v["month_totals"], json!({"1": "10"}));
    assert_eq!(v["total"], "10");
}

#[test]
fn month_out_of_range_is_rejected() {
    let file = fixture("expenses.json");
    let out = finreport(&["-f", &file, "-m", "13", "table"]);
    assert_eq!(out.status.code(), Some(2));
}
