mod support;

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("first-filings").expect("binary built")
}

#[test]
fn categories_lists_default_table() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .current_dir(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exchange: bse"))
        .stdout(predicate::str::contains("Analyst Call Intimation"))
        .stdout(predicate::str::contains("subcategories: Investor Presentation, General"));
}

#[test]
fn exchange_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .current_dir(dir.path())
        .args(["categories", "--exchange", "nse"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Exchange: nse"));
}

#[test]
fn categories_from_config_file() {
    let (_dir, path) = support::config::write_temp_config(
        "[[categories]]\nlabel = \"Buyback\"\nsubcategories = [\"Buy back\"]\n",
    );

    cli()
        .arg("--config")
        .arg(&path)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buyback"))
        .stdout(predicate::str::contains("keywords:      (none)"))
        .stdout(predicate::str::contains("PPT").not());
}

#[test]
fn missing_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("categories")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let (_dir, path) = support::config::write_temp_config("[retry]\nmultiplier = 0.5\n");

    cli()
        .arg("--config")
        .arg(&path)
        .arg("categories")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("retry.multiplier"));
}

#[test]
fn check_with_unknown_category_fails_before_network() {
    let (_dir, path) = support::config::write_temp_config(&support::config::bse_config_toml(
        "http://127.0.0.1:9",
    ));

    cli()
        .arg("--config")
        .arg(&path)
        .args(["check", "--scrip", "500001", "--category", "Dividend", "--date", "01-01-2023"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown category label: Dividend"));
}

#[test]
fn scan_with_unknown_category_fails_before_network() {
    let (dir, path) = support::config::write_temp_config(&support::config::bse_config_toml(
        "http://127.0.0.1:9",
    ));

    cli()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["scan", "--date", "2023-01-01", "--category", "Dividend"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("first_filings_archive.json").exists());
}

#[test]
fn invalid_date_rejected_by_parser() {
    cli()
        .args(["scan", "--date", "2023/01/01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected DD-MM-YYYY or YYYY-MM-DD"));
}
