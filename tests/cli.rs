use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn pinnacle(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pinnacle").unwrap();
    cmd.env("PINNACLE_DATA_DIR", data_dir);
    cmd
}

fn seeded_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    pinnacle(dir.path()).arg("init").assert().success();
    pinnacle(dir.path()).arg("demo").assert().success();
    dir
}

#[test]
fn test_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    pinnacle(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Warehouse ready"));
    assert!(dir.path().join("pinnacle.db").exists());
}

#[test]
fn test_demo_then_status() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shipped orders"));
}

#[test]
fn test_list_employees() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["list", "employees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jennings"));
}

#[test]
fn test_list_cities_depends_on_country() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["list", "cities", "--country", "France"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nantes").and(predicate::str::contains("Lyon")));
    pinnacle(dir.path())
        .args(["list", "cities", "--country", "Atlantis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No customer cities"));
}

#[test]
fn test_employee_report_monthly() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["report", "employee", "--name", "Leslie Jennings"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Month")
                .and(predicate::str::contains("Leslie"))
                .and(predicate::str::contains("$")),
        );
}

#[test]
fn test_product_line_report_quarterly() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args([
            "report",
            "product-line",
            "--line",
            "Classic Cars",
            "--grain",
            "quarterly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quarter").and(predicate::str::contains("Classic Cars")));
}

#[test]
fn test_location_report() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args([
            "report", "location", "--country", "USA", "--city", "NYC", "--grain", "monthly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("NYC"));
}

#[test]
fn test_unknown_employee_fails() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["report", "employee", "--name", "Nobody Here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown employee"));
}

#[test]
fn test_missing_selection_fails() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["report", "employee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing selected"));
}

#[test]
fn test_bad_grain_fails() {
    let dir = seeded_dir();
    pinnacle(dir.path())
        .args(["report", "employee", "--name", "Leslie Jennings", "--grain", "weekly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown grain"));
}

#[test]
fn test_csv_export() {
    let dir = seeded_dir();
    let out = dir.path().join("classic-cars.csv");
    pinnacle(dir.path())
        .args([
            "export",
            "product-line",
            "--line",
            "Classic Cars",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = std::fs::read_to_string(&out).unwrap();
    let header = content.lines().next().unwrap();
    assert!(header.contains("Total Sales"));
    assert!(header.contains("Month"));
    assert!(content.contains("Classic Cars"));
}

#[test]
fn test_report_output_flag_implies_export() {
    let dir = seeded_dir();
    let out = dir.path().join("revenue.csv");
    pinnacle(dir.path())
        .args([
            "report",
            "employee",
            "--name",
            "Leslie Jennings",
            "--grain",
            "quarterly",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();
    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.lines().next().unwrap().contains("Quarter"));
}
