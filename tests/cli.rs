use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cashflow(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cashflow").unwrap();
    cmd.env("CASHFLOW_CLI_DATA_DIR", data_dir.path())
        .env_remove("CASHFLOW_LOG");
    cmd
}

const RECORDS: &str = r#"[
    {"timestamp": "2024-03-05", "income": 1000, "expenses": 500, "maintenance": "100"},
    {"timestamp": "2024-03-20", "income": "200.00"},
    {"timestamp": "2024-01-10", "income": 50, "expenses": 75},
    {"income": 999},
    {"timestamp": "not-a-date", "income": 999}
]"#;

#[test]
fn report_from_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("records.json");
    std::fs::write(&input, RECORDS).unwrap();

    cashflow(&dir)
        .args(["report", "--period", "ytd", "--as-of", "2024-03-15", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mar 2024"))
        .stdout(predicate::str::contains("$1200.00"))
        .stdout(predicate::str::contains("$600.00"))
        .stdout(predicate::str::contains("-$25.00"))
        .stdout(predicate::str::contains("2 record(s) not included"))
        .stdout(predicate::str::contains("Apr 2024").not());
}

#[test]
fn export_json_shape() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("records.json");
    std::fs::write(&input, RECORDS).unwrap();

    let output = cashflow(&dir)
        .args(["export", "--period", "12m", "--as-of", "2024-03-15", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let months = value["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0]["date"], "2024-03-01");
    assert_eq!(months[0]["monthLabel"], "Mar 2024");
    assert_eq!(months[0]["netIncome"], 600.0);
    assert_eq!(months[11]["date"], "2023-04-01");
    assert_eq!(value["period"]["type"], "12m");
}

#[test]
fn record_add_then_report() {
    let dir = TempDir::new().unwrap();

    cashflow(&dir).arg("init").assert().success();
    cashflow(&dir)
        .args([
            "record",
            "add",
            "2024-02-14",
            "--income",
            "1500",
            "--expenses",
            "300.50",
            "--property",
            "Elm St",
        ])
        .assert()
        .success();

    cashflow(&dir)
        .args(["record", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-14"))
        .stdout(predicate::str::contains("Elm St"));

    cashflow(&dir)
        .args(["report", "--as-of", "2024-03-15", "--property", "elm st", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Property: elm st"))
        .stdout(predicate::str::contains("$1199.50"));
}

#[test]
fn import_csv_then_export_records() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("ledger.csv");
    std::fs::write(
        &csv,
        "Date,Rent Income,Expenses,Maintenance\n2024-01-05,1000,200,50\n02/05/2024,1000,,\nsoon,1,1,1\n",
    )
    .unwrap();

    cashflow(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Records parsed:  2"))
        .stdout(predicate::str::contains("row 3"));

    cashflow(&dir)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05,,1000.00,200.00,50.00"))
        .stdout(predicate::str::contains("2024-02-05,,1000.00,0.00,0.00"));
}

#[test]
fn range_without_custom_is_rejected() {
    let dir = TempDir::new().unwrap();

    cashflow(&dir)
        .args(["report", "--period", "12m", "--from", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--period custom"));
}

#[test]
fn custom_range_window() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("records.json");
    std::fs::write(&input, RECORDS).unwrap();

    let output = cashflow(&dir)
        .args([
            "export",
            "--period",
            "custom",
            "--from",
            "2024-01-01",
            "--to",
            "2024-02-01",
            "--as-of",
            "2024-03-15",
            "--input",
        ])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let labels: Vec<&str> = value["months"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["monthLabel"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Mar 2024", "Feb 2024"]);
}
