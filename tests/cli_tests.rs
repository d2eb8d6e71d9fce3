use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, setup_test_config, setup_test_db, tp, write_config};

#[test]
fn test_init_creates_schema_and_logs() {
    let cfg = setup_test_config("cli_init");
    let db_path = setup_test_db("cli_init");

    tp(&cfg)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    // test mode never writes the config file
    assert!(!std::path::Path::new(&cfg).exists());

    tp(&cfg)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("migration_applied")));
}

#[test]
fn test_schedule_then_show_json() {
    let cfg = setup_test_config("cli_schedule");
    let db_path = setup_test_db("cli_schedule");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-10"])
        .assert()
        .success()
        .stdout(contains("2024-06-10 planned"));

    // scheduling twice is a no-op
    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-10"])
        .assert()
        .success()
        .stdout(contains("2024-06-10 is already planned"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"2024-06-10\"")
                .and(contains("\"status\": \"planned\""))
                .and(contains("\"hoursWorked\": null")),
        );
}

#[test]
fn test_done_records_hours() {
    let cfg = setup_test_config("cli_done");
    let db_path = setup_test_db("cli_done");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-11"])
        .assert()
        .success();

    tp(&cfg)
        .args([
            "--db",
            &db_path,
            "--test",
            "done",
            "2024-06-11",
            "--in",
            "09:00",
            "--out",
            "13:30",
        ])
        .assert()
        .success()
        .stdout(contains("4.50h"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"status\": \"done\"")
                .and(contains("\"startTime\": \"09:00\""))
                .and(contains("\"endTime\": \"13:30\""))
                .and(contains("\"hoursWorked\": 4.5")),
        );
}

#[test]
fn test_done_requires_planned_day() {
    let cfg = setup_test_config("cli_done_unplanned");
    let db_path = setup_test_db("cli_done_unplanned");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args([
            "--db",
            &db_path,
            "--test",
            "done",
            "2024-06-12",
            "--in",
            "09:00",
            "--out",
            "17:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid transition: unplanned → done"));
}

#[test]
fn test_done_rejects_end_before_start() {
    let cfg = setup_test_config("cli_done_backwards");
    let db_path = setup_test_db("cli_done_backwards");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-12"])
        .assert()
        .success();

    tp(&cfg)
        .args([
            "--db",
            &db_path,
            "--test",
            "done",
            "2024-06-12",
            "--in",
            "18:00",
            "--out",
            "09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("must be later than"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let cfg = setup_test_config("cli_bad_date");
    let db_path = setup_test_db("cli_bad_date");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-6-1"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_remove_with_and_without_confirmation() {
    let cfg = setup_test_config("cli_remove");
    let db_path = setup_test_db("cli_remove");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-13"])
        .assert()
        .success();

    tp(&cfg)
        .args(["--db", &db_path, "--test", "remove", "2024-06-13"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Nothing removed"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "remove", "2024-06-13", "--yes"])
        .assert()
        .success()
        .stdout(contains("2024-06-13 unplanned"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(contains("2024-06-13").not());
}

#[test]
fn test_noop_commands_leave_no_log_rows() {
    let cfg = setup_test_config("cli_noop");
    let db_path = setup_test_db("cli_noop");
    init_db(&cfg, &db_path);

    for _ in 0..2 {
        tp(&cfg)
            .args(["--db", &db_path, "--test", "schedule", "2024-06-17"])
            .assert()
            .success();
    }

    tp(&cfg)
        .args(["--db", &db_path, "--test", "remove", "2024-06-18", "--yes"])
        .assert()
        .success()
        .stdout(contains("2024-06-18 was not planned"));

    tp(&cfg)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("Day planned")
                .count(1)
                .and(contains("2024-06-18").not()),
        );
}

#[test]
fn test_note_keeps_status() {
    let cfg = setup_test_config("cli_note");
    let db_path = setup_test_db("cli_note");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "note", "2024-06-14", "too early"])
        .assert()
        .failure()
        .stderr(contains("Invalid transition"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-14"])
        .assert()
        .success();

    tp(&cfg)
        .args(["--db", &db_path, "--test", "note", "2024-06-14", "  Bring laptop  "])
        .assert()
        .success()
        .stdout(contains("Note saved"));

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"note\": \"Bring laptop\"").and(contains("\"status\": \"planned\"")),
        );

    tp(&cfg)
        .args(["--db", &db_path, "--test", "note", "2024-06-14", ""])
        .assert()
        .success()
        .stdout(contains("Note cleared"));

    tp(&cfg)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("Note updated")
                .and(contains("Note cleared"))
                .and(contains("Bring laptop").not()),
        );
}

#[test]
fn test_stats_use_configured_rate() {
    let cfg = setup_test_config("cli_stats");
    let db_path = setup_test_db("cli_stats");
    write_config(&cfg, &db_path, 20.0, "EUR");
    init_db(&cfg, &db_path);

    for date in ["2024-06-10", "2024-06-14"] {
        tp(&cfg)
            .args(["--today", "2024-06-12", "schedule", date])
            .assert()
            .success();
    }

    tp(&cfg)
        .args([
            "--today",
            "2024-06-12",
            "done",
            "2024-06-10",
            "--in",
            "09:00",
            "--out",
            "17:00",
        ])
        .assert()
        .success();

    tp(&cfg)
        .args(["--today", "2024-06-12", "stats"])
        .assert()
        .success()
        .stdout(
            contains("Week 2024-06-10 → 2024-06-16")
                .and(contains("EUR 160"))
                .and(contains("8h"))
                .and(contains("2024-06-14"))
                .and(contains("in 2 days")),
        );

    fs::remove_file(&cfg).ok();
}

#[test]
fn test_stats_without_planned_days() {
    let cfg = setup_test_config("cli_stats_empty");
    let db_path = setup_test_db("cli_stats_empty");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "--today", "2024-06-12", "stats"])
        .assert()
        .success()
        .stdout(contains("USD 0").and(contains("none planned")));
}

#[test]
fn test_show_month_table() {
    let cfg = setup_test_config("cli_show_table");
    let db_path = setup_test_db("cli_show_table");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-02-29"])
        .assert()
        .success();

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-02"])
        .assert()
        .success()
        .stdout(
            contains("February 2024")
                .and(contains("2024-02-29"))
                .and(contains("planned"))
                .and(contains("Days worked: 0")),
        );

    tp(&cfg)
        .args(["--db", &db_path, "--test", "show", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month format"));
}

#[test]
fn test_config_pay_settings() {
    let cfg = setup_test_config("cli_config");

    tp(&cfg)
        .args(["config", "--set-rate=-5"])
        .assert()
        .failure()
        .stderr(contains("Salary rate must be a non-negative number"));

    tp(&cfg)
        .args(["config", "--set-rate", "25.5", "--currency", "chf"])
        .assert()
        .success()
        .stdout(contains("CHF 25.5"));

    let written = fs::read_to_string(&cfg).expect("config written");
    assert!(written.contains("salary_rate: 25.5"));
    assert!(written.contains("currency: CHF"));

    tp(&cfg)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("currency: CHF"));

    fs::remove_file(&cfg).ok();
}

#[test]
fn test_db_info_and_check() {
    let cfg = setup_test_config("cli_db");
    let db_path = setup_test_db("cli_db");
    init_db(&cfg, &db_path);

    tp(&cfg)
        .args(["--db", &db_path, "--test", "schedule", "2024-06-03"])
        .assert()
        .success();

    tp(&cfg)
        .args(["--db", &db_path, "--test", "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(
            contains("Planned days:")
                .and(contains("2024-06-03"))
                .and(contains("Integrity check passed")),
        );
}
