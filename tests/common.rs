#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, pointed at a config file that does not exist yet so
/// the user's real configuration is never read.
pub fn tp(config: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("timepay");
    cmd.env("TIMEPAY_CONFIG", config).env_remove("RUST_LOG");
    cmd
}

fn temp_path(name: &str, suffix: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timepay.{}", name, suffix));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    temp_path(name, "sqlite")
}

/// Fresh config file path for `name` (not created)
pub fn setup_test_config(name: &str) -> String {
    temp_path(name, "conf")
}

/// Write a config file with the given pay settings
pub fn write_config(path: &str, db_path: &str, rate: f64, currency: &str) {
    let yaml = format!(
        "database: {}\nsalary_rate: {}\ncurrency: {}\nlog_level: warn\n",
        db_path, rate, currency
    );
    fs::write(path, yaml).expect("write config");
}

/// Initialize the schema of `db_path` in test mode
pub fn init_db(config: &str, db_path: &str) {
    tp(config)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
