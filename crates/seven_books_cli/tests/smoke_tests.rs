//! CLI smoke tests: verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_seven_books"));
    cmd.env_remove("SEVEN_BOOKS_CONFIG")
        .env_remove("SEVEN_BOOKS_NUDGE_TIME")
        .env_remove("SEVEN_BOOKS_STORY_DEPTH")
        .env_remove("SEVEN_BOOKS_T_END")
        .env_remove("SEVEN_BOOKS_SAMPLES")
        .arg("--config")
        .arg("/tmp/nonexistent_seven_books_config_12345.toml");
    cmd
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("seven_books"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_simulate_prints_final_state() {
    let output = cli_bin()
        .args(["simulate", "--nudge-time", "25"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Final states:"));
    assert!(stdout.contains("Coherence: 0.97"), "got: {}", stdout);
}

#[test]
fn test_simulate_json_is_parseable() {
    let output = cli_bin()
        .args(["simulate", "--samples", "11", "--t-end", "1", "--json"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["times"].as_array().unwrap().len(), 11);
    assert_eq!(value["states"][0][0], 0.2);
}

#[test]
fn test_compare_lists_every_scenario() {
    let output = cli_bin().arg("compare").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["No Intervention", "Early (t=10)", "Right Timing (t=25)", "Late (t=40)"] {
        assert!(stdout.contains(name), "missing {} in: {}", name, stdout);
    }
}

#[test]
fn test_derive_reference_state() {
    let output = cli_bin()
        .args(["derive", "--state", "0.2,0.1,0.15,0.6"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("d_dwelling/dt = 0.054700000000"), "got: {}", stdout);
}

#[test]
fn test_derive_rejects_wrong_shape() {
    let output = cli_bin()
        .args(["derive", "--state", "0.2,0.1,0.15"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("4 components"), "got: {}", stderr);
}

#[test]
fn test_malformed_config_fails_instead_of_using_defaults() {
    let path = std::env::temp_dir().join(format!(
        "seven_books_bad_config_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "[model]\ndecay_relief = \"oops\"\nstory_depth = 0.0\n")
        .expect("failed to write config");

    let output = Command::new(env!("CARGO_BIN_EXE_seven_books"))
        .env_remove("SEVEN_BOOKS_CONFIG")
        .arg("--config")
        .arg(&path)
        .args(["derive", "--state", "0.2,0.1,0.15,0.6"])
        .output()
        .expect("failed to run");
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("d_dwelling/dt"), "got: {}", stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse TOML config"), "got: {}", stderr);
}
