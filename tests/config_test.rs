use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn failure_script() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "kind, target, value").unwrap();
    writeln!(file, "challenge, , https://acs.example/start").unwrap();
    writeln!(file, "nav_finished, , https://issuer.example/hop").unwrap();
    writeln!(
        file,
        "nav_finished, , https://merchant.example/declined?cko-payment-token=tok_declined"
    )
    .unwrap();
    file
}

#[test]
fn test_patterns_from_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"{{"challenge": {{"success_pattern": "/approved", "failure_pattern": "/declined"}}}}"#
    )
    .unwrap();
    let script = failure_script();

    let mut cmd = Command::new(cargo_bin!("payment-form"));
    cmd.arg(script.path()).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"event":"challenge_failed","token":"tok_declined"}"#,
        ));
}

#[test]
fn test_cli_flags_override_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"{{"challenge": {{"success_pattern": "/approved", "failure_pattern": "/nothing-matches"}}}}"#
    )
    .unwrap();
    let script = failure_script();

    let mut cmd = Command::new(cargo_bin!("payment-form"));
    cmd.arg(script.path())
        .arg("--config")
        .arg(config.path())
        .arg("--failure-pattern")
        .arg("declined");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("challenge_failed"));
}

#[test]
fn test_invalid_config_file_fails() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "not json").unwrap();
    let script = failure_script();

    let mut cmd = Command::new(cargo_bin!("payment-form"));
    cmd.arg(script.path()).arg("--config").arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}
