use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_cage_and_underflow_flags() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("keno").expect("keno binary");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cage"))
        .stdout(predicate::str::contains("--underflow"))
        .stdout(predicate::str::contains("zero-fill"));
}

#[test]
fn zero_capacity_cage_exits_with_config_error() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("keno").expect("keno binary");
    cmd.args(["--cage", "0", "--listen", "127.0.0.1:0"])
        .env_remove("RUST_LOG")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid cage configuration"));
}

#[test]
fn hit_frequency_without_a_blade_period_exits_with_config_error() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("keno").expect("keno binary");
    cmd.args(["--hit-frequency", "2000000000", "--listen", "127.0.0.1:0"])
        .env_remove("RUST_LOG")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds 1000000000 per second"));
}
