//! Tests for `cobble status`

use super::common::TestHome;
use predicates::prelude::*;

#[test]
fn test_status_fresh_home() {
    let home = TestHome::new();

    home.assert_command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local release: v0.0.0-alpha"))
        .stdout(predicate::str::contains("(none downloaded)"));
}

#[test]
fn test_status_shows_recorded_release_and_package() {
    let home = TestHome::new();
    home.write_state("1.3", "rc");
    std::fs::create_dir_all(home.work_dir()).unwrap();
    std::fs::write(home.work_dir().join("PebbleWuff.appx"), "appx").unwrap();

    home.assert_command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local release: v1.3-rc"))
        .stdout(predicate::str::contains("PebbleWuff.appx"));
}

#[test]
fn test_status_reports_missing_tool() {
    let home = TestHome::new();
    home.write_config(&format!(
        "deploy_tool: {}\n",
        home.path().join("missing.exe").display()
    ));

    home.assert_command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy tool:   not found"));
}
