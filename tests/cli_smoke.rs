mod support;

use predicates::str::contains;

use support::TestHome;

#[test]
fn help_lists_commands() {
    let home = TestHome::new();
    home.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("list"))
        .stdout(contains("category"));
}

#[test]
fn init_reports_data_dir_and_seeded_categories() {
    let home = TestHome::new();

    home.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialized tdl"))
        .stdout(contains("categories: 7"));

    assert!(home.path().join("categories.json").exists());
    assert!(home.path().join("items.json").exists());
}

#[test]
fn init_json_envelope_has_schema_version() {
    let home = TestHome::new();
    let value = home.json(&["init"]);

    assert_eq!(value["schema_version"].as_str(), Some("tdl.v1"));
    assert_eq!(value["command"].as_str(), Some("init"));
    assert_eq!(value["status"].as_str(), Some("success"));
    assert_eq!(value["data"]["categories"].as_u64(), Some(7));
}

#[test]
fn quiet_suppresses_human_output() {
    let home = TestHome::new();
    home.cmd()
        .args(["init", "--quiet"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

#[test]
fn list_on_fresh_store_reports_empty_state() {
    let home = TestHome::new();
    home.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No items yet"));
}
