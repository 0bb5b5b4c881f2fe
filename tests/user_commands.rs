mod support;

use predicates::str::contains;

use support::TestHome;

#[test]
fn username_defaults_to_anonymous() {
    let home = TestHome::new();
    let value = home.json(&["user", "show"]);
    assert_eq!(value["data"]["username"].as_str(), Some("Anonymous"));
}

#[test]
fn user_set_persists_and_marks_new_items() {
    let home = TestHome::new();
    home.json(&["user", "set", "Larry"]);

    let value = home.json(&["user", "show"]);
    assert_eq!(value["data"]["username"].as_str(), Some("Larry"));

    let added = home.json(&["add", "General", "Buy Milk", ""]);
    assert_eq!(
        added["data"]["item"]["created_by"].as_str(),
        Some("Larry")
    );
}

#[test]
fn empty_username_is_rejected() {
    let home = TestHome::new();
    home.cmd()
        .args(["user", "set", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("username cannot be empty"));
}

#[test]
fn config_default_username_applies_before_first_set() {
    let home = TestHome::new();
    home.write_config("[user]\ndefault = \"Homer\"");

    let value = home.json(&["user", "show"]);
    assert_eq!(value["data"]["username"].as_str(), Some("Homer"));

    // An explicit set still wins afterwards
    home.json(&["user", "set", "Marge"]);
    let value = home.json(&["user", "show"]);
    assert_eq!(value["data"]["username"].as_str(), Some("Marge"));
}

#[test]
fn seed_categories_can_be_configured() {
    let home = TestHome::new();
    home.write_config("[seed]\ncategories = [\"Work\", \"Play\"]");

    let value = home.json(&["category", "list"]);
    let names: Vec<&str> = value["data"]["categories"]
        .as_array()
        .expect("categories")
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Work", "Play"]);
}
