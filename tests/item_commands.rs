mod support;

use predicates::str::contains;

use support::TestHome;

#[test]
fn add_creates_item_in_title_case() {
    let home = TestHome::new();
    let value = home.json(&["add", "General", "buy milk", "2% milk"]);

    assert_eq!(value["data"]["item"]["title"].as_str(), Some("Buy Milk"));
    assert_eq!(value["data"]["item"]["completed"].as_bool(), Some(false));
    assert_eq!(value["data"]["category"].as_str(), Some("General"));
}

#[test]
fn add_resolves_category_case_insensitively() {
    let home = TestHome::new();
    let value = home.json(&["add", "shopping list", "Eggs", ""]);
    assert_eq!(value["data"]["category"].as_str(), Some("Shopping List"));
}

#[test]
fn add_to_unknown_category_exits_with_user_error() {
    let home = TestHome::new();
    home.cmd()
        .args(["add", "NoSuchCategory", "t", "d"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No category named"));

    let value = home.json(&["list"]);
    assert_eq!(value["data"]["categories"].as_array().map(Vec::len), Some(0));
}

#[test]
fn done_toggles_completion_both_ways() {
    let home = TestHome::new();
    let id = home.add_item("General", "Buy Milk", "");

    let value = home.json(&["done", &id]);
    assert_eq!(value["data"]["item"]["completed"].as_bool(), Some(true));

    home.cmd()
        .args(["done", &id])
        .assert()
        .success()
        .stdout(contains("Reopened 'Buy Milk'"));
}

#[test]
fn done_with_unknown_id_exits_with_user_error() {
    let home = TestHome::new();
    home.json(&["init"]);

    home.cmd()
        .args(["done", "00000000-0000-0000-0000-000000000000"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No item with id"));
}

#[test]
fn done_with_malformed_id_exits_with_user_error() {
    let home = TestHome::new();
    home.json(&["init"]);

    home.cmd()
        .args(["done", "not-an-id"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("not a valid item id"));
}

#[test]
fn rm_deletes_the_item() {
    let home = TestHome::new();
    let id = home.add_item("General", "Buy Milk", "");

    home.cmd()
        .args(["rm", &id])
        .assert()
        .success()
        .stdout(contains("Deleted 'Buy Milk'"));

    home.cmd()
        .args(["rm", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No item with id"));
}

#[test]
fn edit_updates_fields_and_category() {
    let home = TestHome::new();
    let id = home.add_item("General", "Plan Trip", "");

    let value = home.json(&[
        "edit",
        &id,
        "--title",
        "Plan Vacation",
        "--description",
        "book flights",
        "--category",
        "Home",
    ]);
    assert_eq!(
        value["data"]["item"]["title"].as_str(),
        Some("Plan Vacation")
    );
    assert_eq!(
        value["data"]["item"]["description"].as_str(),
        Some("book flights")
    );

    let list = home.json(&["list"]);
    let categories = list["data"]["categories"].as_array().expect("categories");
    assert_eq!(categories.len(), 1);
    assert_eq!(
        categories[0]["category"]["name"].as_str(),
        Some("Home")
    );
}

#[test]
fn edit_with_no_flags_is_rejected() {
    let home = TestHome::new();
    let id = home.add_item("General", "Plan Trip", "");

    home.cmd()
        .args(["edit", &id])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("nothing to change"));
}

#[test]
fn edit_to_unknown_category_leaves_item_unchanged() {
    let home = TestHome::new();
    let id = home.add_item("General", "Plan Trip", "");

    home.cmd()
        .args(["edit", &id, "--category", "Nope"])
        .assert()
        .failure()
        .code(2);

    let list = home.json(&["list"]);
    let categories = list["data"]["categories"].as_array().expect("categories");
    assert_eq!(
        categories[0]["category"]["name"].as_str(),
        Some("General")
    );
}
