//! `tdl add` - add an item to a category.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::Item;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `tdl add`
pub struct AddOptions {
    pub category: String,
    pub title: String,
    pub description: String,
    pub data_dir: Option<PathBuf>,
    pub output: OutputOptions,
}

/// Output for `tdl add`
#[derive(Debug, Serialize)]
pub struct AddOutput {
    pub item: Item,
    pub category: String,
}

/// Run `tdl add`
pub fn run(opts: AddOptions) -> Result<()> {
    let store = Store::locate(opts.data_dir)?;
    let mut app = App::open(store)?;

    let item = app.add_item(&opts.category, &opts.title, &opts.description)?;

    let category = app
        .categories()
        .iter()
        .find(|category| category.id == item.category_id)
        .map(|category| category.name.clone())
        .unwrap_or_default();

    let mut human = HumanOutput::new(format!("Added '{}' to {}", item.title, category));
    human.push_summary("id", item.id.to_string());

    let data = AddOutput { item, category };
    emit_success(opts.output, "add", &data, Some(&human))
}
