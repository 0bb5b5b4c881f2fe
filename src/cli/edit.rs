//! `tdl edit` - update an item's title, description, or category.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::{Error, Result};
use crate::model::{Item, ItemId};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `tdl edit`
pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub output: OutputOptions,
}

/// Output for `tdl edit`
#[derive(Debug, Serialize)]
pub struct EditOutput {
    pub item: Item,
}

/// Run `tdl edit`
pub fn run(opts: EditOptions) -> Result<()> {
    if opts.title.is_none() && opts.description.is_none() && opts.category.is_none() {
        return Err(Error::InvalidArgument(
            "nothing to change: pass --title, --description, or --category".to_string(),
        ));
    }

    let store = Store::locate(opts.data_dir)?;
    let mut app = App::open(store)?;

    let id: ItemId = opts.id.parse()?;
    let item = app.update_item(
        id,
        opts.title.as_deref(),
        opts.description.as_deref(),
        opts.category.as_deref(),
    )?;

    let human = HumanOutput::new(format!("Updated '{}'", item.title));

    let data = EditOutput { item };
    emit_success(opts.output, "edit", &data, Some(&human))
}
