//! `tdl rm` - delete an item.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::{Item, ItemId};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `tdl rm`
pub struct RmOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub output: OutputOptions,
}

/// Output for `tdl rm`
#[derive(Debug, Serialize)]
pub struct RmOutput {
    pub item: Item,
}

/// Run `tdl rm`
pub fn run(opts: RmOptions) -> Result<()> {
    let store = Store::locate(opts.data_dir)?;
    let mut app = App::open(store)?;

    let id: ItemId = opts.id.parse()?;
    let item = app.delete_item(id)?;

    let human = HumanOutput::new(format!("Deleted '{}'", item.title));

    let data = RmOutput { item };
    emit_success(opts.output, "rm", &data, Some(&human))
}
