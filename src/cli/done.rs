//! `tdl done` - toggle an item's completion flag.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::{Item, ItemId};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Options for `tdl done`
pub struct DoneOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub output: OutputOptions,
}

/// Output for `tdl done`
#[derive(Debug, Serialize)]
pub struct DoneOutput {
    pub item: Item,
}

/// Run `tdl done`
pub fn run(opts: DoneOptions) -> Result<()> {
    let store = Store::locate(opts.data_dir)?;
    let mut app = App::open(store)?;

    let id: ItemId = opts.id.parse()?;
    let item = app.toggle_completion(id)?;

    let header = if item.completed {
        format!("Completed '{}'", item.title)
    } else {
        format!("Reopened '{}'", item.title)
    };
    let human = HumanOutput::new(header);

    let data = DoneOutput { item };
    emit_success(opts.output, "done", &data, Some(&human))
}
