//! `tdl init` - create the data directory and seed default categories.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Output for `tdl init`
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub data_dir: PathBuf,
    pub categories: usize,
}

/// Run `tdl init`
///
/// Opening the app is what does the work: directory creation, the duplicate
/// repair pass, category seeding, and preference defaulting all happen in
/// `App::open`. This command exists so there is an explicit first step that
/// reports where the data lives.
pub fn run(data_dir: Option<PathBuf>, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let app = App::open(store)?;

    let data = InitOutput {
        data_dir: app.data_dir().to_path_buf(),
        categories: app.categories().len(),
    };

    let mut human = HumanOutput::new(format!("Initialized tdl in {}", data.data_dir.display()));
    human.push_summary("categories", data.categories.to_string());
    human.push_detail("add an item with: tdl add General \"Buy milk\"".to_string());

    emit_success(output, "init", &data, Some(&human))
}
