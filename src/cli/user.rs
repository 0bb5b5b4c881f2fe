//! Username preference commands
//!
//! Implements `tdl user set` and `tdl user show`.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Output for `tdl user set` and `tdl user show`
#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub username: String,
}

/// Run `tdl user set`
pub fn run_set(data_dir: Option<PathBuf>, name: String, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let mut app = App::open(store)?;

    app.set_username(&name)?;

    let data = UserOutput {
        username: app.username().to_string(),
    };
    let human = HumanOutput::new(format!("Username set to '{}'", data.username));
    emit_success(output, "user set", &data, Some(&human))
}

/// Run `tdl user show`
pub fn run_show(data_dir: Option<PathBuf>, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let app = App::open(store)?;

    let data = UserOutput {
        username: app.username().to_string(),
    };
    let human = HumanOutput::new(format!("Username: {}", data.username));
    emit_success(output, "user show", &data, Some(&human))
}
