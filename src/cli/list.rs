//! `tdl list` - show the to-do list grouped by category.
//!
//! Passing `--filter` or `--order` persists the choice for later runs.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::{FilterMode, SortOrder};
use crate::output::{emit_success, OutputOptions};
use crate::store::Store;
use crate::view::PopulatedCategory;

/// Options for `tdl list`
pub struct ListOptions {
    pub filter: Option<String>,
    pub order: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub output: OutputOptions,
}

/// Output for `tdl list`
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub username: String,
    pub filter: FilterMode,
    pub order: SortOrder,
    pub is_filtered: bool,
    pub categories: Vec<PopulatedCategory>,
}

/// Run `tdl list`
pub fn run(opts: ListOptions) -> Result<()> {
    let store = Store::locate(opts.data_dir)?;
    let mut app = App::open(store)?;

    // Explicit flags become the new persisted preference; an omitted flag
    // keeps its current value.
    if opts.filter.is_some() || opts.order.is_some() {
        let filter = match &opts.filter {
            Some(raw) => raw.parse::<FilterMode>()?,
            None => app.filter(),
        };
        let order = match &opts.order {
            Some(raw) => raw.parse::<SortOrder>()?,
            None => app.order(),
        };
        app.set_filter_preference(filter, order)?;
    }

    let data = ListOutput {
        username: app.username().to_string(),
        filter: app.filter(),
        order: app.order(),
        is_filtered: app.is_filtered(),
        categories: app.populated().to_vec(),
    };

    if opts.output.json {
        return emit_success(opts.output, "list", &data, None);
    }

    if !opts.output.quiet {
        print_list(&data);
    }

    Ok(())
}

fn print_list(data: &ListOutput) {
    println!(
        "To-do list for {} (filter: {}, order: {})",
        data.username, data.filter, data.order
    );

    let total: usize = data
        .categories
        .iter()
        .map(|populated| populated.items.len())
        .sum();

    if total == 0 {
        println!();
        if data.is_filtered {
            println!("No items match the current filter.");
        } else {
            println!("No items yet. Add one with: tdl add General \"Buy milk\"");
        }
        return;
    }

    for populated in &data.categories {
        println!();
        println!("{}:", populated.category.name);
        if populated.items.is_empty() {
            println!("  (all items hidden by the current filter)");
            continue;
        }
        for item in &populated.items {
            let mark = if item.completed { "x" } else { " " };
            if item.description.is_empty() {
                println!("  [{}] {}", mark, item.title);
            } else {
                println!("  [{}] {} - {}", mark, item.title, item.description);
            }
            println!("      id: {}", item.id);
        }
    }
}
