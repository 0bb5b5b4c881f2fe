//! Category management commands
//!
//! Implements `tdl category add`, `tdl category list`, `tdl category rm`.

use std::path::PathBuf;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::Category;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Store;

/// Output for `tdl category add`
#[derive(Debug, Serialize)]
pub struct AddOutput {
    pub name: String,
    pub created: bool,
}

/// Run `tdl category add`
///
/// Adding an existing name is a no-op, reported as a warning rather than an
/// error.
pub fn run_add(data_dir: Option<PathBuf>, name: String, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let mut app = App::open(store)?;

    let created = app.add_category(&name)?;

    let data = match created {
        Some(category) => AddOutput {
            name: category.name,
            created: true,
        },
        None => AddOutput {
            name: crate::model::title_case(&name),
            created: false,
        },
    };

    let mut human = if data.created {
        HumanOutput::new(format!("Added category '{}'", data.name))
    } else {
        HumanOutput::new(format!("Category '{}' already exists", data.name))
    };
    if !data.created {
        human.push_warning("nothing to do: the category was already there");
    }

    emit_success(output, "category add", &data, Some(&human))
}

/// One row of `tdl category list`
#[derive(Debug, Serialize)]
pub struct CategoryRow {
    #[serde(flatten)]
    pub category: Category,
    pub items: usize,
}

/// Output for `tdl category list`
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub categories: Vec<CategoryRow>,
}

/// Run `tdl category list`
pub fn run_list(data_dir: Option<PathBuf>, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let app = App::open(store)?;

    let rows: Vec<CategoryRow> = app
        .categories()
        .iter()
        .map(|category| CategoryRow {
            category: category.clone(),
            items: app
                .items()
                .iter()
                .filter(|item| item.category_id == category.id)
                .count(),
        })
        .collect();

    let mut human = HumanOutput::new(format!("{} categories", rows.len()));
    for row in &rows {
        human.push_detail(format!(
            "{} ({} item{})",
            row.category.name,
            row.items,
            if row.items == 1 { "" } else { "s" }
        ));
    }

    let data = ListOutput { categories: rows };
    emit_success(output, "category list", &data, Some(&human))
}

/// Output for `tdl category rm`
#[derive(Debug, Serialize)]
pub struct RmOutput {
    pub category: Category,
}

/// Run `tdl category rm`
pub fn run_rm(data_dir: Option<PathBuf>, name: String, output: OutputOptions) -> Result<()> {
    let store = Store::locate(data_dir)?;
    let mut app = App::open(store)?;

    let category = app.delete_category(&name)?;

    let human = HumanOutput::new(format!("Removed category '{}'", category.name));

    let data = RmOutput { category };
    emit_success(output, "category rm", &data, Some(&human))
}
