//! Persistent store for tdl entities
//!
//! All state lives in a single data directory:
//!
//! ```text
//! <data-dir>/
//!   categories.json   # category registry
//!   items.json        # item registry
//!   prefs.json        # key-value preferences (see `prefs`)
//!   store.lock        # cross-process write lock
//!   tdl.toml          # optional configuration (see `config`)
//! ```
//!
//! The store owns entity identity and durability: `create_*` assigns ids and
//! timestamps, and every write either lands fully or not at all (atomic
//! rename under an exclusive lock). Callers get no partial effects to clean
//! up after.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::{Category, CategoryId, Item, ItemId};

const CATEGORIES_FILE: &str = "categories.json";
const ITEMS_FILE: &str = "items.json";
const PREFS_FILE: &str = "prefs.json";
const LOCK_FILE: &str = "store.lock";
const CONFIG_FILE: &str = "tdl.toml";

/// On-disk category registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRegistry {
    pub categories: Vec<Category>,
}

/// On-disk item registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRegistry {
    pub items: Vec<Item>,
}

/// Store manager for the tdl data directory
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Create a store manager over an explicit data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory and open the store there.
    ///
    /// Resolution order:
    /// 1) explicit override (CLI `--data-dir` / `TDL_DATA_DIR`)
    /// 2) the platform data directory for tdl
    pub fn locate(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }

        let dirs = ProjectDirs::from("com", "tdl", "tdl").ok_or_else(|| {
            Error::OperationFailed("could not determine a data directory for tdl".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    /// The store's data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the category registry
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir.join(CATEGORIES_FILE)
    }

    /// Path to the item registry
    pub fn items_file(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE)
    }

    /// Path to the preferences file
    pub fn prefs_file(&self) -> PathBuf {
        self.data_dir.join(PREFS_FILE)
    }

    /// Path to the optional configuration file
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub(crate) fn lock_file(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE)
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Create the data directory and empty registries if absent
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let categories = self.categories_file();
        if !categories.exists() {
            self.write_json(&categories, &CategoryRegistry::default())?;
        }

        let items = self.items_file();
        if !items.exists() {
            self.write_json(&items, &ItemRegistry::default())?;
        }

        Ok(())
    }

    /// Check whether the store has been initialized
    pub fn is_initialized(&self) -> bool {
        self.categories_file().exists()
    }

    // =========================================================================
    // File I/O helpers (atomic writes for safety)
    // =========================================================================

    /// Write JSON data atomically (write to temp, then rename)
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        lock::write_atomic_str(path, &json)
    }

    /// Read JSON data from a file, or its default when the file is absent
    pub fn read_json_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Run a read-modify-write cycle on a registry file under the store lock
    fn update_registry<T, R, F>(&self, path: &Path, apply: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(self.lock_file(), DEFAULT_LOCK_TIMEOUT_MS)?;
        let mut registry: T = self.read_json_or_default(path)?;
        let result = apply(&mut registry)?;
        self.write_json(path, &registry)?;
        Ok(result)
    }

    // =========================================================================
    // Category repository
    // =========================================================================

    /// List all categories in creation order
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let registry: CategoryRegistry = self.read_json_or_default(&self.categories_file())?;
        Ok(registry.categories)
    }

    /// Find a category by exact name
    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .list_categories()?
            .into_iter()
            .find(|category| category.name == name))
    }

    /// Create a category; the store assigns id and timestamps
    pub fn create_category(&self, name: &str, created_by: &str) -> Result<Category> {
        let category = Category::new(name, created_by, Utc::now());
        tracing::debug!(name = %category.name, id = %category.id, "creating category");

        let created = category.clone();
        self.update_registry(
            &self.categories_file(),
            |registry: &mut CategoryRegistry| {
                registry.categories.push(category);
                Ok(())
            },
        )?;
        Ok(created)
    }

    /// Apply a mutation to a category; fails if the id does not resolve
    pub fn update_category<F>(&self, id: CategoryId, mutate: F) -> Result<Category>
    where
        F: FnOnce(&mut Category),
    {
        self.update_registry(
            &self.categories_file(),
            |registry: &mut CategoryRegistry| {
                let category = registry
                    .categories
                    .iter_mut()
                    .find(|category| category.id == id)
                    .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;
                mutate(category);
                Ok(category.clone())
            },
        )
    }

    /// Delete a category by id; fails if the id does not resolve
    pub fn delete_category(&self, id: CategoryId) -> Result<Category> {
        self.update_registry(
            &self.categories_file(),
            |registry: &mut CategoryRegistry| {
                let index = registry
                    .categories
                    .iter()
                    .position(|category| category.id == id)
                    .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;
                Ok(registry.categories.remove(index))
            },
        )
    }

    // =========================================================================
    // Item repository
    // =========================================================================

    /// List all items in creation order
    pub fn list_items(&self) -> Result<Vec<Item>> {
        let registry: ItemRegistry = self.read_json_or_default(&self.items_file())?;
        Ok(registry.items)
    }

    /// Find an item by id
    pub fn find_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.list_items()?.into_iter().find(|item| item.id == id))
    }

    /// Create an item; the store assigns id and timestamps
    pub fn create_item(
        &self,
        category_id: CategoryId,
        title: &str,
        description: &str,
        created_by: &str,
    ) -> Result<Item> {
        let item = Item::new(category_id, title, description, created_by, Utc::now());
        tracing::debug!(title = %item.title, id = %item.id, "creating item");

        let created = item.clone();
        self.update_registry(&self.items_file(), |registry: &mut ItemRegistry| {
            registry.items.push(item);
            Ok(())
        })?;
        Ok(created)
    }

    /// Apply a mutation to an item; fails if the id does not resolve
    pub fn update_item<F>(&self, id: ItemId, mutate: F) -> Result<Item>
    where
        F: FnOnce(&mut Item),
    {
        self.update_registry(&self.items_file(), |registry: &mut ItemRegistry| {
            let item = registry
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
            mutate(item);
            Ok(item.clone())
        })
    }

    /// Delete an item by id; fails if the id does not resolve
    pub fn delete_item(&self, id: ItemId) -> Result<Item> {
        self.update_registry(&self.items_file(), |registry: &mut ItemRegistry| {
            let index = registry
                .items
                .iter()
                .position(|item| item.id == id)
                .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
            Ok(registry.items.remove(index))
        })
    }
}
