//! Application state controller
//!
//! `App` is the single source of truth for what a caller displays. Every
//! mutation runs as one synchronous sequence: persist through the store,
//! reload the authoritative lists, recompute the display projections. When
//! the store write fails, the reload/recompute step is skipped so the
//! published state never drifts from what is actually on disk.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{
    title_case, Category, FilterMode, Item, ItemId, SortOrder, SYSTEM_CREATOR,
};
use crate::prefs::{self, FILTER_MODE_KEY, SORT_ORDER_KEY, USER_NAME_KEY};
use crate::store::Store;
use crate::view::{self, PopulatedCategory};

/// In-memory session state over the store.
///
/// Not designed for concurrent mutation: one `App` per session, operations
/// complete (including their recompute step) before the next begins.
pub struct App {
    store: Store,
    items: Vec<Item>,
    categories: Vec<Category>,
    visible: Vec<Item>,
    populated: Vec<PopulatedCategory>,
    username: String,
    filter: FilterMode,
    order: SortOrder,
    is_filtered: bool,
}

impl App {
    /// Open the store, run first-run seeding and the duplicate-category
    /// repair pass, load preferences, and build the initial projections.
    pub fn open(store: Store) -> Result<Self> {
        store.init()?;
        let config = Config::load_from_dir(store.data_dir());

        remove_duplicate_empty_categories(&store)?;
        seed_default_categories(&store, &config)?;

        let username = prefs::get_or_init(&store, USER_NAME_KEY, &config.user.default)?;
        let filter = load_pref_enum(&store, FILTER_MODE_KEY, FilterMode::default())?;
        let order = load_pref_enum(&store, SORT_ORDER_KEY, SortOrder::default())?;

        let mut app = Self {
            store,
            items: Vec::new(),
            categories: Vec::new(),
            visible: Vec::new(),
            populated: Vec::new(),
            username,
            filter,
            order,
            is_filtered: false,
        };
        app.reload()?;
        Ok(app)
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// The store's data directory
    pub fn data_dir(&self) -> &std::path::Path {
        self.store.data_dir()
    }

    /// All items, unfiltered, in creation order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All categories in creation order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The current filtered, sorted item list
    pub fn visible_items(&self) -> &[Item] {
        &self.visible
    }

    /// The current grouped-category projection
    pub fn populated(&self) -> &[PopulatedCategory] {
        &self.populated
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// True when the visible list is shaped by an active filter
    pub fn is_filtered(&self) -> bool {
        self.is_filtered
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a category, normalizing the name to title case.
    ///
    /// Returns `Ok(None)` without touching the store when the name already
    /// exists; duplicates are a no-op, not an error.
    pub fn add_category(&mut self, name: &str) -> Result<Option<Category>> {
        let name = title_case(name);
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "category name cannot be empty".to_string(),
            ));
        }

        if self.store.find_category_by_name(&name)?.is_some() {
            debug!(%name, "category already exists, skipping");
            return Ok(None);
        }

        let created = self.store.create_category(&name, &self.username)?;
        self.reload()?;
        Ok(Some(created))
    }

    /// Add an item to the named category.
    ///
    /// The title is normalized to title case; the item starts not-completed
    /// with both timestamps set to now.
    pub fn add_item(&mut self, category_name: &str, title: &str, description: &str) -> Result<Item> {
        let category = self.resolve_category(category_name)?;
        let title = title_case(title);
        if title.is_empty() {
            return Err(Error::InvalidArgument(
                "item title cannot be empty".to_string(),
            ));
        }

        let created = self
            .store
            .create_item(category.id, &title, description, &self.username)?;
        self.reload()?;
        Ok(created)
    }

    /// Delete an item by id
    pub fn delete_item(&mut self, id: ItemId) -> Result<Item> {
        let deleted = self.store.delete_item(id)?;
        self.reload()?;
        Ok(deleted)
    }

    /// Flip an item's completion flag, advancing its last-updated timestamp
    pub fn toggle_completion(&mut self, id: ItemId) -> Result<Item> {
        let toggled = self.store.update_item(id, |item| {
            item.completed = !item.completed;
            item.last_updated = Utc::now();
        })?;
        self.reload()?;
        Ok(toggled)
    }

    /// Update an item's title, description, and owning category
    pub fn update_item(
        &mut self,
        id: ItemId,
        title: Option<&str>,
        description: Option<&str>,
        category_name: Option<&str>,
    ) -> Result<Item> {
        let category_id = match category_name {
            Some(name) => Some(self.resolve_category(name)?.id),
            None => None,
        };

        let updated = self.store.update_item(id, |item| {
            if let Some(title) = title {
                item.title = title.to_string();
            }
            if let Some(description) = description {
                item.description = description.to_string();
            }
            if let Some(category_id) = category_id {
                item.category_id = category_id;
            }
            item.last_updated = Utc::now();
        })?;
        self.reload()?;
        Ok(updated)
    }

    /// Delete a category by name.
    ///
    /// Refuses when the category still has items; deletion never cascades.
    pub fn delete_category(&mut self, name: &str) -> Result<Category> {
        let category = self.resolve_category(name)?;
        let items = self
            .items
            .iter()
            .filter(|item| item.category_id == category.id)
            .count();
        if items > 0 {
            return Err(Error::CategoryNotEmpty {
                name: category.name,
                items,
            });
        }

        let deleted = self.store.delete_category(category.id)?;
        self.reload()?;
        Ok(deleted)
    }

    /// Persist the filter and sort preference, then recompute projections
    pub fn set_filter_preference(&mut self, filter: FilterMode, order: SortOrder) -> Result<()> {
        prefs::set_string(&self.store, FILTER_MODE_KEY, filter.as_str())?;
        prefs::set_string(&self.store, SORT_ORDER_KEY, order.as_str())?;
        self.filter = filter;
        self.order = order;
        self.recompute();
        Ok(())
    }

    /// Persist the display username; future items record it as creator
    pub fn set_username(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "username cannot be empty".to_string(),
            ));
        }

        prefs::set_string(&self.store, USER_NAME_KEY, name)?;
        self.username = name.to_string();
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Resolve a category by name, after title-case normalization
    fn resolve_category(&self, name: &str) -> Result<Category> {
        let name = title_case(name);
        self.store
            .find_category_by_name(&name)?
            .ok_or(Error::CategoryNotFound(name))
    }

    /// Reload the authoritative lists from the store and recompute
    fn reload(&mut self) -> Result<()> {
        self.items = self.store.list_items()?;
        self.categories = self.store.list_categories()?;
        self.recompute();
        Ok(())
    }

    /// Rebuild the display projections from the in-memory lists
    fn recompute(&mut self) {
        let filtered = view::apply(&self.items, self.filter, self.order);
        self.visible = filtered.items;
        self.is_filtered = filtered.is_filtered;
        self.populated = view::project(&self.categories, &self.items, self.filter, self.order);
        debug!(
            items = self.items.len(),
            visible = self.visible.len(),
            populated = self.populated.len(),
            "recomputed projections"
        );
    }
}

/// Read a persisted enum preference, falling back to (and rewriting) the
/// default when the stored value does not parse. The fallback is logged, not
/// silent.
fn load_pref_enum<T>(store: &Store, key: &str, default: T) -> Result<T>
where
    T: Copy + std::str::FromStr + std::fmt::Display,
{
    let raw = prefs::get_or_init(store, key, &default.to_string())?;
    match raw.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => {
            warn!(%key, %raw, "unrecognized preference value, resetting to default");
            prefs::set_string(store, key, &default.to_string())?;
            Ok(default)
        }
    }
}

/// Seed the default category set when no categories exist, attributed to the
/// synthetic "System" creator.
fn seed_default_categories(store: &Store, config: &Config) -> Result<()> {
    if !store.list_categories()?.is_empty() {
        return Ok(());
    }

    for name in &config.seed.categories {
        store.create_category(&title_case(name), SYSTEM_CREATOR)?;
    }
    info!(count = config.seed.categories.len(), "seeded default categories");
    Ok(())
}

/// Startup repair pass: remove categories that duplicate an earlier
/// category's name and have no items, keeping the first occurrence.
/// Idempotent; a store maintained solely through `App::add_category` never
/// has anything for it to do.
fn remove_duplicate_empty_categories(store: &Store) -> Result<()> {
    let categories = store.list_categories()?;
    let items = store.list_items()?;

    let mut seen = std::collections::HashSet::new();
    for category in categories {
        let duplicate = !seen.insert(category.name.clone());
        if !duplicate {
            continue;
        }

        let item_count = items
            .iter()
            .filter(|item| item.category_id == category.id)
            .count();
        if item_count == 0 {
            info!(name = %category.name, id = %category.id, "removing duplicate empty category");
            store.delete_category(category.id)?;
        }
    }

    Ok(())
}
