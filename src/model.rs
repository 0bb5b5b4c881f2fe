//! Domain model for tdl: items, categories, and the display enums.
//!
//! Categories never hold their items directly; the category -> items
//! collection is always derived by query (see `view::project`), so there is
//! no stored back-pointer graph to keep consistent.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Creator recorded on seeded categories.
pub const SYSTEM_CREATOR: &str = "System";

/// Opaque item identity, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        ItemId(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ItemId)
            .map_err(|_| Error::InvalidArgument(format!("'{s}' is not a valid item id")))
    }
}

/// Opaque category identity, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    pub fn new() -> Self {
        CategoryId(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A to-do item. Holds a reference to its owning category, never the other
/// way around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub category_id: CategoryId,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Item {
    /// Build a fresh, not-completed item with both timestamps set to `now`.
    pub fn new(
        category_id: CategoryId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            description: description.into(),
            completed: false,
            category_id,
            created_by: created_by.into(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// A category grouping items. Names are unique among categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            created_by: created_by.into(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// Which completion-state subset of items is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    #[default]
    NoFilter,
    Completed,
    NotCompleted,
}

impl FilterMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoFilter => "no-filter",
            Self::Completed => "completed",
            Self::NotCompleted => "not-completed",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no-filter" | "none" | "all" => Ok(FilterMode::NoFilter),
            "completed" | "done" => Ok(FilterMode::Completed),
            "not-completed" | "open" => Ok(FilterMode::NotCompleted),
            _ => Err(Error::InvalidArgument(format!(
                "invalid filter '{s}': must be no-filter, completed, or not-completed"
            ))),
        }
    }
}

/// Direction of comparison on the last-updated timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            _ => Err(Error::InvalidArgument(format!(
                "invalid sort order '{s}': must be ascending or descending"
            ))),
        }
    }
}

/// Normalize a name to title case: first letter of each whitespace-separated
/// word uppercased, the rest lowercased.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mode_round_trips_through_str() {
        for mode in [
            FilterMode::NoFilter,
            FilterMode::Completed,
            FilterMode::NotCompleted,
        ] {
            assert_eq!(mode.as_str().parse::<FilterMode>().unwrap(), mode);
        }
    }

    #[test]
    fn filter_mode_rejects_unknown_values() {
        let err = "compleeted".parse::<FilterMode>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn sort_order_accepts_short_forms() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
    }

    #[test]
    fn item_id_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<ItemId>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("shopping list"), "Shopping List");
        assert_eq!(title_case("BUY MILK"), "Buy Milk");
        assert_eq!(title_case("  spaced   out "), "Spaced Out");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn new_item_starts_not_completed() {
        let now = Utc::now();
        let item = Item::new(CategoryId::new(), "Buy Milk", "2% milk", "Anonymous", now);
        assert!(!item.completed);
        assert_eq!(item.created_at, item.last_updated);
    }
}
