//! Display projections: filtering, sorting, and category grouping.
//!
//! Both transforms here are pure. The controller (`app`) recomputes them
//! after every mutation; nothing in this module touches the store or holds
//! state between calls.

use crate::model::{Category, FilterMode, Item, SortOrder};

/// Result of filtering and sorting a list of items.
///
/// `is_filtered` distinguishes "empty because a filter is active" from
/// "empty, no data at all" so callers can word the empty state correctly.
#[derive(Debug, Clone)]
pub struct FilteredItems {
    pub items: Vec<Item>,
    pub is_filtered: bool,
}

/// A category paired with its filtered, sorted item subset.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PopulatedCategory {
    pub category: Category,
    pub items: Vec<Item>,
}

/// Filter items by completion state and sort by last-updated.
///
/// The sort is stable: items with equal timestamps keep their input order
/// under both directions. Empty input yields empty output.
pub fn apply(items: &[Item], filter: FilterMode, order: SortOrder) -> FilteredItems {
    let (mut selected, is_filtered): (Vec<Item>, bool) = match filter {
        FilterMode::NoFilter => (items.to_vec(), false),
        FilterMode::Completed => (
            items.iter().filter(|item| item.completed).cloned().collect(),
            true,
        ),
        FilterMode::NotCompleted => (
            items
                .iter()
                .filter(|item| !item.completed)
                .cloned()
                .collect(),
            true,
        ),
    };

    match order {
        SortOrder::Ascending => {
            selected.sort_by(|lhs, rhs| lhs.last_updated.cmp(&rhs.last_updated));
        }
        SortOrder::Descending => {
            selected.sort_by(|lhs, rhs| rhs.last_updated.cmp(&lhs.last_updated));
        }
    }

    FilteredItems {
        items: selected,
        is_filtered,
    }
}

/// Build the populated-categories view: each category paired with its
/// filtered, sorted item subset.
///
/// A category with zero associated items is excluded entirely. A category
/// whose items are all removed by the current filter stays in the result
/// with an empty list ("populated" means has-any-items, independent of the
/// filter). Category input order is preserved.
pub fn project(
    categories: &[Category],
    items: &[Item],
    filter: FilterMode,
    order: SortOrder,
) -> Vec<PopulatedCategory> {
    categories
        .iter()
        .filter_map(|category| {
            let associated: Vec<Item> = items
                .iter()
                .filter(|item| item.category_id == category.id)
                .cloned()
                .collect();
            if associated.is_empty() {
                return None;
            }

            Some(PopulatedCategory {
                category: category.clone(),
                items: apply(&associated, filter, order).items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;
    use chrono::{Duration, Utc};

    fn item(category_id: CategoryId, title: &str, completed: bool, offset_secs: i64) -> Item {
        let now = Utc::now();
        let mut item = Item::new(category_id, title, "", "Anonymous", now);
        item.completed = completed;
        item.last_updated = now + Duration::seconds(offset_secs);
        item
    }

    #[test]
    fn no_filter_keeps_all_items_sorted_ascending() {
        let cat = CategoryId::new();
        let items = vec![
            item(cat, "Second", false, 10),
            item(cat, "First", true, 0),
            item(cat, "Third", false, 20),
        ];

        let result = apply(&items, FilterMode::NoFilter, SortOrder::Ascending);
        assert!(!result.is_filtered);
        assert_eq!(result.items.len(), items.len());
        let titles: Vec<&str> = result.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn completed_and_not_completed_partition_the_input() {
        let cat = CategoryId::new();
        let items = vec![
            item(cat, "A", true, 0),
            item(cat, "B", false, 1),
            item(cat, "C", true, 2),
            item(cat, "D", false, 3),
        ];

        let completed = apply(&items, FilterMode::Completed, SortOrder::Ascending);
        let not_completed = apply(&items, FilterMode::NotCompleted, SortOrder::Ascending);

        assert!(completed.is_filtered);
        assert!(not_completed.is_filtered);
        assert!(completed.items.iter().all(|i| i.completed));
        assert!(not_completed.items.iter().all(|i| !i.completed));
        assert_eq!(completed.items.len() + not_completed.items.len(), items.len());
    }

    #[test]
    fn equal_timestamps_preserve_input_order() {
        let cat = CategoryId::new();
        let items = vec![
            item(cat, "One", false, 0),
            item(cat, "Two", false, 0),
            item(cat, "Three", false, 0),
        ];

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let result = apply(&items, FilterMode::NoFilter, order);
            let titles: Vec<&str> = result.items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, vec!["One", "Two", "Three"], "order {order}");
        }
    }

    #[test]
    fn descending_puts_latest_first() {
        let cat = CategoryId::new();
        let items = vec![item(cat, "T1", false, 0), item(cat, "T2", false, 60)];

        let result = apply(&items, FilterMode::NoFilter, SortOrder::Descending);
        let titles: Vec<&str> = result.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["T2", "T1"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let result = apply(&[], FilterMode::Completed, SortOrder::Descending);
        assert!(result.items.is_empty());
        assert!(result.is_filtered);
    }

    #[test]
    fn project_excludes_categories_without_items() {
        let now = Utc::now();
        let with_items = Category::new("Home", "System", now);
        let empty = Category::new("Errands", "System", now);
        let items = vec![item(with_items.id, "Sweep", false, 0)];

        let populated = project(
            &[with_items.clone(), empty],
            &items,
            FilterMode::NoFilter,
            SortOrder::Ascending,
        );

        assert_eq!(populated.len(), 1);
        assert_eq!(populated[0].category.id, with_items.id);
    }

    #[test]
    fn project_keeps_category_whose_items_are_all_filtered_out() {
        let now = Utc::now();
        let category = Category::new("Home", "System", now);
        // Not completed, so a Completed filter removes everything
        let items = vec![item(category.id, "Sweep", false, 0)];

        let populated = project(
            &[category.clone()],
            &items,
            FilterMode::Completed,
            SortOrder::Ascending,
        );

        assert_eq!(populated.len(), 1);
        assert!(populated[0].items.is_empty());
    }

    #[test]
    fn project_preserves_category_order() {
        let now = Utc::now();
        let first = Category::new("B-Side", "System", now);
        let second = Category::new("A-Side", "System", now);
        let items = vec![
            item(second.id, "Two", false, 0),
            item(first.id, "One", false, 0),
        ];

        let populated = project(
            &[first.clone(), second.clone()],
            &items,
            FilterMode::NoFilter,
            SortOrder::Ascending,
        );

        let names: Vec<&str> = populated
            .iter()
            .map(|p| p.category.name.as_str())
            .collect();
        assert_eq!(names, vec!["B-Side", "A-Side"]);
    }
}
