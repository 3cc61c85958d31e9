//! Grocery list assembly.
//!
//! Pure orchestration of aggregation, reconciliation and classification into a
//! section-grouped list. Nothing here touches the database.

use super::{
    RecipeLookup,
    aggregate::{Aggregation, aggregate},
    reconcile::{ReconciledLine, reconcile},
    section, units,
};
use crate::{
    core::week::WeekKey,
    entities::{GroceryItem, GroceryMode, InventoryItemModel, MealPlanEntryModel, SkippedEntry},
};
use chrono::{DateTime, Utc};

/// A grocery list that has been computed but not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryListDraft {
    /// Week the list covers
    pub week: WeekKey,
    /// Inventory treatment
    pub mode: GroceryMode,
    /// Items grouped by store section
    pub items: Vec<GroceryItem>,
    /// Entries that could not be used
    pub skipped: Vec<SkippedEntry>,
    /// Computation time
    pub generated_at: DateTime<Utc>,
}

/// Builds the grocery list for a week from already-loaded inputs.
///
/// Items are grouped by section in aisle order; within a section they keep
/// the aggregator's name-then-unit order. An empty week yields an empty list.
pub fn build<L: RecipeLookup + ?Sized>(
    week: WeekKey,
    entries: &[MealPlanEntryModel],
    recipes: &L,
    inventory: &[InventoryItemModel],
    mode: GroceryMode,
) -> GroceryListDraft {
    let Aggregation { lines, skipped } = aggregate(entries, recipes);

    let mut items: Vec<GroceryItem> = reconcile(lines, inventory, mode)
        .into_iter()
        .map(|reconciled| to_item(reconciled, mode))
        .collect();

    // Stable: keeps name order inside each section
    items.sort_by_key(|item| item.store_section);

    GroceryListDraft {
        week,
        mode,
        items,
        skipped,
        generated_at: Utc::now(),
    }
}

fn to_item(reconciled: ReconciledLine, mode: GroceryMode) -> GroceryItem {
    let (total, on_hand) = match mode {
        GroceryMode::Shortfall => (reconciled.shortfall(), None),
        GroceryMode::Full => (
            reconciled.line.quantity(),
            Some(units::round_for_display(reconciled.on_hand())),
        ),
    };

    let line = reconciled.line;
    let store_section = section::classify(&line.name, line.declared_section.as_deref());

    GroceryItem {
        ingredient_name: line.name,
        total_quantity: units::round_for_display(total),
        unit: line.unit,
        store_section,
        from_recipes: line.from_recipes,
        on_hand,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::recipe::RecipeWithIngredients;
    use crate::entities::{SkipReason, StoreSection};
    use crate::test_utils::{entry, inventory_item, recipe_with};
    use std::collections::HashMap;

    fn week() -> WeekKey {
        "2025-01-05".parse().unwrap()
    }

    fn pantry() -> HashMap<i64, RecipeWithIngredients> {
        HashMap::from([
            (
                1,
                recipe_with(
                    1,
                    "Pancakes",
                    4,
                    &[
                        ("flour", 2.0, "cups", Some("pantry")),
                        ("egg", 2.0, "each", Some("dairy")),
                        ("blueberries", 1.0, "cup", Some("produce")),
                    ],
                ),
            ),
            (
                2,
                recipe_with(
                    2,
                    "Grilled Salmon",
                    2,
                    &[
                        ("salmon fillet", 2.0, "each", Some("fish")),
                        ("lemon", 1.0, "each", Some("produce")),
                        ("dill", 1.0, "sprig", None),
                        ("salt", 0.5, "tsp", Some("spices")),
                    ],
                ),
            ),
        ])
    }

    fn comparable(draft: &GroceryListDraft) -> (Vec<GroceryItem>, Vec<SkippedEntry>) {
        (draft.items.clone(), draft.skipped.clone())
    }

    #[test]
    fn test_pancakes_example() {
        let recipes = pantry();
        let entries = vec![entry(1, 1, 4), entry(2, 1, 8)];

        let draft = build(week(), &entries, &recipes, &[], GroceryMode::Shortfall);

        let flour = draft.items.iter().find(|i| i.ingredient_name == "flour").unwrap();
        assert_eq!(flour.total_quantity, 6.0);
        assert_eq!(flour.unit, "cup");
        assert_eq!(flour.store_section, StoreSection::Pantry);
        let egg = draft.items.iter().find(|i| i.ingredient_name == "egg").unwrap();
        assert_eq!(egg.total_quantity, 6.0);
        assert_eq!(egg.unit, "each");
        assert_eq!(egg.on_hand, None);
    }

    #[test]
    fn test_flour_in_grams_does_not_cover_cups() {
        let recipes = pantry();
        let inventory = vec![inventory_item(1, "flour", 500.0, "g")];

        let shortfall = build(week(), &[entry(1, 1, 12)], &recipes, &inventory, GroceryMode::Shortfall);
        let flour = shortfall.items.iter().find(|i| i.ingredient_name == "flour").unwrap();
        assert_eq!(flour.total_quantity, 6.0);

        let full = build(week(), &[entry(1, 1, 12)], &recipes, &inventory, GroceryMode::Full);
        let flour = full.items.iter().find(|i| i.ingredient_name == "flour").unwrap();
        assert_eq!(flour.total_quantity, 6.0);
        assert_eq!(flour.on_hand, Some(0.0));
    }

    #[test]
    fn test_empty_week_gives_empty_list() {
        let draft = build(week(), &[], &pantry(), &[], GroceryMode::Shortfall);
        assert!(draft.items.is_empty());
        assert!(draft.skipped.is_empty());
        assert_eq!(draft.week, week());
    }

    #[test]
    fn test_sections_follow_aisle_order() {
        let recipes = pantry();
        let entries = vec![entry(1, 1, 4), entry(2, 2, 2)];

        let draft = build(week(), &entries, &recipes, &[], GroceryMode::Shortfall);

        let sections: Vec<StoreSection> = draft.items.iter().map(|i| i.store_section).collect();
        let mut sorted = sections.clone();
        sorted.sort();
        assert_eq!(sections, sorted);
        assert_eq!(draft.items.first().unwrap().store_section, StoreSection::Produce);
        let last = draft.items.last().unwrap();
        assert_eq!(last.ingredient_name, "dill");
        assert_eq!(last.store_section, StoreSection::General);

        let produce: Vec<&str> = draft
            .items
            .iter()
            .filter(|i| i.store_section == StoreSection::Produce)
            .map(|i| i.ingredient_name.as_str())
            .collect();
        assert_eq!(produce, vec!["blueberries", "lemon"]);
    }

    #[test]
    fn test_deleted_recipe_is_reported_and_rest_aggregated() {
        let recipes = pantry();
        let entries = vec![entry(1, 1, 4), entry(2, 77, 4), entry(3, 2, 2)];

        let draft = build(week(), &entries, &recipes, &[], GroceryMode::Shortfall);

        assert_eq!(draft.skipped.len(), 1);
        assert_eq!(draft.skipped[0].entry_id, 2);
        assert_eq!(draft.skipped[0].reason, SkipReason::RecipeNotFound);
        assert_eq!(draft.items.len(), 7);
    }

    #[test]
    fn test_shortfall_mode_drops_covered_and_reports_remainder() {
        let recipes = pantry();
        let inventory = vec![
            inventory_item(1, "Egg", 12.0, "each"),
            inventory_item(2, "flour", 1.0, "cup"),
        ];

        let draft = build(week(), &[entry(1, 1, 4)], &recipes, &inventory, GroceryMode::Shortfall);

        assert!(draft.items.iter().all(|i| i.ingredient_name != "egg"));
        let flour = draft.items.iter().find(|i| i.ingredient_name == "flour").unwrap();
        assert_eq!(flour.total_quantity, 1.0);
        assert!(draft.items.iter().all(|i| i.total_quantity >= 0.0));
    }

    #[test]
    fn test_tiny_amounts_stay_on_the_shortfall_list() {
        let recipes = HashMap::from([(
            1,
            recipe_with(
                1,
                "Brine",
                8,
                &[
                    ("saffron", 0.03, "g", Some("spices")),
                    ("water", 1.0, "cup", None),
                ],
            ),
        )]);

        let draft = build(week(), &[entry(1, 1, 1)], &recipes, &[], GroceryMode::Shortfall);

        let names: Vec<&str> = draft
            .items
            .iter()
            .map(|i| i.ingredient_name.as_str())
            .collect();
        assert_eq!(names, vec!["saffron", "water"]);
    }

    #[test]
    fn test_full_mode_keeps_every_line() {
        let recipes = pantry();
        let inventory = vec![inventory_item(1, "egg", 12.0, "each")];

        let draft = build(week(), &[entry(1, 1, 4)], &recipes, &inventory, GroceryMode::Full);

        assert_eq!(draft.items.len(), 3);
        let egg = draft.items.iter().find(|i| i.ingredient_name == "egg").unwrap();
        assert_eq!(egg.total_quantity, 2.0);
        assert_eq!(egg.on_hand, Some(12.0));
        assert!(draft.items.iter().all(|i| i.on_hand.is_some()));
    }

    #[test]
    fn test_build_is_idempotent() {
        let recipes = pantry();
        let entries = vec![entry(1, 1, 3), entry(2, 2, 5)];
        let inventory = vec![inventory_item(1, "lemon", 1.0, "each")];

        let first = build(week(), &entries, &recipes, &inventory, GroceryMode::Shortfall);
        let second = build(week(), &entries, &recipes, &inventory, GroceryMode::Shortfall);

        assert_eq!(comparable(&first), comparable(&second));
    }

    #[test]
    fn test_entry_order_does_not_change_quantities() {
        let recipes = pantry();
        let entries = vec![entry(1, 1, 3), entry(2, 2, 5), entry(3, 1, 7), entry(4, 2, 1)];
        let reversed: Vec<_> = entries.iter().rev().cloned().collect();
        let interleaved = vec![
            entries[1].clone(),
            entries[3].clone(),
            entries[0].clone(),
            entries[2].clone(),
        ];

        let quantities = |draft: GroceryListDraft| {
            draft
                .items
                .into_iter()
                .map(|i| (i.ingredient_name, i.unit, i.total_quantity, i.store_section))
                .collect::<Vec<_>>()
        };

        let base = quantities(build(week(), &entries, &recipes, &[], GroceryMode::Full));
        assert_eq!(base, quantities(build(week(), &reversed, &recipes, &[], GroceryMode::Full)));
        assert_eq!(
            base,
            quantities(build(week(), &interleaved, &recipes, &[], GroceryMode::Full))
        );
    }
}
