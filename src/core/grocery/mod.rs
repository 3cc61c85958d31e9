//! Grocery list generation engine.
//!
//! Loads a week's meal plan, the recipes it references and the current
//! inventory, computes the list with the pure functions in the submodules, and
//! stores it. A week has at most one stored list; regeneration replaces it.

pub mod aggregate;
pub mod builder;
pub mod reconcile;
pub mod report;
pub mod section;
pub mod units;

use crate::{
    core::{inventory, meal_plan, recipe, recipe::RecipeWithIngredients, week::WeekKey},
    entities::{GroceryList, GroceryListColumn, GroceryMode, grocery_list, json},
    errors::{Error, Result},
};
use builder::GroceryListDraft;
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;
use tracing::{info, instrument, warn};

/// Source of recipes for aggregation.
pub trait RecipeLookup {
    /// The recipe with `id` and its ingredients, if it exists.
    fn get(&self, id: i64) -> Option<&RecipeWithIngredients>;
}

impl<S: BuildHasher> RecipeLookup for HashMap<i64, RecipeWithIngredients, S> {
    fn get(&self, id: i64) -> Option<&RecipeWithIngredients> {
        HashMap::get(self, &id)
    }
}

/// Generates (or regenerates) the grocery list for a week and stores it.
///
/// Any existing list for the week is replaced inside one transaction. Entries
/// that reference missing recipes are skipped and listed on the result.
#[instrument(skip(db))]
pub async fn generate_grocery_list(
    db: &DatabaseConnection,
    week: WeekKey,
    mode: GroceryMode,
) -> Result<grocery_list::Model> {
    let entries = meal_plan::list_entries_for_week(db, week, None).await?;
    let recipe_ids: Vec<i64> = entries
        .iter()
        .map(|e| e.recipe_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let recipes = recipe::get_recipes_by_ids(db, &recipe_ids).await?;
    let stock = inventory::list_all_items(db).await?;

    let draft = builder::build(week, &entries, &recipes, &stock, mode);
    for skipped in &draft.skipped {
        warn!("Grocery list for {week}: {skipped}");
    }

    let list = save_grocery_list(db, draft).await?;
    info!(
        "Generated {} grocery list for {week} with {} items ({} entries skipped)",
        list.mode,
        list.items.0.len(),
        list.skipped.0.len()
    );
    Ok(list)
}

async fn save_grocery_list(
    db: &DatabaseConnection,
    draft: GroceryListDraft,
) -> Result<grocery_list::Model> {
    let txn = db.begin().await?;

    GroceryList::delete_many()
        .filter(GroceryListColumn::WeekStartDate.eq(draft.week.date()))
        .exec(&txn)
        .await?;

    let list = grocery_list::ActiveModel {
        week_start_date: Set(draft.week.date()),
        mode: Set(draft.mode),
        items: Set(json::GroceryItemList(draft.items)),
        skipped: Set(json::SkippedEntryList(draft.skipped)),
        generated_at: Set(draft.generated_at),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(list)
}

/// Fetches the stored grocery list for a week.
pub async fn get_grocery_list(
    db: &DatabaseConnection,
    week: WeekKey,
) -> Result<grocery_list::Model> {
    GroceryList::find()
        .filter(GroceryListColumn::WeekStartDate.eq(week.date()))
        .one(db)
        .await?
        .ok_or(Error::GroceryListNotFound {
            week_start_date: week.date(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{DayOfWeek, MealType, SkipReason, StoreSection};
    use crate::test_utils::*;

    fn week() -> WeekKey {
        "2025-01-05".parse().unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_list_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_grocery_list(&db, week()).await;
        assert!(matches!(result, Err(Error::GroceryListNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_week_generates_empty_list() -> Result<()> {
        let db = setup_test_db().await?;

        let list = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;

        assert!(list.items.0.is_empty());
        assert!(list.skipped.0.is_empty());
        assert_eq!(list.week_start_date, week().date());
        assert_eq!(get_grocery_list(&db, week()).await?, list);
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_pancakes_week() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let pancakes = create_test_recipe(
            &db,
            "Pancakes",
            4,
            &[("flour", 2.0, "cups", Some("pantry")), ("egg", 2.0, "each", Some("dairy"))],
        )
        .await?;
        plan_meal(&db, week(), member.id, DayOfWeek::Sunday, MealType::Breakfast, pancakes.recipe.id, 4).await?;
        plan_meal(&db, week(), member.id, DayOfWeek::Saturday, MealType::Breakfast, pancakes.recipe.id, 8).await?;

        let list = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;

        let items = &list.items.0;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ingredient_name, "egg");
        assert_eq!(items[0].store_section, StoreSection::Dairy);
        assert_eq!(items[0].total_quantity, 6.0);
        assert_eq!(items[1].ingredient_name, "flour");
        assert_eq!(items[1].unit, "cup");
        assert_eq!(items[1].total_quantity, 6.0);
        assert_eq!(items[1].from_recipes, vec!["Pancakes".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_regeneration_replaces_previous_list() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[("carrot", 2.0, "each", Some("produce"))]).await?;
        plan_meal(&db, week(), member.id, DayOfWeek::Monday, MealType::Dinner, soup.recipe.id, 2).await?;

        let first = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;
        let second = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;

        assert_eq!(first.items, second.items);
        assert_eq!(first.skipped, second.skipped);
        let stored = GroceryList::find().all(&db).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, second.id);

        let full = generate_grocery_list(&db, week(), GroceryMode::Full).await?;
        assert_eq!(get_grocery_list(&db, week()).await?.mode, GroceryMode::Full);
        assert_eq!(full.items.0[0].on_hand, Some(0.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_recipe_is_skipped() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[("carrot", 2.0, "each", Some("produce"))]).await?;
        let salad = create_test_recipe(&db, "Salad", 1, &[("lettuce", 1.0, "each", Some("produce"))]).await?;
        plan_meal(&db, week(), member.id, DayOfWeek::Monday, MealType::Dinner, soup.recipe.id, 2).await?;
        let dangling =
            plan_meal(&db, week(), member.id, DayOfWeek::Tuesday, MealType::Lunch, salad.recipe.id, 1).await?;
        recipe::delete_recipe(&db, salad.recipe.id).await?;

        let list = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;

        assert_eq!(list.items.0.len(), 1);
        assert_eq!(list.items.0[0].ingredient_name, "carrot");
        assert_eq!(list.skipped.0.len(), 1);
        assert_eq!(list.skipped.0[0].entry_id, dangling.id);
        assert_eq!(list.skipped.0[0].reason, SkipReason::RecipeNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_is_subtracted_and_left_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let bread = create_test_recipe(&db, "Bread", 1, &[("flour", 6.0, "cups", Some("pantry"))]).await?;
        plan_meal(&db, week(), member.id, DayOfWeek::Friday, MealType::Dinner, bread.recipe.id, 1).await?;
        let grams = create_test_inventory_item(&db, "Flour", 500.0, "g").await?;
        let cups = create_test_inventory_item(&db, "flour", 2.0, "cups").await?;

        let list = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;

        assert_eq!(list.items.0[0].total_quantity, 4.0);
        let after = inventory::list_all_items(&db).await?;
        assert_eq!(after, vec![grams, cups]);
        Ok(())
    }

    #[tokio::test]
    async fn test_other_weeks_are_ignored() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[("carrot", 2.0, "each", None)]).await?;
        let next: WeekKey = "2025-01-12".parse().unwrap();
        plan_meal(&db, next, member.id, DayOfWeek::Monday, MealType::Dinner, soup.recipe.id, 2).await?;

        let list = generate_grocery_list(&db, week(), GroceryMode::Shortfall).await?;
        assert!(list.items.0.is_empty());

        let next_list = generate_grocery_list(&db, next, GroceryMode::Shortfall).await?;
        assert_eq!(next_list.items.0.len(), 1);
        assert_eq!(GroceryList::find().all(&db).await?.len(), 2);
        Ok(())
    }
}
