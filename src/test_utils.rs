//! Shared test utilities for Family Fork.
//!
//! Two kinds of fixtures: plain models for the pure grocery engine, and
//! creators that go through the core functions against an in-memory database.

use crate::{
    core::{
        family::{self, NewFamilyMember},
        inventory::{self, NewInventoryItem},
        meal_plan::{self, NewMealPlanEntry},
        recipe::{self, NewIngredient, NewRecipe, RecipeWithIngredients},
        week::WeekKey,
    },
    entities::{
        DayOfWeek, MealType, family_member, inventory_item, json, meal_plan_entry, recipe_ingredient,
    },
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// `(name, quantity, unit, declared section)` for one ingredient line
pub type IngredientSpec<'a> = (&'a str, f64, &'a str, Option<&'a str>);

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn epoch() -> DateTime<Utc> {
    DateTime::default()
}

fn test_week_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 5).unwrap_or_default()
}

/// A meal plan entry model (not stored) for the pure engine.
///
/// # Defaults
/// * week: 2025-01-05
/// * member: 1
/// * slot: Sunday dinner
pub fn entry(id: i64, recipe_id: i64, servings: i32) -> meal_plan_entry::Model {
    meal_plan_entry::Model {
        id,
        week_start_date: test_week_date(),
        family_member_id: 1,
        day_of_week: DayOfWeek::Sunday,
        meal_type: MealType::Dinner,
        recipe_id,
        servings,
        notes: String::new(),
        created_at: epoch(),
    }
}

/// A recipe with ingredients (not stored) for the pure engine.
pub fn recipe_with(
    id: i64,
    name: &str,
    servings: i32,
    ingredients: &[IngredientSpec<'_>],
) -> RecipeWithIngredients {
    let recipe = crate::entities::recipe::Model {
        id,
        name: name.to_string(),
        description: String::new(),
        dietary_restrictions_compliant: json::RestrictionList::default(),
        instructions: json::StringList::default(),
        prep_time_minutes: 0,
        cook_time_minutes: 0,
        servings,
        meal_types: json::MealTypeList::default(),
        tags: json::StringList::default(),
        is_favorite: false,
        created_at: epoch(),
    };

    let ingredients = (0_i32..)
        .zip(ingredients)
        .map(|(position, (name, quantity, unit, section))| recipe_ingredient::Model {
            id: id * 100 + i64::from(position),
            recipe_id: id,
            position,
            name: (*name).to_string(),
            quantity: *quantity,
            unit: (*unit).to_string(),
            store_section: section.map(str::to_string),
        })
        .collect();

    RecipeWithIngredients {
        recipe,
        ingredients,
    }
}

/// An inventory item model (not stored) with default category and location.
pub fn inventory_item(id: i64, name: &str, quantity: f64, unit: &str) -> inventory_item::Model {
    inventory_item::Model {
        id,
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        category: inventory::DEFAULT_CATEGORY.to_string(),
        barcode: None,
        brand: None,
        expiration_date: None,
        purchase_date: None,
        location: inventory::DEFAULT_LOCATION.to_string(),
        notes: String::new(),
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// A family member model (not stored) with no restrictions.
pub fn family_member_model(id: i64, name: &str) -> family_member::Model {
    family_member::Model {
        id,
        name: name.to_string(),
        dietary_restrictions: json::RestrictionList::default(),
        favorite_ingredients: json::StringList::default(),
        allergies: json::StringList::default(),
        dislikes: json::StringList::default(),
        notes: String::new(),
        created_at: epoch(),
    }
}

/// Recipe input with the given ingredients and no other details.
pub fn new_recipe(name: &str, servings: i32, ingredients: &[IngredientSpec<'_>]) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        description: String::new(),
        dietary_restrictions_compliant: Vec::new(),
        ingredients: ingredients
            .iter()
            .map(|(name, quantity, unit, section)| NewIngredient {
                name: (*name).to_string(),
                quantity: *quantity,
                unit: (*unit).to_string(),
                store_section: section.map(str::to_string),
            })
            .collect(),
        instructions: Vec::new(),
        prep_time_minutes: 0,
        cook_time_minutes: 0,
        servings,
        meal_types: Vec::new(),
        tags: Vec::new(),
        is_favorite: false,
    }
}

/// Stores a recipe built by [`new_recipe`].
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    name: &str,
    servings: i32,
    ingredients: &[IngredientSpec<'_>],
) -> Result<RecipeWithIngredients> {
    recipe::create_recipe(db, new_recipe(name, servings, ingredients)).await
}

/// Stores a family member with no restrictions.
pub async fn create_test_family_member(
    db: &DatabaseConnection,
    name: &str,
) -> Result<family_member::Model> {
    family::create_family_member(
        db,
        NewFamilyMember {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Stores an inventory item with default category and location.
pub async fn create_test_inventory_item(
    db: &DatabaseConnection,
    name: &str,
    quantity: f64,
    unit: &str,
) -> Result<inventory_item::Model> {
    inventory::create_item(db, NewInventoryItem::new(name, quantity, unit)).await
}

/// Stores a meal plan entry.
pub async fn plan_meal(
    db: &DatabaseConnection,
    week: WeekKey,
    family_member_id: i64,
    day_of_week: DayOfWeek,
    meal_type: MealType,
    recipe_id: i64,
    servings: i32,
) -> Result<meal_plan_entry::Model> {
    meal_plan::create_entry(
        db,
        NewMealPlanEntry {
            week,
            family_member_id,
            day_of_week,
            meal_type,
            recipe_id,
            servings,
            notes: String::new(),
        },
    )
    .await
}
