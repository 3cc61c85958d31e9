//! Grocery list entity - The generated shopping list for one week.
//!
//! One row per `week_start_date`. The row is a derived document: regeneration
//! deletes and re-inserts it, and no field is ever edited in place.

use super::enums::{GroceryMode, StoreSection};
use super::json::{GroceryItemList, SkippedEntryList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grocery list database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grocery_lists")]
pub struct Model {
    /// Unique identifier for the list
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sunday that begins the week this list covers
    #[sea_orm(unique)]
    pub week_start_date: Date,
    /// Whether inventory was subtracted or only annotated
    pub mode: GroceryMode,
    /// Items grouped by store section
    pub items: GroceryItemList,
    /// Meal plan entries that could not be used
    pub skipped: SkippedEntryList,
    /// When the list was generated
    pub generated_at: DateTimeUtc,
}

/// `GroceryList` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// One line of a grocery list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Ingredient name as displayed
    pub ingredient_name: String,
    /// Amount to buy (shortfall mode) or required (full mode), in `unit`
    pub total_quantity: f64,
    /// Display unit
    pub unit: String,
    /// Aisle to find it in
    pub store_section: StoreSection,
    /// Distinct recipe names that contributed, in order of first appearance
    pub from_recipes: Vec<String>,
    /// Amount already on hand in `unit`; only set in full mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hand: Option<f64>,
}

/// A meal plan entry that generation could not use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// The skipped meal plan entry
    pub entry_id: i64,
    /// Recipe the entry referenced
    pub recipe_id: i64,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Why a meal plan entry (or part of it) was left out of a grocery list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The referenced recipe no longer exists
    RecipeNotFound,
    /// The recipe's base servings is not positive, so it cannot be scaled
    InvalidRecipeServings {
        /// The offending value
        servings: i32,
    },
    /// The entry asked for a non-positive number of servings
    InvalidEntryServings {
        /// The offending value
        servings: i32,
    },
    /// One ingredient had a negative or non-finite quantity and was left out
    InvalidIngredientQuantity {
        /// Name of the ingredient
        ingredient: String,
    },
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::RecipeNotFound => write!(
                f,
                "entry {}: recipe {} not found",
                self.entry_id, self.recipe_id
            ),
            SkipReason::InvalidRecipeServings { servings } => write!(
                f,
                "entry {}: recipe {} has invalid base servings {servings}",
                self.entry_id, self.recipe_id
            ),
            SkipReason::InvalidEntryServings { servings } => write!(
                f,
                "entry {}: invalid servings {servings}",
                self.entry_id
            ),
            SkipReason::InvalidIngredientQuantity { ingredient } => write!(
                f,
                "entry {}: ingredient '{ingredient}' of recipe {} has an invalid quantity",
                self.entry_id, self.recipe_id
            ),
        }
    }
}
