//! Recipe entity - A dish with a base serving count.
//!
//! Ingredient rows live in `recipe_ingredients` and are specified for
//! `servings` portions; planners scale them linearly.

use super::json::{MealTypeList, RestrictionList, StringList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the dish (e.g., "Pancakes")
    pub name: String,
    /// Short description
    pub description: String,
    /// Restrictions this recipe is compliant with
    pub dietary_restrictions_compliant: RestrictionList,
    /// Ordered instruction steps
    pub instructions: StringList,
    /// Preparation time in minutes
    pub prep_time_minutes: i32,
    /// Cooking time in minutes
    pub cook_time_minutes: i32,
    /// Number of servings the ingredient quantities are written for
    pub servings: i32,
    /// Meals this recipe suits
    pub meal_types: MealTypeList,
    /// Free-text tags
    pub tags: StringList,
    /// Marked as a household favorite
    pub is_favorite: bool,
    /// When the recipe was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One recipe has many ingredient rows
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    Ingredients,
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
