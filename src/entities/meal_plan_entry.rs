//! Meal plan entry entity - One planned meal in a week.
//!
//! Entries are grouped by `week_start_date` (always a Sunday). The recipe and
//! member references are plain ids: deleting a recipe leaves the entry in place,
//! and grocery generation reports it as skipped.

use super::enums::{DayOfWeek, MealType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal plan entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_plan_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sunday that begins the planned week
    pub week_start_date: Date,
    /// Member this meal is planned for
    pub family_member_id: i64,
    /// Day of the week
    pub day_of_week: DayOfWeek,
    /// Meal slot
    pub meal_type: MealType,
    /// Recipe to cook
    pub recipe_id: i64,
    /// Servings wanted for this meal, independent of the recipe's base servings
    pub servings: i32,
    /// Free-text notes
    pub notes: String,
    /// When the entry was created
    pub created_at: DateTimeUtc,
}

/// Recipe and member ids are plain columns, not foreign keys
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
