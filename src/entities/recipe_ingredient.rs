//! Recipe ingredient entity - One ingredient line of a recipe.
//!
//! `position` keeps the author's ordering. `store_section` is the raw hint the
//! recipe declared; it is only validated when a grocery list is classified.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredients")]
pub struct Model {
    /// Unique identifier for the ingredient row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Recipe this ingredient belongs to
    pub recipe_id: i64,
    /// Zero-based position within the recipe
    pub position: i32,
    /// Ingredient name (e.g., "flour")
    pub name: String,
    /// Amount for the recipe's base servings
    pub quantity: f64,
    /// Unit as written (e.g., "cups", "lb", "each")
    pub unit: String,
    /// Declared store section, if any
    pub store_section: Option<String>,
}

/// Defines relationships between `RecipeIngredient` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ingredient belongs to one recipe
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "Cascade"
    )]
    Recipe,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
