//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod enums;
pub mod family_member;
pub mod grocery_list;
pub mod inventory_item;
pub mod json;
pub mod meal_plan_entry;
pub mod recipe;
pub mod recipe_ingredient;

// Re-export specific types to avoid conflicts
pub use enums::{DayOfWeek, DietaryRestriction, FilterMode, GroceryMode, MealType, StoreSection};
pub use family_member::{
    Column as FamilyMemberColumn, Entity as FamilyMember, Model as FamilyMemberModel,
};
pub use grocery_list::{
    Column as GroceryListColumn, Entity as GroceryList, GroceryItem, Model as GroceryListModel,
    SkipReason, SkippedEntry,
};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use meal_plan_entry::{
    Column as MealPlanEntryColumn, Entity as MealPlanEntry, Model as MealPlanEntryModel,
};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
pub use recipe_ingredient::{
    Column as RecipeIngredientColumn, Entity as RecipeIngredient, Model as RecipeIngredientModel,
};
