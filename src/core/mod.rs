//! Core business logic - framework-agnostic household and grocery operations.
//!
//! Everything here takes a database connection (or plain values) and returns
//! `Result` types; formatting for Discord lives in the bot layer.

/// Barcode product lookup
pub mod barcode;
/// Family member profiles
pub mod family;
/// Grocery list generation engine
pub mod grocery;
/// Household inventory and availability checks
pub mod inventory;
/// Weekly meal plan entries
pub mod meal_plan;
/// Recipes and their ingredients
pub mod recipe;
/// Sunday-anchored week keys
pub mod week;
