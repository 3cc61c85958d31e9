//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Family member commands
pub mod family;

/// General utility commands
pub mod general;

/// Grocery list commands
pub mod grocery;

/// Inventory and barcode commands
pub mod inventory;

/// Meal plan commands
pub mod meal_plan;

/// Recipe commands
pub mod recipe;

// Export commands
pub use family::*;
pub use general::*;
pub use grocery::*;
pub use inventory::*;
pub use meal_plan::*;
pub use recipe::*;
