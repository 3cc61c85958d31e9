//! Unified error types and result handling for Family Fork.

use chrono::NaiveDate;
use thiserror::Error;

/// Every failure the store, core and bot layers can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// Invalid user input that is not covered by a more specific variant
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human readable description
        message: String,
    },

    /// Week key was malformed or not a Sunday
    #[error("Invalid week key '{value}': {reason}")]
    InvalidWeekKey {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A mode, tag or enumerated value was not recognized
    #[error("Invalid {kind} '{value}'")]
    InvalidMode {
        /// Which enumeration was being parsed (e.g. "grocery mode")
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// Quantities must be finite and non-negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: f64,
    },

    /// Servings must be positive
    #[error("Invalid servings: {servings}")]
    InvalidServings {
        /// The rejected servings count
        servings: i32,
    },

    /// Barcodes are 8 to 14 digits
    #[error("Invalid barcode format: {barcode}")]
    InvalidBarcode {
        /// The rejected barcode
        barcode: String,
    },

    #[error("Recipe not found: {id}")]
    /// No recipe with this id
    RecipeNotFound {
        /// Recipe id that was looked up
        id: i64,
    },

    #[error("Family member not found: {id}")]
    /// No family member with this id
    FamilyMemberNotFound {
        /// Family member id that was looked up
        id: i64,
    },

    #[error("Meal plan entry not found: {id}")]
    /// No meal plan entry with this id
    MealPlanEntryNotFound {
        /// Entry id that was looked up
        id: i64,
    },

    #[error("Inventory item not found: {id}")]
    /// No inventory item with this id
    InventoryItemNotFound {
        /// Item id that was looked up
        id: i64,
    },

    #[error("Grocery list not found for week {week_start_date}")]
    /// No grocery list has been generated for this week
    GroceryListNotFound {
        /// Week key that was looked up
        week_start_date: NaiveDate,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON column (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Outbound HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a response string failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether the error was caused by what the user asked for, so it can be
    /// shown to them instead of being logged as a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidWeekKey { .. }
                | Self::InvalidMode { .. }
                | Self::InvalidQuantity { .. }
                | Self::InvalidServings { .. }
                | Self::InvalidBarcode { .. }
                | Self::RecipeNotFound { .. }
                | Self::FamilyMemberNotFound { .. }
                | Self::MealPlanEntryNotFound { .. }
                | Self::InventoryItemNotFound { .. }
                | Self::GroceryListNotFound { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
