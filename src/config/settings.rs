//! Application settings and recipe seeds loaded from config.toml
//!
//! The `[grocery]` and `[inventory]` tables tune defaults; `[[recipes]]`
//! entries describe the starter recipe collection that is seeded on first run
//! or on demand through `/seed_recipes`.

use crate::entities::{DietaryRestriction, GroceryMode, MealType};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Grocery list defaults
    #[serde(default)]
    pub grocery: GrocerySettings,
    /// Inventory defaults
    #[serde(default)]
    pub inventory: InventorySettings,
    /// Recipes to seed
    #[serde(default)]
    pub recipes: Vec<RecipeSeed>,
}

/// Grocery list generation defaults
#[derive(Debug, Default, Deserialize)]
pub struct GrocerySettings {
    /// Mode used when a command does not name one
    #[serde(default)]
    pub default_mode: GroceryMode,
}

/// Inventory defaults
#[derive(Debug, Deserialize)]
pub struct InventorySettings {
    /// Window used by the "expiring soon" filter
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            expiring_soon_days: default_expiring_soon_days(),
        }
    }
}

const fn default_expiring_soon_days() -> i64 {
    7
}

const fn default_servings() -> i32 {
    4
}

/// A recipe definition to seed into the database
#[derive(Debug, Deserialize, Clone)]
pub struct RecipeSeed {
    /// Name of the recipe
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Compliant dietary restrictions
    #[serde(default)]
    pub dietary_restrictions_compliant: Vec<DietaryRestriction>,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientSeed>,
    /// Instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Prep time in minutes
    #[serde(default)]
    pub prep_time_minutes: i32,
    /// Cook time in minutes
    #[serde(default)]
    pub cook_time_minutes: i32,
    /// Base servings
    #[serde(default = "default_servings")]
    pub servings: i32,
    /// Suitable meals
    #[serde(default)]
    pub meal_types: Vec<MealType>,
    /// Free-text tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One ingredient line of a seeded recipe
#[derive(Debug, Deserialize, Clone)]
pub struct IngredientSeed {
    /// Ingredient name
    pub name: String,
    /// Amount for the recipe's base servings
    pub quantity: f64,
    /// Unit as written
    pub unit: String,
    /// Declared store section
    #[serde(default)]
    pub store_section: Option<String>,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type or an unknown enum value
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid or does not match the schema.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `FAMILY_FORK_CONFIG`, or ./config.toml when unset.
///
/// A missing file is not an error: defaults are used and nothing is seeded.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("FAMILY_FORK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    if !Path::new(&path).exists() {
        tracing::warn!("Config file {path} not found, using defaults");
        return Ok(Config::default());
    }
    load_config(path)
}
