//! Inventory item entity - Food currently on hand.
//!
//! Items are created by hand or from a barcode lookup and are only ever
//! removed explicitly. Grocery generation reads them but never writes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item name, matched case-insensitively against ingredient names
    pub name: String,
    /// Amount on hand
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Category (produce, meat, dairy, pantry, ...)
    pub category: String,
    /// Product barcode, if scanned
    pub barcode: Option<String>,
    /// Brand, if known
    pub brand: Option<String>,
    /// Best-before date
    pub expiration_date: Option<Date>,
    /// Purchase date
    pub purchase_date: Option<Date>,
    /// Storage location (pantry, fridge, freezer)
    pub location: String,
    /// Free-text notes
    pub notes: String,
    /// When the item was added
    pub created_at: DateTimeUtc,
    /// When the item was last modified
    pub updated_at: DateTimeUtc,
}

/// `InventoryItem` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
