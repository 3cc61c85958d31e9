//! Inventory business logic - Tracking food on hand.
//!
//! Items are only created, edited, and removed through these functions.
//! Grocery generation reads inventory through [`list_all_items`] and never
//! writes it.

use crate::{
    core::grocery::units::{self, UnitFamily},
    entities::{InventoryItem, InventoryItemColumn, inventory_item},
    errors::{Error, Result},
};
use chrono::{Days, NaiveDate, Utc};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use tracing::info;

/// Default category for new items
pub const DEFAULT_CATEGORY: &str = "general";
/// Default storage location for new items
pub const DEFAULT_LOCATION: &str = "pantry";

/// An inventory item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    /// Item name
    pub name: String,
    /// Amount on hand
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Category, stored lowercase
    pub category: String,
    /// Scanned barcode
    pub barcode: Option<String>,
    /// Brand
    pub brand: Option<String>,
    /// Best-before date
    pub expiration_date: Option<NaiveDate>,
    /// Purchase date
    pub purchase_date: Option<NaiveDate>,
    /// Storage location, stored lowercase
    pub location: String,
    /// Free-text notes
    pub notes: String,
}

impl NewInventoryItem {
    /// An item with the default category and location and no optional details.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: DEFAULT_CATEGORY.to_string(),
            barcode: None,
            brand: None,
            expiration_date: None,
            purchase_date: None,
            location: DEFAULT_LOCATION.to_string(),
            notes: String::new(),
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryUpdate {
    /// New name
    pub name: Option<String>,
    /// New quantity
    pub quantity: Option<f64>,
    /// New unit
    pub unit: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New barcode
    pub barcode: Option<String>,
    /// New brand
    pub brand: Option<String>,
    /// New best-before date
    pub expiration_date: Option<NaiveDate>,
    /// New purchase date
    pub purchase_date: Option<NaiveDate>,
    /// New location
    pub location: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// Inventory listing filters. The default lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryQuery {
    /// Exact category (case-insensitive)
    pub category: Option<String>,
    /// Exact location (case-insensitive)
    pub location: Option<String>,
    /// Text matched against name, brand and notes
    pub search: Option<String>,
    /// Only items expiring within this many days of today (expired included)
    pub expiring_within_days: Option<u64>,
}

/// Stock of one ingredient, summed per measurement family.
#[derive(Debug, Clone, PartialEq)]
pub struct StockTotal {
    /// Display unit (the first matching item's unit)
    pub unit: String,
    /// Total expressed in `unit`
    pub quantity: f64,
}

/// Result of checking one ingredient against inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    /// Ingredient name as asked
    pub ingredient: String,
    /// Totals per measurement family
    pub totals: Vec<StockTotal>,
    /// Matching items with positive quantity
    pub items: Vec<inventory_item::Model>,
}

impl Availability {
    /// Whether any matching stock exists.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.items.is_empty()
    }
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidQuantity { quantity })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Adds an item to inventory.
pub async fn create_item(
    db: &DatabaseConnection,
    new: NewInventoryItem,
) -> Result<inventory_item::Model> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Inventory item name cannot be empty".to_string(),
        });
    }
    validate_quantity(new.quantity)?;

    let now = Utc::now();
    let item = inventory_item::ActiveModel {
        name: Set(new.name.trim().to_string()),
        quantity: Set(new.quantity),
        unit: Set(new.unit.trim().to_string()),
        category: Set(new.category.trim().to_lowercase()),
        barcode: Set(non_empty(new.barcode)),
        brand: Set(non_empty(new.brand)),
        expiration_date: Set(new.expiration_date),
        purchase_date: Set(new.purchase_date),
        location: Set(new.location.trim().to_lowercase()),
        notes: Set(new.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added {} {} of '{}' to inventory", item.quantity, item.unit, item.name);
    Ok(item)
}

/// Fetches an item by id.
pub async fn get_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Every inventory item, in insertion order.
pub async fn list_all_items(db: &DatabaseConnection) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .order_by_asc(InventoryItemColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists items matching `query`, ordered by name. `today` anchors the
/// expiring-soon window.
pub async fn list_items(
    db: &DatabaseConnection,
    query: &InventoryQuery,
    today: NaiveDate,
) -> Result<Vec<inventory_item::Model>> {
    let mut select = InventoryItem::find();

    if let Some(category) = non_empty(query.category.clone()) {
        select = select.filter(InventoryItemColumn::Category.eq(category.to_lowercase()));
    }

    if let Some(location) = non_empty(query.location.clone()) {
        select = select.filter(InventoryItemColumn::Location.eq(location.to_lowercase()));
    }

    if let Some(search) = non_empty(query.search.clone()) {
        select = select.filter(
            Condition::any()
                .add(InventoryItemColumn::Name.contains(&search))
                .add(InventoryItemColumn::Brand.contains(&search))
                .add(InventoryItemColumn::Notes.contains(&search)),
        );
    }

    if let Some(days) = query.expiring_within_days {
        let cutoff = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        select = select.filter(InventoryItemColumn::ExpirationDate.lte(cutoff));
    }

    select
        .order_by_asc(InventoryItemColumn::Name)
        .order_by_asc(InventoryItemColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update and bumps `updated_at`.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    update: InventoryUpdate,
) -> Result<inventory_item::Model> {
    let existing = InventoryItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::InventoryItemNotFound { id: item_id })?;

    let mut item: inventory_item::ActiveModel = existing.into();

    if let Some(name) = update.name {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "Inventory item name cannot be empty".to_string(),
            });
        }
        item.name = Set(name.trim().to_string());
    }
    if let Some(quantity) = update.quantity {
        validate_quantity(quantity)?;
        item.quantity = Set(quantity);
    }
    if let Some(unit) = update.unit {
        item.unit = Set(unit.trim().to_string());
    }
    if let Some(category) = update.category {
        item.category = Set(category.trim().to_lowercase());
    }
    if let Some(barcode) = update.barcode {
        item.barcode = Set(non_empty(Some(barcode)));
    }
    if let Some(brand) = update.brand {
        item.brand = Set(non_empty(Some(brand)));
    }
    if let Some(date) = update.expiration_date {
        item.expiration_date = Set(Some(date));
    }
    if let Some(date) = update.purchase_date {
        item.purchase_date = Set(Some(date));
    }
    if let Some(location) = update.location {
        item.location = Set(location.trim().to_lowercase());
    }
    if let Some(notes) = update.notes {
        item.notes = Set(notes);
    }
    item.updated_at = Set(Utc::now());

    item.update(db).await.map_err(Into::into)
}

/// Removes an item.
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = InventoryItem::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::InventoryItemNotFound { id: item_id });
    }
    info!("Removed inventory item {item_id}");
    Ok(())
}

/// First stored item carrying `barcode`.
pub async fn find_by_barcode(
    db: &DatabaseConnection,
    barcode: &str,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find()
        .filter(InventoryItemColumn::Barcode.eq(barcode.trim()))
        .order_by_asc(InventoryItemColumn::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Checks each ingredient against inventory.
///
/// An item matches when its name contains the ingredient name
/// (case-insensitive) and its quantity is positive. Totals are only summed
/// across items whose units share a measurement family.
pub async fn check_availability(
    db: &DatabaseConnection,
    ingredients: &[String],
) -> Result<Vec<Availability>> {
    let stock = list_all_items(db).await?;

    Ok(ingredients
        .iter()
        .map(|ingredient| {
            let needle = ingredient.trim().to_lowercase();
            let items: Vec<inventory_item::Model> = stock
                .iter()
                .filter(|item| item.quantity > 0.0 && item.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            Availability {
                ingredient: ingredient.clone(),
                totals: sum_by_family(&items),
                items,
            }
        })
        .collect())
}

fn sum_by_family(items: &[inventory_item::Model]) -> Vec<StockTotal> {
    let mut sums: Vec<(UnitFamily, String, f64)> = Vec::new();
    for item in items {
        let normalized = units::normalize(item.quantity, &item.unit);
        match sums.iter_mut().find(|(family, _, _)| *family == normalized.family) {
            Some((_, _, base)) => *base += normalized.base_quantity,
            None => sums.push((
                normalized.family,
                units::canonical_unit(&item.unit),
                normalized.base_quantity,
            )),
        }
    }

    sums.into_iter()
        .map(|(_, unit, base)| StockTotal {
            quantity: units::round_for_display(units::from_base(base, &unit)),
            unit,
        })
        .collect()
}
