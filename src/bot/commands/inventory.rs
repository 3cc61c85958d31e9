//! Inventory Discord commands - stock management, barcode lookup and
//! availability checks.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, parsing, reply_error, say_chunked},
        core::{
            barcode::{self, ProductSource},
            grocery::report::format_quantity,
            inventory::{
                self, DEFAULT_CATEGORY, DEFAULT_LOCATION, InventoryQuery, InventoryUpdate,
                NewInventoryItem,
            },
        },
        entities::inventory_item,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    fn describe_item(item: &inventory_item::Model) -> Result<String> {
        let mut line = format!(
            "`#{}` {} {} {}",
            item.id,
            format_quantity(item.quantity),
            item.unit,
            item.name
        );
        if let Some(brand) = &item.brand {
            write!(line, " ({brand})")?;
        }
        write!(line, " - {}, {}", item.category, item.location)?;
        if let Some(expires) = item.expiration_date {
            write!(line, ", expires {expires}")?;
        }
        Ok(line)
    }

    /// Parent command for household inventory.
    #[poise::command(
        slash_command,
        subcommands(
            "inventory_add",
            "inventory_list",
            "inventory_update",
            "inventory_remove",
            "inventory_barcode",
            "inventory_check"
        )
    )]
    pub async fn inventory(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Inventory command. Available subcommands:\n\
            `/inventory add` - Add an item\n\
            `/inventory list` - List items, optionally filtered\n\
            `/inventory update` - Change an item's quantity, unit, location, expiry or notes\n\
            `/inventory remove` - Remove an item\n\
            `/inventory barcode` - Look up a product by barcode\n\
            `/inventory check` - Check whether ingredients are in stock";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds an item to the household inventory.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn inventory_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item name (e.g., 'eggs')"] name: String,
        #[description = "Quantity on hand"] quantity: f64,
        #[description = "Unit (e.g., 'each', 'g', 'cup')"] unit: String,
        #[description = "Category (store section). Defaults to general."]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Where it is stored. Defaults to pantry."]
        #[autocomplete = "autocomplete::autocomplete_location"]
        location: Option<String>,
        #[description = "Expiration date (YYYY-MM-DD)"] expires: Option<String>,
        #[description = "Product barcode"] barcode: Option<String>,
        #[description = "Brand"] brand: Option<String>,
    ) -> Result<()> {
        let expiration_date = match parsing::parse_date(expires.as_deref()) {
            Ok(date) => date,
            Err(e) => return reply_error(ctx, e).await,
        };
        let barcode = match barcode.as_deref().map(barcode::validate_barcode).transpose() {
            Ok(code) => code,
            Err(e) => return reply_error(ctx, e).await,
        };

        let new = NewInventoryItem {
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            expiration_date,
            purchase_date: Some(chrono::Local::now().date_naive()),
            barcode,
            brand,
            ..NewInventoryItem::new(name, quantity, unit)
        };

        let db = &ctx.data().database;
        match inventory::create_item(db, new).await {
            Ok(item) => {
                ctx.say(format!("✅ Added {}", describe_item(&item)?)).await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Lists inventory items, optionally filtered.
    #[poise::command(slash_command, rename = "list")]
    pub async fn inventory_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Only this location"]
        #[autocomplete = "autocomplete::autocomplete_location"]
        location: Option<String>,
        #[description = "Text to search in names, brands and notes"] search: Option<String>,
        #[description = "Only items expiring soon"] expiring_soon: Option<bool>,
    ) -> Result<()> {
        let expiring_within_days = expiring_soon.unwrap_or(false).then(|| {
            u64::try_from(ctx.data().config.inventory.expiring_soon_days).unwrap_or_default()
        });
        let query = InventoryQuery {
            category,
            location,
            search,
            expiring_within_days,
        };

        let db = &ctx.data().database;
        let today = chrono::Local::now().date_naive();
        let items = inventory::list_items(db, &query, today).await?;

        if items.is_empty() {
            ctx.say("📊 No inventory items found. Add one with `/inventory add`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📊 **Inventory** ({} items)\n", items.len());
        for item in &items {
            writeln!(response, "• {}", describe_item(item)?)?;
        }
        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Updates an inventory item. Omitted fields stay as they are.
    #[poise::command(slash_command, rename = "update")]
    pub async fn inventory_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item id (from /inventory list)"] id: i64,
        #[description = "New quantity"] quantity: Option<f64>,
        #[description = "New unit"] unit: Option<String>,
        #[description = "New location"]
        #[autocomplete = "autocomplete::autocomplete_location"]
        location: Option<String>,
        #[description = "New expiration date (YYYY-MM-DD)"] expires: Option<String>,
        #[description = "New notes"] notes: Option<String>,
    ) -> Result<()> {
        let expiration_date = match parsing::parse_date(expires.as_deref()) {
            Ok(date) => date,
            Err(e) => return reply_error(ctx, e).await,
        };
        let update = InventoryUpdate {
            quantity,
            unit,
            location,
            expiration_date,
            notes,
            ..Default::default()
        };

        let db = &ctx.data().database;
        match inventory::update_item(db, id, update).await {
            Ok(item) => {
                ctx.say(format!("✅ Updated {}", describe_item(&item)?)).await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Removes an inventory item.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn inventory_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item id (from /inventory list)"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match inventory::delete_item(db, id).await {
            Ok(()) => {
                ctx.say(format!("✅ Removed inventory item #{id}.")).await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Looks up a product by barcode: known inventory first, then Open Food Facts.
    #[poise::command(slash_command, rename = "barcode")]
    pub async fn inventory_barcode(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Barcode digits (8 to 14)"] code: String,
    ) -> Result<()> {
        let data = ctx.data();
        let product = match barcode::lookup_barcode(&data.database, &data.barcode, &code).await {
            Ok(product) => product,
            Err(e) => return reply_error(ctx, e).await,
        };

        let source = match product.source {
            ProductSource::Inventory => "already in inventory",
            ProductSource::OpenFoodFacts => "Open Food Facts",
            ProductSource::Fallback => "not found, edit the name when adding",
        };

        let mut response = String::new();
        writeln!(response, "🔎 **{}** ({source})", product.name)?;
        if let Some(brand) = &product.brand {
            writeln!(response, "Brand: {brand}")?;
        }
        writeln!(response, "Category: {}", product.category)?;
        writeln!(response, "Suggested unit: {}", product.unit)?;
        writeln!(response, "Barcode: {}", product.barcode)?;

        ctx.say(response).await?;
        Ok(())
    }

    /// Checks whether ingredients are in stock.
    #[poise::command(slash_command, rename = "check")]
    pub async fn inventory_check(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Comma-separated ingredient names"] ingredients: String,
    ) -> Result<()> {
        let names = parsing::split_list(Some(&ingredients));
        if names.is_empty() {
            ctx.say("❌ List at least one ingredient.").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let availability = inventory::check_availability(db, &names).await?;

        let mut response = String::new();
        for entry in &availability {
            if entry.is_available() {
                let totals: Vec<String> = entry
                    .totals
                    .iter()
                    .map(|t| format!("{} {}", format_quantity(t.quantity), t.unit))
                    .collect();
                writeln!(response, "✅ {}: {}", entry.ingredient, totals.join(", "))?;
            } else {
                writeln!(response, "❌ {}: not in stock", entry.ingredient)?;
            }
        }
        say_chunked(ctx, &response).await?;
        Ok(())
    }
}

pub use inner::*;
