//! Grocery list formatting.
//!
//! Turns a stored list into plain text grouped under section headings. The bot
//! layer only adds Discord-specific decoration around this output.

use crate::entities::{GroceryItem, GroceryMode, StoreSection, grocery_list};
use std::fmt::Write;

/// Formats a quantity without trailing zeros ("6", "1.5", "0.33").
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    let text = format!("{quantity:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Title-cased section heading.
#[must_use]
pub fn section_heading(section: StoreSection) -> String {
    let name = section.as_str();
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// One list line, e.g. `6 cup flour [Pancakes]` or `2 each egg (have 12) [Pancakes]`.
pub fn format_item(item: &GroceryItem) -> Result<String, std::fmt::Error> {
    let mut line = format!(
        "{} {} {}",
        format_quantity(item.total_quantity),
        item.unit,
        item.ingredient_name
    );
    if let Some(on_hand) = item.on_hand {
        write!(line, " (have {})", format_quantity(on_hand))?;
    }
    if !item.from_recipes.is_empty() {
        write!(line, " [{}]", item.from_recipes.join(", "))?;
    }
    Ok(line)
}

/// Renders a whole list: section headings with their items, then skipped entries.
pub fn format_grocery_list(list: &grocery_list::Model) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let mode = match list.mode {
        GroceryMode::Shortfall => "to buy",
        GroceryMode::Full => "full list",
    };
    writeln!(out, "Week of {} ({mode})", list.week_start_date)?;

    if list.items.0.is_empty() {
        writeln!(out, "Nothing to buy.")?;
    }

    let mut current: Option<StoreSection> = None;
    for item in &list.items.0 {
        if current != Some(item.store_section) {
            current = Some(item.store_section);
            writeln!(out, "\n{}", section_heading(item.store_section))?;
        }
        writeln!(out, "• {}", format_item(item)?)?;
    }

    if !list.skipped.0.is_empty() {
        writeln!(out, "\nSkipped:")?;
        for skipped in &list.skipped.0 {
            writeln!(out, "• {skipped}")?;
        }
    }

    Ok(out)
}
