//! Autocomplete handlers for Discord slash command parameters.
//!
//! Database-backed suggestions (recipe and member names) and fixed-vocabulary
//! suggestions (modes, meal slots, days, restrictions, sections) share one
//! matching rule: case-insensitive substring, at most 25 results.

use crate::{
    bot::BotData,
    core::{family, recipe},
    entities::{DayOfWeek, DietaryRestriction, FilterMode, GroceryMode, MealType, StoreSection},
    errors::Error,
};

/// Discord's autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Storage locations offered for inventory items
const LOCATIONS: [&str; 3] = ["pantry", "fridge", "freezer"];

/// Keeps the options that contain `partial`, case-insensitively.
#[must_use]
pub fn filter_suggestions<I, S>(options: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let partial_lower = partial.trim().to_lowercase();
    options
        .into_iter()
        .map(Into::into)
        .filter(|option: &String| option.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests recipe names.
pub async fn autocomplete_recipe_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(recipes) = recipe::list_recipes(db, &recipe::RecipeFilter::default()).await else {
        return Vec::new();
    };
    filter_suggestions(recipes.into_iter().map(|r| r.name), partial)
}

/// Suggests family member names.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(members) = family::list_family_members(db).await else {
        return Vec::new();
    };
    filter_suggestions(members.into_iter().map(|m| m.name), partial)
}

/// Suggests grocery modes.
pub async fn autocomplete_grocery_mode(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(GroceryMode::ALL.iter().map(|m| m.as_str()), partial)
}

/// Suggests dietary filter modes.
pub async fn autocomplete_filter_mode(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(FilterMode::ALL.iter().map(|m| m.as_str()), partial)
}

/// Suggests meal slots.
pub async fn autocomplete_meal_type(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(MealType::ALL.iter().map(|m| m.as_str()), partial)
}

/// Suggests days of the week.
pub async fn autocomplete_day(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(DayOfWeek::ALL.iter().map(|d| d.as_str()), partial)
}

/// Completes the last entry of a comma-separated list, keeping the entries
/// already typed.
#[must_use]
pub fn complete_list_entry<'a, I>(options: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let (done, last) = partial.rsplit_once(',').unwrap_or(("", partial));
    let prefix = if done.trim().is_empty() {
        String::new()
    } else {
        format!("{}, ", done.trim())
    };
    filter_suggestions(options, last)
        .into_iter()
        .map(|option| format!("{prefix}{option}"))
        .collect()
}

/// Suggests dietary restriction tags for a comma-separated list.
pub async fn autocomplete_restriction(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    complete_list_entry(DietaryRestriction::ALL.iter().map(|r| r.as_str()), partial)
}

/// Suggests inventory categories (the store sections).
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(StoreSection::ALL.iter().map(|s| s.as_str()), partial)
}

/// Suggests storage locations.
pub async fn autocomplete_location(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_suggestions(LOCATIONS, partial)
}
