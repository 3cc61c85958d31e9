//! Ingredient aggregation across a week's meal plan.
//!
//! Each entry's recipe is scaled to the entry's servings and its ingredients are
//! summed per (name, unit family). Quantities are carried in the family's base
//! unit until the very end so repeated additions do not pick up conversion
//! error.

use super::{
    RecipeLookup, section,
    units::{self, UnitFamily},
};
use crate::entities::{MealPlanEntryModel, SkipReason, SkippedEntry};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One aggregated ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLine {
    /// Grouping key: trimmed, lowercased ingredient name
    pub key: String,
    /// Display name
    pub name: String,
    /// Measurement family every contribution belongs to
    pub family: UnitFamily,
    /// Display unit
    pub unit: String,
    /// Total in the family's base unit
    pub base_quantity: f64,
    /// First section hint, among contributing recipes, that names a known section
    pub declared_section: Option<String>,
    /// Distinct contributing recipe names, in order of first appearance
    pub from_recipes: Vec<String>,
}

impl AggregatedLine {
    /// Total expressed in the display unit, unrounded.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        units::from_base(self.base_quantity, &self.unit)
    }
}

/// Result of aggregating a week: the lines plus whatever had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Lines ordered by name (case-insensitive), then unit
    pub lines: Vec<AggregatedLine>,
    /// Entries or ingredients that could not be used
    pub skipped: Vec<SkippedEntry>,
}

/// Grouping key for an ingredient name.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Aggregates the ingredients of every entry's recipe, scaled by servings.
///
/// A dangling recipe reference or an unusable servings count skips that entry
/// and records why; the rest of the week is still aggregated.
///
/// Quantities, names and display units do not depend on entry order. The
/// declared section does: when contributing recipes name different known
/// sections, the one seen first while walking `entries` is kept.
pub fn aggregate<L: RecipeLookup + ?Sized>(
    entries: &[MealPlanEntryModel],
    recipes: &L,
) -> Aggregation {
    let mut groups: BTreeMap<(String, UnitFamily), AggregatedLine> = BTreeMap::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let skip = |reason| SkippedEntry {
            entry_id: entry.id,
            recipe_id: entry.recipe_id,
            reason,
        };

        let Some(recipe) = recipes.get(entry.recipe_id) else {
            warn!(
                "Meal plan entry {} references missing recipe {}, skipping",
                entry.id, entry.recipe_id
            );
            skipped.push(skip(SkipReason::RecipeNotFound));
            continue;
        };

        if recipe.recipe.servings <= 0 {
            warn!(
                "Recipe {} has base servings {}, skipping entry {}",
                recipe.recipe.id, recipe.recipe.servings, entry.id
            );
            skipped.push(skip(SkipReason::InvalidRecipeServings {
                servings: recipe.recipe.servings,
            }));
            continue;
        }

        if entry.servings <= 0 {
            warn!("Meal plan entry {} asks for {} servings, skipping", entry.id, entry.servings);
            skipped.push(skip(SkipReason::InvalidEntryServings {
                servings: entry.servings,
            }));
            continue;
        }

        let scale = f64::from(entry.servings) / f64::from(recipe.recipe.servings);
        debug!(
            "Entry {} uses '{}' scaled by {scale}",
            entry.id, recipe.recipe.name
        );

        for ingredient in &recipe.ingredients {
            if !ingredient.quantity.is_finite() || ingredient.quantity < 0.0 {
                skipped.push(skip(SkipReason::InvalidIngredientQuantity {
                    ingredient: ingredient.name.clone(),
                }));
                continue;
            }

            let key = name_key(&ingredient.name);
            let normalized = units::normalize(ingredient.quantity * scale, &ingredient.unit);
            let unit = units::canonical_unit(&ingredient.unit);
            let declared = ingredient
                .store_section
                .as_deref()
                .filter(|hint| section::recognize(Some(hint)).is_some());
            let display_name = ingredient.name.trim().to_string();

            let line = groups
                .entry((key.clone(), normalized.family.clone()))
                .or_insert_with(|| AggregatedLine {
                    key,
                    name: display_name.clone(),
                    family: normalized.family,
                    unit: unit.clone(),
                    base_quantity: 0.0,
                    declared_section: None,
                    from_recipes: Vec::new(),
                });

            line.base_quantity += normalized.base_quantity;
            if display_name < line.name {
                line.name = display_name;
            }
            if prefer_unit(&unit, &line.unit) {
                line.unit = unit;
            }
            if line.declared_section.is_none() {
                line.declared_section = declared.map(str::to_string);
            }
            if !line.from_recipes.contains(&recipe.recipe.name) {
                line.from_recipes.push(recipe.recipe.name.clone());
            }
        }
    }

    let mut lines: Vec<AggregatedLine> = groups.into_values().collect();
    lines.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.unit.cmp(&b.unit)));

    Aggregation { lines, skipped }
}

/// Display unit choice within a family: the largest unit wins, ties go to the
/// alphabetically first name. Independent of the order units are seen in.
fn prefer_unit(candidate: &str, current: &str) -> bool {
    let (cf, sf) = (units::factor(candidate), units::factor(current));
    cf > sf || (cf.total_cmp(&sf).is_eq() && candidate < current)
}
