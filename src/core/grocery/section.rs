//! Store-section classification.
//!
//! Classification only trusts what the recipe declared. There is no guessing
//! from the ingredient name, so the section of every line can be traced back to
//! a recipe.

use crate::entities::StoreSection;

/// Parses a declared section, returning `None` for missing or unrecognized text.
#[must_use]
pub fn recognize(declared: Option<&str>) -> Option<StoreSection> {
    declared.and_then(|text| text.parse().ok())
}

/// Picks the section for an ingredient.
///
/// The ingredient name is accepted for interface symmetry with callers that
/// log it; only the declared hint decides the result.
#[must_use]
pub fn classify(ingredient_name: &str, declared: Option<&str>) -> StoreSection {
    recognize(declared).unwrap_or_else(|| {
        tracing::trace!("No recognized section for '{ingredient_name}', using general");
        StoreSection::General
    })
}
