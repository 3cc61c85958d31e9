//! JSON-backed list columns.
//!
//! Set-valued fields (tags, restrictions, instruction steps, grocery items) are
//! stored as a single JSON column per row rather than in join tables, so a row
//! reads back as one self-contained document.

use super::enums::{DietaryRestriction, MealType};
use super::grocery_list::{GroceryItem, SkippedEntry};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of free-text strings (tags, ingredient names, instruction steps)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

/// Dietary restriction tags
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct RestrictionList(pub Vec<DietaryRestriction>);

/// Meal type tags
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MealTypeList(pub Vec<MealType>);

/// Items of a generated grocery list, in display order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct GroceryItemList(pub Vec<GroceryItem>);

/// Meal plan entries a generation had to skip, with reasons
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SkippedEntryList(pub Vec<SkippedEntry>);

impl StringList {
    /// Builds a list from trimmed, non-empty, case-insensitively distinct values.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if !out.iter().any(|v| v.eq_ignore_ascii_case(trimmed)) {
                out.push(trimmed.to_string());
            }
        }
        Self(out)
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.0.iter().any(|v| v.eq_ignore_ascii_case(needle))
    }
}

impl RestrictionList {
    /// Builds a deduplicated list, keeping first occurrence order.
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = DietaryRestriction>>(values: I) -> Self {
        let mut out = Vec::new();
        for value in values {
            if !out.contains(&value) {
                out.push(value);
            }
        }
        Self(out)
    }
}

impl MealTypeList {
    /// Builds a deduplicated list, keeping first occurrence order.
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = MealType>>(values: I) -> Self {
        let mut out = Vec::new();
        for value in values {
            if !out.contains(&value) {
                out.push(value);
            }
        }
        Self(out)
    }
}
