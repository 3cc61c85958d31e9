//! Closed enumerations shared by the entities.
//!
//! Every enum round-trips through a lowercase `snake_case` string, both as a
//! database column (via `DeriveActiveEnum`) and inside JSON columns (via serde).
//! Parsing user input goes through `FromStr`, which rejects anything outside the
//! set with [`Error::InvalidMode`] instead of silently falling back to a default.

use crate::errors::Error;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Implements `as_str`, `Display` and `FromStr` for a unit-only enum from a
/// `variant => "text"` table.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical lowercase name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| Error::InvalidMode {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Dietary restriction tags carried by family members and recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    /// No gluten
    GlutenFree,
    /// No dairy
    DairyFree,
    /// No added sugar
    NoAddedSugar,
    /// Fish but no other meat
    Pescatarian,
    /// Meat-centric
    Carnivore,
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// No nuts
    NutFree,
    /// No soy
    SoyFree,
    /// No eggs
    EggFree,
}

string_enum!(DietaryRestriction, "dietary restriction", {
    GlutenFree => "gluten_free",
    DairyFree => "dairy_free",
    NoAddedSugar => "no_added_sugar",
    Pescatarian => "pescatarian",
    Carnivore => "carnivore",
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    NutFree => "nut_free",
    SoyFree => "soy_free",
    EggFree => "egg_free",
});

/// Meal slot within a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast
    #[sea_orm(string_value = "breakfast")]
    Breakfast,
    /// Lunch
    #[sea_orm(string_value = "lunch")]
    Lunch,
    /// Dinner
    #[sea_orm(string_value = "dinner")]
    Dinner,
    /// Snack
    #[sea_orm(string_value = "snack")]
    Snack,
}

string_enum!(MealType, "meal type", {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

/// Day within a planning week. Weeks start on Sunday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Sunday, first day of the week
    #[sea_orm(string_value = "sunday")]
    Sunday,
    /// Monday
    #[sea_orm(string_value = "monday")]
    Monday,
    /// Tuesday
    #[sea_orm(string_value = "tuesday")]
    Tuesday,
    /// Wednesday
    #[sea_orm(string_value = "wednesday")]
    Wednesday,
    /// Thursday
    #[sea_orm(string_value = "thursday")]
    Thursday,
    /// Friday
    #[sea_orm(string_value = "friday")]
    Friday,
    /// Saturday
    #[sea_orm(string_value = "saturday")]
    Saturday,
}

string_enum!(DayOfWeek, "day of week", {
    Sunday => "sunday",
    Monday => "monday",
    Tuesday => "tuesday",
    Wednesday => "wednesday",
    Thursday => "thursday",
    Friday => "friday",
    Saturday => "saturday",
});

impl DayOfWeek {
    /// Offset from the Sunday that starts the week (Sunday = 0).
    #[must_use]
    pub const fn days_from_sunday(self) -> u32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }
}

/// Shopping-aisle category used to group a grocery list.
///
/// Declaration order is the order sections appear on a generated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreSection {
    /// Fruit and vegetables
    Produce,
    /// Meat counter
    Meat,
    /// Fish counter
    Fish,
    /// Dairy case
    Dairy,
    /// Dry goods, cans, oils
    Pantry,
    /// Freezer aisle
    Frozen,
    /// Spices and seasonings
    Spices,
    /// Everything else
    General,
}

string_enum!(StoreSection, "store section", {
    Produce => "produce",
    Meat => "meat",
    Fish => "fish",
    Dairy => "dairy",
    Pantry => "pantry",
    Frozen => "frozen",
    Spices => "spices",
    General => "general",
});

/// How a set of requested dietary restrictions is matched against a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// The recipe must comply with every requested restriction
    #[default]
    Strict,
    /// The recipe must comply with at least one requested restriction
    Flexible,
}

string_enum!(FilterMode, "filter mode", {
    Strict => "strict",
    Flexible => "flexible",
});

/// How a grocery list treats on-hand inventory.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum GroceryMode {
    /// Subtract inventory and list only what must be bought
    #[default]
    #[sea_orm(string_value = "shortfall")]
    Shortfall,
    /// Keep every required line and annotate what is on hand
    #[sea_orm(string_value = "full")]
    Full,
}

string_enum!(GroceryMode, "grocery mode", {
    Shortfall => "shortfall",
    Full => "full",
});
