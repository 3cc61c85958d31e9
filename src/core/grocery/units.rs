//! Unit normalization.
//!
//! Maps a free-text unit onto a measurement family and a factor into that
//! family's base unit (gram for weight, milliliter for volume, one item for
//! count). Units outside the vocabulary become a family of their own, keyed by
//! the cleaned unit text, so "3 cloves" can be added to "2 cloves" but never
//! to "1 sprig".

use std::fmt;

/// Grams per pound (exact by definition)
pub const GRAMS_PER_POUND: f64 = 453.592_37;
/// Grams per avoirdupois ounce (exact by definition)
pub const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
/// Milliliters per US cup
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per US tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per US teaspoon
pub const ML_PER_TSP: f64 = 4.928_92;
/// Milliliters per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;

/// Measurement family. Quantities can only be summed within one family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitFamily {
    /// Discrete items; base unit is one item
    Count,
    /// Mass; base unit is the gram
    Weight,
    /// Volume; base unit is the milliliter
    Volume,
    /// A unit outside the vocabulary, keyed by its cleaned text
    Other(String),
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("count"),
            Self::Weight => f.write_str("weight"),
            Self::Volume => f.write_str("volume"),
            Self::Other(unit) => write!(f, "'{unit}'"),
        }
    }
}

/// A recognized unit: its display name, family, and size in base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownUnit {
    /// Canonical display name (e.g. "cup" for "Cups")
    pub canonical: &'static str,
    /// Family the unit belongs to
    pub family: KnownFamily,
    /// How many base units one of this unit is
    pub factor: f64,
}

/// The three families with a conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFamily {
    /// Items
    Count,
    /// Grams
    Weight,
    /// Milliliters
    Volume,
}

impl From<KnownFamily> for UnitFamily {
    fn from(value: KnownFamily) -> Self {
        match value {
            KnownFamily::Count => Self::Count,
            KnownFamily::Weight => Self::Weight,
            KnownFamily::Volume => Self::Volume,
        }
    }
}

/// A quantity expressed in its family's base unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Family of the original unit
    pub family: UnitFamily,
    /// Quantity in grams, milliliters, items, or the unknown unit itself
    pub base_quantity: f64,
}

const fn unit(canonical: &'static str, family: KnownFamily, factor: f64) -> KnownUnit {
    KnownUnit {
        canonical,
        family,
        factor,
    }
}

/// Alias table. Lookups happen on the cleaned (trimmed, lowercased,
/// dot-stripped, single-spaced) unit text.
const VOCABULARY: &[(&[&str], KnownUnit)] = &[
    // Count
    (
        &["", "each", "ea", "whole"],
        unit("each", KnownFamily::Count, 1.0),
    ),
    (&["unit", "units"], unit("unit", KnownFamily::Count, 1.0)),
    (
        &["piece", "pieces", "pc", "pcs"],
        unit("piece", KnownFamily::Count, 1.0),
    ),
    (
        &["package", "packages", "pkg", "pkgs", "pack", "packs"],
        unit("package", KnownFamily::Count, 1.0),
    ),
    (&["bag", "bags"], unit("bag", KnownFamily::Count, 1.0)),
    (&["box", "boxes"], unit("box", KnownFamily::Count, 1.0)),
    (&["can", "cans", "tin", "tins"], unit("can", KnownFamily::Count, 1.0)),
    (&["bottle", "bottles"], unit("bottle", KnownFamily::Count, 1.0)),
    (&["dozen", "doz"], unit("dozen", KnownFamily::Count, 12.0)),
    // Weight
    (
        &["g", "gr", "gram", "grams", "gramme", "grammes"],
        unit("g", KnownFamily::Weight, 1.0),
    ),
    (
        &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"],
        unit("kg", KnownFamily::Weight, 1000.0),
    ),
    (
        &["mg", "milligram", "milligrams"],
        unit("mg", KnownFamily::Weight, 0.001),
    ),
    (
        &["oz", "ounce", "ounces"],
        unit("oz", KnownFamily::Weight, GRAMS_PER_OUNCE),
    ),
    (
        &["lb", "lbs", "pound", "pounds"],
        unit("lb", KnownFamily::Weight, GRAMS_PER_POUND),
    ),
    // Volume
    (
        &["ml", "milliliter", "milliliters", "millilitre", "millilitres"],
        unit("ml", KnownFamily::Volume, 1.0),
    ),
    (
        &["l", "liter", "liters", "litre", "litres"],
        unit("l", KnownFamily::Volume, 1000.0),
    ),
    (&["cup", "cups", "c"], unit("cup", KnownFamily::Volume, ML_PER_CUP)),
    (
        &["tbsp", "tbsps", "tbs", "tbl", "tablespoon", "tablespoons"],
        unit("tbsp", KnownFamily::Volume, ML_PER_TBSP),
    ),
    (
        &["tsp", "tsps", "teaspoon", "teaspoons"],
        unit("tsp", KnownFamily::Volume, ML_PER_TSP),
    ),
    (
        &["fl oz", "floz", "fluid ounce", "fluid ounces"],
        unit("fl oz", KnownFamily::Volume, ML_PER_FL_OZ),
    ),
    (
        &["pint", "pints", "pt"],
        unit("pint", KnownFamily::Volume, 473.176),
    ),
    (
        &["quart", "quarts", "qt"],
        unit("quart", KnownFamily::Volume, 946.353),
    ),
    (
        &["gallon", "gallons", "gal"],
        unit("gallon", KnownFamily::Volume, 3785.41),
    ),
];

/// Cleans unit text for lookup: trim, lowercase, drop dots, collapse spaces.
#[must_use]
pub fn clean_unit(unit: &str) -> String {
    unit.to_lowercase()
        .replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks a unit up in the vocabulary.
#[must_use]
pub fn lookup(unit: &str) -> Option<KnownUnit> {
    let cleaned = clean_unit(unit);
    VOCABULARY
        .iter()
        .find(|(aliases, _)| aliases.contains(&cleaned.as_str()))
        .map(|(_, known)| *known)
}

/// Family of a unit, without a quantity.
#[must_use]
pub fn family_of(unit: &str) -> UnitFamily {
    lookup(unit).map_or_else(|| UnitFamily::Other(clean_unit(unit)), |k| k.family.into())
}

/// Display name for a unit: canonical for known units, cleaned text otherwise.
#[must_use]
pub fn canonical_unit(unit: &str) -> String {
    lookup(unit).map_or_else(|| clean_unit(unit), |k| k.canonical.to_string())
}

/// Size of one `unit` in its family's base unit. Unknown units are their own base.
#[must_use]
pub fn factor(unit: &str) -> f64 {
    lookup(unit).map_or(1.0, |k| k.factor)
}

/// Converts a quantity into its family's base unit.
#[must_use]
pub fn normalize(quantity: f64, unit: &str) -> Normalized {
    match lookup(unit) {
        Some(known) => Normalized {
            family: known.family.into(),
            base_quantity: quantity * known.factor,
        },
        None => Normalized {
            family: UnitFamily::Other(clean_unit(unit)),
            base_quantity: quantity,
        },
    }
}

/// Converts a base quantity back into `unit`.
#[must_use]
pub fn from_base(base_quantity: f64, unit: &str) -> f64 {
    base_quantity / factor(unit)
}

/// Rounds a quantity for presentation (two decimals, no negative zero).
#[must_use]
pub fn round_for_display(quantity: f64) -> f64 {
    let rounded = (quantity * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_count_units_share_a_family() {
        for unit in ["each", "unit", "package", "Bags", "box", "cans", "bottle", ""] {
            assert_eq!(family_of(unit), UnitFamily::Count, "unit {unit:?}");
        }
        assert_eq!(normalize(2.0, "dozen").base_quantity, 24.0);
    }

    #[test]
    fn test_weight_converts_to_grams() {
        assert!(close(normalize(1.0, "lb").base_quantity, 453.592_37));
        assert!(close(normalize(2.0, "kg").base_quantity, 2000.0));
        assert!(close(normalize(16.0, "oz").base_quantity, 453.592_37));
        assert_eq!(normalize(500.0, "g").family, UnitFamily::Weight);
    }

    #[test]
    fn test_volume_converts_to_milliliters() {
        assert!(close(normalize(6.0, "cups").base_quantity, 1419.528));
        assert!(close(normalize(1.0, "Tbsp.").base_quantity, 14.7868));
        assert!(close(normalize(3.0, "tsp").base_quantity, 14.786_76));
        assert!(close(normalize(1.5, "liters").base_quantity, 1500.0));
        assert_eq!(family_of("fl. oz"), UnitFamily::Volume);
    }

    #[test]
    fn test_unknown_units_are_singleton_families() {
        let cloves = normalize(3.0, " Cloves ");
        assert_eq!(cloves.family, UnitFamily::Other("cloves".to_string()));
        assert_eq!(cloves.base_quantity, 3.0);
        assert_ne!(family_of("cloves"), family_of("sprigs"));
        assert_eq!(family_of("cloves"), family_of("CLOVES"));
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(canonical_unit("Cups"), "cup");
        assert_eq!(canonical_unit("pounds"), "lb");
        assert_eq!(canonical_unit("Medium"), "medium");
    }

    #[test]
    fn test_from_base_round_trips_through_display_unit() {
        let base = normalize(2.0, "cup").base_quantity + normalize(4.0, "cup").base_quantity;
        assert!(close(from_base(base, "cup"), 6.0));
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(5.999_999_999), 6.0);
        assert_eq!(round_for_display(1.234_9), 1.23);
        assert_eq!(round_for_display(-0.001), 0.0);
        assert!(round_for_display(-0.001).is_sign_positive());
    }
}
