//! Parsing helpers for free-text slash command options.

use crate::{
    core::week::WeekKey,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::str::FromStr;

/// Week from an optional `YYYY-MM-DD` Sunday; the current week when omitted.
pub fn week_or_current(week: Option<&str>) -> Result<WeekKey> {
    match week.map(str::trim).filter(|w| !w.is_empty()) {
        Some(text) => text.parse(),
        None => WeekKey::current(),
    }
}

/// Splits a comma-separated option into trimmed, non-empty parts.
#[must_use]
pub fn split_list(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parses every comma-separated part as `T`, failing on the first bad one.
pub fn parse_list<T: FromStr<Err = Error>>(text: Option<&str>) -> Result<Vec<T>> {
    split_list(text).iter().map(|part| part.parse()).collect()
}

/// Parses an optional enum option.
pub fn parse_optional<T: FromStr<Err = Error>>(text: Option<&str>) -> Result<Option<T>> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .transpose()
}

/// Parses an optional `YYYY-MM-DD` date.
pub fn parse_date(text: Option<&str>) -> Result<Option<NaiveDate>> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            NaiveDate::parse_from_str(t, "%Y-%m-%d").map_err(|e| Error::InvalidInput {
                message: format!("'{t}' is not a YYYY-MM-DD date: {e}"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{DietaryRestriction, GroceryMode};

    #[test]
    fn test_week_or_current() {
        assert_eq!(
            week_or_current(Some(" 2025-01-05 ")).unwrap().to_string(),
            "2025-01-05"
        );
        assert!(week_or_current(Some("2025-01-06")).is_err());
        assert!(week_or_current(None).is_ok());
        assert!(week_or_current(Some("")).is_ok());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some("eggs, milk ,,flour")),
            vec!["eggs".to_string(), "milk".to_string(), "flour".to_string()]
        );
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn test_parse_list_of_restrictions() {
        let parsed: Vec<DietaryRestriction> = parse_list(Some("vegan, nut-free")).unwrap();
        assert_eq!(
            parsed,
            vec![DietaryRestriction::Vegan, DietaryRestriction::NutFree]
        );
        assert!(parse_list::<DietaryRestriction>(Some("vegan, keto")).is_err());
    }

    #[test]
    fn test_parse_optional_and_date() {
        assert_eq!(
            parse_optional::<GroceryMode>(Some("Full")).unwrap(),
            Some(GroceryMode::Full)
        );
        assert_eq!(parse_optional::<GroceryMode>(None).unwrap(), None);
        assert!(parse_optional::<GroceryMode>(Some("partial")).is_err());

        assert_eq!(
            parse_date(Some("2025-02-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert!(matches!(
            parse_date(Some("tomorrow")),
            Err(Error::InvalidInput { .. })
        ));
    }
}
