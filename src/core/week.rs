//! Week keys.
//!
//! A week is identified by the date of its Sunday. Meal plans and grocery
//! lists are keyed by it.

use crate::{
    entities::DayOfWeek,
    errors::{Error, Result},
};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use std::{fmt, str::FromStr};

/// Date format accepted and produced for week keys
pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

/// The Sunday that starts a planning week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Wraps a date, rejecting anything that is not a Sunday.
    pub fn new(date: NaiveDate) -> Result<Self> {
        if date.weekday() == Weekday::Sun {
            Ok(Self(date))
        } else {
            Err(Error::InvalidWeekKey {
                value: date.format(WEEK_KEY_FORMAT).to_string(),
                reason: format!("{} is not a Sunday", date.weekday()),
            })
        }
    }

    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        let back = u64::from(date.weekday().num_days_from_sunday());
        date.checked_sub_days(Days::new(back))
            .map(Self)
            .ok_or_else(|| Error::InvalidWeekKey {
                value: date.format(WEEK_KEY_FORMAT).to_string(),
                reason: "date is out of range".to_string(),
            })
    }

    /// The week containing today's local date.
    pub fn current() -> Result<Self> {
        Self::containing(Local::now().date_naive())
    }

    /// The Sunday itself.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Calendar date of `day` within this week.
    #[must_use]
    pub fn day(self, day: DayOfWeek) -> NaiveDate {
        let offset = day.days_from_sunday();
        self.0
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(self.0)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WEEK_KEY_FORMAT))
    }
}

impl FromStr for WeekKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, WEEK_KEY_FORMAT).map_err(|e| {
            Error::InvalidWeekKey {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::new(date).map_err(|_| Error::InvalidWeekKey {
            value: s.to_string(),
            reason: format!("{} is not a Sunday", date.weekday()),
        })
    }
}

impl From<WeekKey> for NaiveDate {
    fn from(value: WeekKey) -> Self {
        value.0
    }
}
