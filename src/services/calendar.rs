use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use crate::domain::models::CalendarConfig;

/// Working-day calendar used to measure how much time is left before a
/// deadline.
#[derive(Debug, Clone)]
pub struct WorkingCalendar {
    skip_weekends: bool,
    holidays: HashSet<NaiveDate>,
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self::from_config(&CalendarConfig::default())
    }
}

impl WorkingCalendar {
    pub fn new(skip_weekends: bool, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            skip_weekends,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.skip_weekends, config.holidays.iter().copied())
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        !(self.skip_weekends && weekend) && !self.holidays.contains(&date)
    }

    /// Count working days after `start` up to and including `end`,
    /// stopping once `cap` is reached.
    ///
    /// Returns 0 when `end` is not after `start`.
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate, cap: u32) -> u32 {
        let mut days = 0;
        let mut current = start + Duration::days(1);
        while current <= end && days < cap {
            if self.is_working_day(current) {
                days += 1;
            }
            current += Duration::days(1);
        }
        days
    }
}
