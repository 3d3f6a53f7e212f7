//! UTC calendar days and day iteration.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::DayRangeError;

/// An inclusive range of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// First day (inclusive).
    pub first: NaiveDate,
    /// Last day (inclusive).
    pub last: NaiveDate,
}

impl DayRange {
    /// Creates a new day range, validating that first <= last.
    ///
    /// # Errors
    ///
    /// Returns an error if first > last.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Result<Self, DayRangeError> {
        if first > last {
            return Err(DayRangeError::InvalidRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// Creates a range covering a single day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            first: day,
            last: day,
        }
    }

    /// Returns an iterator over every day in the range.
    #[must_use]
    pub const fn days(&self) -> DayIterator {
        DayIterator {
            current: Some(self.first),
            last: self.last,
        }
    }

    /// Returns the number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.last - self.first).num_days() + 1) as usize
    }

    /// Returns true if the range contains the given day.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.first && day <= self.last
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

/// Iterator over the days of a [`DayRange`], one calendar day at a time.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.current.filter(|day| *day <= self.last)?;
        self.current = day.succ_opt();
        Some(day)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .current
            .filter(|day| *day <= self.last)
            .map_or(0, |day| (self.last - day).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayIterator {}

/// Truncates a millisecond timestamp to its UTC calendar day.
///
/// Returns `None` if the timestamp is outside the representable range.
#[must_use]
pub fn truncate_to_day(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Returns the UTC midnight of `day` in seconds since the Unix epoch.
#[must_use]
pub fn day_start_seconds(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp()
}
