//! Incremental update of a cached series.

use chrono::{DateTime, NaiveTime, Utc};
use elokline_aggregate::DailyBar;
use elokline_types::DayRange;

/// Returns the instant from which games must be fetched to extend `bars`.
///
/// This is UTC midnight of the day after the last cached bar. The last cached
/// day is never fetched again: if it was cached before the day ended, games
/// played later that day are missing from the series for good.
#[must_use]
pub fn resume_since(bars: &[DailyBar]) -> Option<DateTime<Utc>> {
    let next = bars.last()?.day()?.succ_opt()?;
    Some(next.and_time(NaiveTime::MIN).and_utc())
}

/// Appends freshly aggregated bars to a cached series.
///
/// Days between the end of the cache and the first fresh bar are
/// forward-filled at the cached close. Fresh bars overlapping cached days
/// are kept as they are and reported.
#[must_use]
pub fn merge(cached: Vec<DailyBar>, fresh: Vec<DailyBar>) -> Vec<DailyBar> {
    let (Some(last), Some(first)) = (cached.last().copied(), fresh.first().copied()) else {
        let mut merged = cached;
        merged.extend(fresh);
        return merged;
    };

    let overlap = fresh.iter().filter(|bar| bar.time <= last.time).count();
    if overlap > 0 {
        tracing::warn!(overlap, "fresh bars overlap the cached series");
    }

    let mut merged = cached;
    if let (Some(last_day), Some(first_day)) = (last.day(), first.day()) {
        let gap = last_day
            .succ_opt()
            .zip(first_day.pred_opt())
            .and_then(|(from, to)| DayRange::new(from, to).ok());
        if let Some(gap) = gap {
            tracing::debug!(days = gap.total_days(), "filling days between cache and fresh bars");
            merged.extend(gap.days().map(|day| DailyBar::flat(day, last.close)));
        }
    }
    merged.extend(fresh);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn played(d: u32, open: f64, close: f64) -> DailyBar {
        DailyBar {
            open,
            close,
            high: open.max(close),
            low: open.min(close),
            game_count: Some(1),
            ..DailyBar::flat(day(d), open)
        }
    }

    #[test]
    fn test_resume_since_is_next_midnight() {
        let bars = vec![played(1, 1500.0, 1510.0), played(2, 1510.0, 1505.0)];
        assert_eq!(
            resume_since(&bars),
            Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_resume_since_does_not_revisit_last_day() {
        // A bar cached mid-day still moves the resume point past that day.
        let bars = vec![played(5, 1500.0, 1510.0)];
        let since = resume_since(&bars).unwrap();
        assert!(since > Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_resume_since_empty() {
        assert_eq!(resume_since(&[]), None);
    }

    #[test]
    fn test_merge_adjacent() {
        let cached = vec![played(1, 1500.0, 1510.0)];
        let fresh = vec![played(2, 1510.0, 1520.0)];

        let merged = merge(cached, fresh);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].close, 1520.0);
    }

    #[test]
    fn test_merge_fills_gap() {
        let cached = vec![played(1, 1500.0, 1510.0)];
        let fresh = vec![played(4, 1510.0, 1490.0)];

        let merged = merge(cached, fresh);
        let days: Vec<_> = merged.iter().filter_map(DailyBar::day).collect();
        assert_eq!(days, vec![day(1), day(2), day(3), day(4)]);

        assert!(merged[1].is_synthetic());
        assert_eq!(merged[2].open, 1510.0);
        assert_eq!(merged[2].low, 1510.0);
    }

    #[test]
    fn test_merge_keeps_overlap() {
        let cached = vec![played(1, 1500.0, 1510.0), played(2, 1510.0, 1515.0)];
        let fresh = vec![played(2, 1515.0, 1520.0)];

        let merged = merge(cached, fresh);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_with_empty_side() {
        let bars = vec![played(1, 1500.0, 1510.0)];
        assert_eq!(merge(Vec::new(), bars.clone()), bars);
        assert_eq!(merge(bars.clone(), Vec::new()), bars);
    }
}
