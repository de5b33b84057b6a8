use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AccumError, Result};

/// # Frequency
/// Fixing frequency of a structure. Determines both the spacing of the
/// fixing-date schedule and the step interval used when walking simulated
/// paths (252 trading days per year).
/// # Example
/// ```
/// use rustaccum::time::schedule::Frequency;
///
/// assert_eq!(Frequency::Daily.step_interval(), 1);
/// assert_eq!(Frequency::Weekly.step_interval(), 5);
/// assert_eq!(Frequency::Monthly.step_interval(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Number of simulated daily steps between consecutive fixings.
    pub fn step_interval(&self) -> usize {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 5,
            Frequency::Monthly => 21,
        }
    }
}

/// Weekday check, no holiday calendar.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Last weekday of the given month.
pub fn last_business_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    let mut date = first_of_next - Duration::days(1);
    while !is_business_day(date) {
        date -= Duration::days(1);
    }
    date
}

/// Generates the ordered fixing-date schedule for a structure.
///
/// * `Daily` - every business day in `[start, end]`, both ends inclusive.
/// * `Weekly` - every Friday in `[start, end]`.
/// * `Monthly` - the last business day of each month touched by the range,
///   filtered to `[start, end]`.
pub fn generate_schedule(
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
) -> Result<Vec<NaiveDate>> {
    if start > end {
        return Err(AccumError::InvalidRange(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }

    let mut dates = Vec::new();
    match frequency {
        Frequency::Daily => {
            let mut date = start;
            while date <= end {
                if is_business_day(date) {
                    dates.push(date);
                }
                date += Duration::days(1);
            }
        }
        Frequency::Weekly => {
            let mut date = start;
            while date.weekday() != Weekday::Fri {
                date += Duration::days(1);
            }
            while date <= end {
                dates.push(date);
                date += Duration::days(7);
            }
        }
        Frequency::Monthly => {
            let (mut year, mut month) = (start.year(), start.month());
            while (year, month) <= (end.year(), end.month()) {
                let date = last_business_day_of_month(year, month);
                if date >= start && date <= end {
                    dates.push(date);
                }
                if month == 12 {
                    year += 1;
                    month = 1;
                } else {
                    month += 1;
                }
            }
        }
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_schedule_is_weekdays_only() -> Result<()> {
        let dates = generate_schedule(date(2024, 1, 1), date(2024, 1, 31), Frequency::Daily)?;
        assert_eq!(dates.len(), 23);
        assert!(dates.iter().all(|d| is_business_day(*d)));
        assert_eq!(dates.first().copied(), Some(date(2024, 1, 1)));
        assert_eq!(dates.last().copied(), Some(date(2024, 1, 31)));
        Ok(())
    }

    #[test]
    fn test_schedule_is_sorted_and_bounded() -> Result<()> {
        let start = date(2023, 3, 15);
        let end = date(2024, 3, 15);
        for freq in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            let dates = generate_schedule(start, end, freq)?;
            assert!(dates.windows(2).all(|w| w[0] < w[1]));
            assert!(dates.iter().all(|d| *d >= start && *d <= end));
            let unique: HashSet<_> = dates.iter().collect();
            assert_eq!(unique.len(), dates.len());
        }
        Ok(())
    }

    #[test]
    fn test_weekly_schedule_is_fridays() -> Result<()> {
        let dates = generate_schedule(date(2024, 1, 1), date(2024, 2, 29), Frequency::Weekly)?;
        assert!(!dates.is_empty());
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Fri));
        assert_eq!(dates[0], date(2024, 1, 5));
        Ok(())
    }

    #[test]
    fn test_monthly_schedule_one_per_month() -> Result<()> {
        let dates = generate_schedule(date(2024, 1, 1), date(2024, 6, 30), Frequency::Monthly)?;
        assert_eq!(dates.len(), 6);
        // 2024-03-31 is a Sunday, so March rolls back to Friday the 29th.
        assert_eq!(dates[2], date(2024, 3, 29));
        let months: HashSet<_> = dates.iter().map(|d| (d.year(), d.month())).collect();
        assert_eq!(months.len(), dates.len());
        Ok(())
    }

    #[test]
    fn test_inverted_range_fails() {
        let result = generate_schedule(date(2024, 2, 1), date(2024, 1, 1), Frequency::Daily);
        assert!(matches!(result, Err(AccumError::InvalidRange(_))));
    }
}
