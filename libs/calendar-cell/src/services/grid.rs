use std::iter::FusedIterator;

use chrono::{Datelike, Days, Months, NaiveDate};

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Parses a `YYYY-MM` month into its first day.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}

/// Days shown in a month grid, Sunday-aligned rows. Cheap to clone; every call
/// to [`compute_visible_days`] starts a fresh pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleDays {
    start: NaiveDate,
    end: NaiveDate,
    next: Option<NaiveDate>,
}

impl VisibleDays {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of week rows in the full grid (4 to 6).
    pub fn rows(&self) -> usize {
        self.total_days() / 7
    }

    fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }
}

impl Iterator for VisibleDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end { current.succ_opt() } else { None };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|next| ((self.end - next).num_days() + 1) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VisibleDays {}

impl FusedIterator for VisibleDays {}

/// Grid for the month containing `visible_month`: from the Sunday on or before
/// the 1st through the Saturday on or after the last day.
pub fn compute_visible_days(visible_month: NaiveDate) -> VisibleDays {
    let first = month_start(visible_month);
    let last = month_end(visible_month);

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());

    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(NaiveDate::MIN);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(NaiveDate::MAX);

    VisibleDays {
        start,
        end,
        next: Some(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_grid_shape(month: NaiveDate) {
        let days: Vec<NaiveDate> = compute_visible_days(month).collect();

        assert_eq!(days.len() % 7, 0, "grid for {} is not whole weeks", month);
        assert_eq!(days.first().unwrap().weekday(), Weekday::Sun);
        assert_eq!(days.last().unwrap().weekday(), Weekday::Sat);
        assert!(days.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));

        let mut day = month_start(month);
        while day <= month_end(month) {
            assert!(days.contains(&day), "{} missing from grid", day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_grid_shape_across_years() {
        for year in [2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                assert_grid_shape(date(year, month, 15));
            }
        }
    }

    #[test]
    fn test_january_2024_grid() {
        // Jan 1 2024 is a Monday, Jan 31 a Wednesday.
        let grid = compute_visible_days(date(2024, 1, 20));
        assert_eq!(grid.start(), date(2023, 12, 31));
        assert_eq!(grid.end(), date(2024, 2, 3));
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn test_six_row_month() {
        // Sep 2024 starts on a Sunday; Jun 2024 starts on a Saturday.
        assert_eq!(compute_visible_days(date(2024, 9, 1)).rows(), 5);
        assert_eq!(compute_visible_days(date(2024, 6, 1)).rows(), 6);
        assert_eq!(compute_visible_days(date(2024, 3, 1)).rows(), 6);
    }

    #[test]
    fn test_four_row_february() {
        // Feb 2015: 28 days starting on a Sunday.
        let grid = compute_visible_days(date(2015, 2, 10));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.start(), date(2015, 2, 1));
        assert_eq!(grid.end(), date(2015, 2, 28));
    }

    #[test]
    fn test_leap_february() {
        let days: Vec<NaiveDate> = compute_visible_days(date(2024, 2, 1)).collect();
        assert!(days.contains(&date(2024, 2, 29)));
        assert_eq!(month_end(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(month_end(date(2024, 2, 1)), date(2024, 2, 29));
    }

    #[test]
    fn test_sequence_is_restartable() {
        let grid = compute_visible_days(date(2024, 5, 1));
        let first_pass: Vec<_> = grid.clone().collect();
        let second_pass: Vec<_> = grid.collect();
        assert_eq!(first_pass, second_pass);

        let mut partial = compute_visible_days(date(2024, 5, 1));
        partial.next();
        assert_eq!(partial.len(), first_pass.len() - 1);
        assert_eq!(compute_visible_days(date(2024, 5, 1)).count(), first_pass.len());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-02"), Some(date(2024, 2, 1)));
        assert_eq!(parse_month(" 2024-12 "), Some(date(2024, 12, 1)));
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("february"), None);
    }
}
