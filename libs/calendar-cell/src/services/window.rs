use chrono::{DateTime, Days, Months, NaiveDate, TimeZone};
use tracing::debug;

use crate::models::{CalendarConfig, CalendarDay, MonthView, NavigationDirection};
use crate::services::grid::{compute_visible_days, month_end, month_start, VisibleDays};

/// Last bookable day for a window of `window_days` starting at `min_selectable`.
/// Negative windows are treated as zero.
pub fn max_selectable(min_selectable: NaiveDate, window_days: i64) -> NaiveDate {
    let days = u64::try_from(window_days).unwrap_or(0);
    min_selectable
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

pub fn is_selectable(date: NaiveDate, min_selectable: NaiveDate, max_selectable: NaiveDate) -> bool {
    min_selectable <= date && date <= max_selectable
}

/// Same as [`is_selectable`] for a timestamp, judged by its calendar day in its
/// own time zone.
pub fn is_selectable_at<Tz: TimeZone>(
    at: &DateTime<Tz>,
    min_selectable: NaiveDate,
    max_selectable: NaiveDate,
) -> bool {
    is_selectable(at.date_naive(), min_selectable, max_selectable)
}

pub fn can_navigate(
    direction: NavigationDirection,
    visible_month: NaiveDate,
    min_selectable: NaiveDate,
    max_selectable: NaiveDate,
) -> bool {
    let current = month_start(visible_month);
    let adjacent = match direction {
        NavigationDirection::Previous => current.checked_sub_months(Months::new(1)),
        NavigationDirection::Next => current.checked_add_months(Months::new(1)),
    };

    adjacent.is_some_and(|first| month_intersects(first, min_selectable, max_selectable))
}

fn month_intersects(month: NaiveDate, min_selectable: NaiveDate, max_selectable: NaiveDate) -> bool {
    month_start(month) <= max_selectable && month_end(month) >= min_selectable
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD` from the local calendar fields of `at`. The timestamp is never
/// converted to UTC first, so a late-evening selection keeps its day.
pub fn canonical_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format_date(at.date_naive())
}

/// State behind a booking calendar: the bookable window, the month on screen
/// and the chosen day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    min_selectable: NaiveDate,
    max_selectable: NaiveDate,
    visible_month: NaiveDate,
    selected_date: Option<NaiveDate>,
}

impl CalendarWindow {
    pub fn new(min_date: NaiveDate, window_days: i64) -> Self {
        Self {
            min_selectable: min_date,
            max_selectable: max_selectable(min_date, window_days),
            visible_month: month_start(min_date),
            selected_date: None,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.min_date, config.max_days)
    }

    pub fn min_selectable(&self) -> NaiveDate {
        self.min_selectable
    }

    pub fn max_selectable(&self) -> NaiveDate {
        self.max_selectable
    }

    /// First day of the month on screen.
    pub fn visible_month(&self) -> NaiveDate {
        self.visible_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        is_selectable(date, self.min_selectable, self.max_selectable)
    }

    pub fn can_navigate(&self, direction: NavigationDirection) -> bool {
        can_navigate(direction, self.visible_month, self.min_selectable, self.max_selectable)
    }

    /// Moves one month in `direction` if that month still has bookable days.
    pub fn navigate(&mut self, direction: NavigationDirection) -> bool {
        if !self.can_navigate(direction) {
            debug!("Navigation {:?} from {} blocked by booking window", direction, self.visible_month);
            return false;
        }

        let moved = match direction {
            NavigationDirection::Previous => self.visible_month.checked_sub_months(Months::new(1)),
            NavigationDirection::Next => self.visible_month.checked_add_months(Months::new(1)),
        };

        match moved {
            Some(month) => {
                self.visible_month = month;
                true
            }
            None => false,
        }
    }

    /// Jumps straight to the month containing `month`, provided it overlaps the window.
    pub fn show_month(&mut self, month: NaiveDate) -> bool {
        if !month_intersects(month, self.min_selectable, self.max_selectable) {
            return false;
        }
        self.visible_month = month_start(month);
        true
    }

    /// Selects `date` and returns its canonical form, or leaves the state
    /// untouched and returns `None` when the date is outside the window.
    pub fn select_date(&mut self, date: NaiveDate) -> Option<String> {
        if !self.is_selectable(date) {
            debug!("Ignoring selection of {} outside {}..={}", date, self.min_selectable, self.max_selectable);
            return None;
        }
        self.selected_date = Some(date);
        Some(format_date(date))
    }

    pub fn visible_days(&self) -> VisibleDays {
        compute_visible_days(self.visible_month)
    }

    pub fn days(&self, today: NaiveDate) -> Vec<CalendarDay> {
        let month_first = self.visible_month;
        let month_last = month_end(month_first);

        self.visible_days()
            .map(|date| CalendarDay {
                date,
                in_month: month_first <= date && date <= month_last,
                selectable: self.is_selectable(date),
                selected: self.selected_date == Some(date),
                is_today: date == today,
            })
            .collect()
    }

    pub fn month_view(&self, today: NaiveDate) -> MonthView {
        MonthView {
            month: self.visible_month.format("%Y-%m").to_string(),
            min_selectable: self.min_selectable,
            max_selectable: self.max_selectable,
            selected_date: self.selected_date,
            can_navigate_previous: self.can_navigate(NavigationDirection::Previous),
            can_navigate_next: self.can_navigate(NavigationDirection::Next),
            days: self.days(today),
        }
    }
}
