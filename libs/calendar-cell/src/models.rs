use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Previous,
    Next,
}

/// Options a booking calendar is created with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Earliest bookable day, normally today.
    pub min_date: NaiveDate,
    /// How many days past `min_date` remain bookable.
    pub max_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub selectable: bool,
    pub selected: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    /// `YYYY-MM`
    pub month: String,
    pub min_selectable: NaiveDate,
    pub max_selectable: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub can_navigate_previous: bool,
    pub can_navigate_next: bool,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub month: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_days: Option<i64>,
    pub selected: Option<NaiveDate>,
}

/// Screen-space rectangle occupied by an open picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn contains(&self, point: PointerEvent) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}
