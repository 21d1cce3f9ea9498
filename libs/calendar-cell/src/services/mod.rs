pub mod grid;
pub mod window;
pub mod picker;

pub use grid::{compute_visible_days, month_end, month_start, parse_month, VisibleDays};
pub use window::{
    can_navigate, canonical_date, format_date, is_selectable, is_selectable_at,
    max_selectable, CalendarWindow,
};
pub use picker::{DatePicker, OutsideClickGuard, OutsideClickRegistry};
