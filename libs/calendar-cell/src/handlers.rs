use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Local;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::ApiResponse;

use crate::models::{CalendarConfig, CalendarQuery, MonthView};
use crate::services::{parse_month, CalendarWindow};

#[axum::debug_handler]
pub async fn get_month_view(
    State(config): State<Arc<AppConfig>>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<MonthView>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let today = Local::now().date_naive();

    let max_days = query.max_days.unwrap_or(config.booking_window_days);
    if max_days < 0 {
        return Err(AppError::ValidationError("maxDays must not be negative".to_string()));
    }

    let mut window = CalendarWindow::from_config(&CalendarConfig {
        min_date: query.min_date.unwrap_or(today),
        max_days,
    });

    if let Some(month) = query.month.as_deref() {
        let first = parse_month(month)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid month '{}', expected YYYY-MM", month)))?;
        if !window.show_month(first) {
            return Err(AppError::ValidationError(format!(
                "Month {} is outside the booking window",
                month
            )));
        }
    }

    if let Some(selected) = query.selected {
        if window.select_date(selected).is_none() {
            debug!("Selected date {} outside booking window, ignoring", selected);
        }
    }

    Ok(Json(ApiResponse::ok(window.month_view(today))))
}
