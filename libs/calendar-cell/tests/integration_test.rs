use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use tower::ServiceExt;
use serde_json::Value;

use calendar_cell::router::calendar_routes;
use calendar_cell::models::MonthView;
use shared_utils::test_utils::TestConfig;

fn create_test_app() -> Router {
    calendar_routes(TestConfig::default().to_arc())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = create_test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn month_view(json: &Value) -> MonthView {
    serde_json::from_value(json["data"].clone()).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_month_view_for_window() {
    let (status, json) = get("/month?minDate=2024-01-15&maxDays=30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let view = month_view(&json);
    assert_eq!(view.month, "2024-01");
    assert_eq!(view.min_selectable, date(2024, 1, 15));
    assert_eq!(view.max_selectable, date(2024, 2, 14));
    assert!(!view.can_navigate_previous);
    assert!(view.can_navigate_next);
    assert_eq!(view.days.len() % 7, 0);
    assert_eq!(view.days.first().unwrap().date.weekday(), Weekday::Sun);
    assert_eq!(view.days.last().unwrap().date.weekday(), Weekday::Sat);
    assert!(view.days.iter().all(|d| !d.selectable || (d.date >= view.min_selectable && d.date <= view.max_selectable)));
}

#[tokio::test]
async fn test_next_month_and_selection() {
    let (status, json) = get("/month?minDate=2024-01-15&maxDays=30&month=2024-02&selected=2024-02-14").await;
    assert_eq!(status, StatusCode::OK);

    let view = month_view(&json);
    assert_eq!(view.month, "2024-02");
    assert!(view.can_navigate_previous);
    assert!(!view.can_navigate_next);
    assert_eq!(view.selected_date, Some(date(2024, 2, 14)));

    let selected: Vec<_> = view.days.iter().filter(|d| d.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].date, date(2024, 2, 14));

    let feb_15 = view.days.iter().find(|d| d.date == date(2024, 2, 15)).unwrap();
    assert!(!feb_15.selectable);
}

#[tokio::test]
async fn test_selection_outside_window_is_ignored() {
    let (status, json) = get("/month?minDate=2024-01-15&maxDays=30&selected=2024-02-15").await;
    assert_eq!(status, StatusCode::OK);

    let view = month_view(&json);
    assert_eq!(view.selected_date, None);
    assert!(view.days.iter().all(|d| !d.selected));
}

#[tokio::test]
async fn test_defaults_to_today_and_configured_window() {
    let before = Local::now().date_naive();
    let (status, json) = get("/month").await;
    let after = Local::now().date_naive();
    assert_eq!(status, StatusCode::OK);

    let view = month_view(&json);
    assert!(view.min_selectable == before || view.min_selectable == after);
    assert_eq!(view.max_selectable, view.min_selectable + chrono::Days::new(30));
    assert_eq!(view.days.iter().filter(|d| d.is_today).count(), 1);
}

#[tokio::test]
async fn test_month_outside_window_rejected() {
    let (status, json) = get("/month?minDate=2024-01-15&maxDays=30&month=2024-03").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Month 2024-03 is outside the booking window");
}

#[tokio::test]
async fn test_malformed_query_rejected() {
    let (status, json) = get("/month?month=march").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = get("/month?minDate=15-01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/month?maxDays=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
