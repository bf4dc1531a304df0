use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use server::{app, config::Config, state::AppState};
use store::FactStore;
use tower::ServiceExt;

fn test_config(rate_limit_requests: u32) -> Config {
    Config {
        port: 0,
        database_path: ":memory:".to_string(),
        rate_limit_requests,
        rate_limit_window_secs: 60,
    }
}

fn seeded_store() -> FactStore {
    let store = FactStore::in_memory().unwrap();

    store
        .add_math_fact(
            145.0,
            "the atomic number of Unquadpentium",
            "145 is the atomic number of Unquadpentium.",
            false,
        )
        .unwrap();
    store
        .add_trivia_fact(
            42,
            "the answer to life, the universe and everything",
            "42 is the answer to life, the universe and everything.",
            false,
        )
        .unwrap();
    store
        .add_year_fact(
            2022,
            "the year Argentina won the World Cup",
            "2022 is the year Argentina won the World Cup.",
            false,
        )
        .unwrap();
    // Day-ordinal 60 is always February 29.
    store
        .add_date_fact(
            60,
            2000,
            "the test case",
            "February 29th is the day in 2000 that the test case.",
            false,
        )
        .unwrap();

    store
}

fn seeded_app() -> (Router, FactStore) {
    let store = seeded_store();
    let state = AppState::with_store(test_config(10_000), store.clone());
    (app(state), store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn post(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap()
}

#[tokio::test]
async fn math_fact_by_number() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/math/145").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["number"], 145.0);
    assert_eq!(body["fact"]["type"], "math");
    assert_eq!(
        body["fact"]["statement"],
        "145 is the atomic number of Unquadpentium."
    );
}

#[tokio::test]
async fn math_fact_accepts_float_keys() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/math/145.0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["number"], 145.0);
}

#[tokio::test]
async fn math_fact_rejects_non_numeric_keys() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/math/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "Invalid data: number must be an integer or float"
    );
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn math_fact_not_found() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/math/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "A math fact for 999 not found");
}

#[tokio::test]
async fn math_random_fact() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/math/random").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["type"], "math");
}

#[tokio::test]
async fn like_increments_the_counter() {
    let (app, store) = seeded_app();

    let (status, body) = post(&app, "/api/math/like/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"You have liked this fact.");

    let (status, _) = post(&app, "/api/math/like/1").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(store.math_likes(1).unwrap(), Some(2));
}

#[tokio::test]
async fn like_missing_fact_is_404() {
    let (app, _) = seeded_app();
    let (status, body) = post(&app, "/api/math/like/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error_message(&body), "A math fact for id 999 not found");
}

#[tokio::test]
async fn trivia_fact_by_number() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/trivia/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["number"], 42);
    assert_eq!(body["fact"]["type"], "trivia");
}

#[tokio::test]
async fn trivia_fact_not_found() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/trivia/7").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "A trivia fact for 7 not found");
}

#[tokio::test]
async fn year_fact_by_year() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/years/2022").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["year"], 2022);
    assert_eq!(body["fact"]["type"], "year");
}

#[tokio::test]
async fn year_fact_not_found() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/years/1066").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "A fact for 1066 not found");
}

#[tokio::test]
async fn date_fact_by_month_and_day() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/2/29").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["month"], 2);
    assert_eq!(body["fact"]["day"], 29);
    assert_eq!(body["fact"]["year"], 2000);
    assert_eq!(body["fact"]["type"], "date");
    assert_eq!(
        body["fact"]["statement"],
        "February 29th is the day in 2000 that the test case."
    );
}

#[tokio::test]
async fn date_fact_not_found() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/1/2").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "A date fact for 1/2 not found");
}

#[tokio::test]
async fn date_fact_invalid_month_carries_codec_message() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/13/1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "13 is an invalid month");
}

#[tokio::test]
async fn date_fact_invalid_day_carries_codec_message() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/1/40").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "40 is an invalid day");
}

#[tokio::test]
async fn date_fact_fractional_input_is_a_type_error() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/1.1/1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid data types");
}

#[tokio::test]
async fn date_fact_non_numeric_input_is_a_type_error() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/a/1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid data types");
}

#[tokio::test]
async fn date_random_fact() {
    let (app, _) = seeded_app();
    let (status, body) = get_json(&app, "/api/dates/random").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"]["month"], 2);
    assert_eq!(body["fact"]["day"], 29);
}

#[tokio::test]
async fn random_on_empty_store_is_404() {
    let state = AppState::with_store(test_config(10_000), FactStore::in_memory().unwrap());
    let app = app(state);

    let (status, body) = get_json(&app, "/api/trivia/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "No trivia facts found");
}

#[tokio::test]
async fn docs_page_renders_html() {
    let (app, _) = seeded_app();
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("<h1>"));
    assert!(page.contains("Numbers Fact API"));
}

#[tokio::test]
async fn api_requests_are_rate_limited() {
    // Without a socket every test request shares one limiter key.
    let state = AppState::with_store(test_config(2), seeded_store());
    let app = app(state);

    let (status, _) = get(&app, "/api/math/random").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/api/trivia/42").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/api/math/random").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error_message(&body), "Too many requests");

    // The docs root is not rate limited.
    let (status, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
}
