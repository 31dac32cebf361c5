//! End-to-end checks of the HTTP surface with the booking API unreachable,
//! so catalogue reads exercise the mock fallback.

use actix_web::{http::header, http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use tour_book::config::Config;
use tour_book::models::Claims;
use tour_book::routes;
use tour_book::state::AppState;

const SECRET: &str = "test-secret";

fn state(jwt_secret: Option<&str>) -> web::Data<AppState> {
    let config = Config {
        api_url: "http://127.0.0.1:9/api".to_string(),
        jwt_secret: jwt_secret.map(String::from),
        request_timeout_secs: 2,
        ..Config::default()
    };
    web::Data::new(AppState::new(config).unwrap())
}

fn bearer(role: &str) -> (header::HeaderName, String) {
    let claims = Claims {
        sub: "7".into(),
        role: role.into(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state).configure(routes::configure)).await
    };
}

#[actix_web::test]
async fn health_reports_configuration() {
    let app = app!(state(None));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mock_fallback"], true);
}

#[actix_web::test]
async fn hotels_filtered_by_city_come_from_mock_when_api_is_down() {
    let app = app!(state(None));
    let req = test::TestRequest::get()
        .uri("/api/hotels?city=dubrovnik")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-data-source").unwrap(), "mock");
    let body: Value = test::read_body_json(resp).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(body["total"], 2);
    assert!(items.iter().all(|h| h["city"] == "Dubrovnik"));
}

#[actix_web::test]
async fn hotels_sort_and_paginate() {
    let app = app!(state(None));
    let req = test::TestRequest::get()
        .uri("/api/hotels?sort=price_asc&page=2&per_page=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let prices: Vec<f64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["price_per_night"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, [180.0, 240.0]);
    assert_eq!(body["page"], 2);
    assert_eq!(body["total_pages"], 3);
}

#[actix_web::test]
async fn blank_filter_fields_are_ignored() {
    let app = app!(state(None));
    let req = test::TestRequest::get()
        .uri("/api/hotels?city=&min_price=&max_price=&stars=&available_only=&page=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 6);

    let req = test::TestRequest::get().uri("/api/yachts?min_capacity=&location=").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 4);
}

#[actix_web::test]
async fn checkbox_flags_and_bad_numbers() {
    let app = app!(state(None));
    let req = test::TestRequest::get().uri("/api/hotels?available_only=1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/hotels?min_price=cheap").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn unknown_hotel_without_mock_twin_is_a_gateway_error() {
    let app = app!(state(None));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/hotels/3").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Hotel Park Split");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/hotels/999").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn listing_reviews_newest_first() {
    let app = app!(state(None));
    let req = test::TestRequest::get().uri("/api/hotels/1/reviews").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let authors: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(authors, ["Tom", "Marta"]);
}

#[actix_web::test]
async fn yachts_filter_by_type() {
    let app = app!(state(None));
    let req = test::TestRequest::get()
        .uri("/api/yachts?yacht_type=catamaran&sort=price_desc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|y| y["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Blue Horizon", "Lagoon Spirit"]);
}

#[actix_web::test]
async fn quote_prices_a_stay() {
    let app = app!(state(None));
    let check_in = Utc::now().date_naive() + Duration::days(10);
    let check_out = check_in + Duration::days(3);
    let req = test::TestRequest::post()
        .uri("/api/bookings/quote")
        .set_json(json!({
            "bookable_type": "hotel",
            "bookable_id": "3",
            "check_in": check_in,
            "check_out": check_out,
            "guests": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["units"], 3);
    assert_eq!(body["total"], 540.0);
}

#[actix_web::test]
async fn quote_with_bad_dates_is_a_validation_error() {
    let app = app!(state(None));
    let check_in = Utc::now().date_naive() + Duration::days(5);
    let req = test::TestRequest::post()
        .uri("/api/bookings/quote")
        .set_json(json!({
            "bookable_type": "yacht",
            "bookable_id": "1",
            "check_in": check_in,
            "check_out": check_in - Duration::days(1),
            "guests": 0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["check_out"].is_array());
    assert!(body["errors"]["guests"].is_array());
    assert!(body["errors"].get("check_in").is_none());
}

#[actix_web::test]
async fn malformed_json_gets_an_error_body() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/bookings/quote")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn booking_requires_login() {
    let app = app!(state(None));
    let check_in = Utc::now().date_naive() + Duration::days(3);
    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({
            "bookable_type": "hotel",
            "bookable_id": "1",
            "check_in": check_in,
            "check_out": check_in + Duration::days(2),
            "guests": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["clear_token"], true);
}

#[actix_web::test]
async fn admin_routes_check_the_role() {
    let app = app!(state(Some(SECRET)));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/admin/stats").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/stats")
        .insert_header(bearer("user"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // Admin data never falls back to mock.
    let req = test::TestRequest::get()
        .uri("/api/admin/bookings")
        .insert_header(bearer("admin"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn login_form_is_validated_before_calling_the_api() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nope", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"][0], "Enter a valid email address");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "guest@example.com", "password": "secret123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn logout_always_succeeds() {
    let app = app!(state(None));
    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer("user"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["clear_token"], true);
}
