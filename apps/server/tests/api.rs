use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wheeltrack_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> (Router, TempDir) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        static_dir: tmp.path().to_string_lossy().to_string(),
        jwt_secret: None,
        token_ttl: Duration::from_secs(3600),
        seed_admin_password: "seed-password".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup_and_login(app: &Router, username: &str) -> String {
    let signup = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": format!("{username}@example.com"),
                "username": username,
                "password": "hunter22",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(signup.status(), StatusCode::CREATED);

    let login = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": username, "password": "hunter22" })),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let login_json = body_json(login).await;
    login_json["accessToken"].as_str().unwrap().to_string()
}

async fn create_portfolio(app: &Router, token: &str, capital: Value) -> Value {
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/portfolios",
            Some(token),
            Some(json!({ "name": "Wheel", "startingCapital": capital })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_endpoint_works() {
    let (app, _tmp) = build_test_router().await;
    let response = app
        .oneshot(request(Method::GET, "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_rejects_missing_fields_and_duplicates() {
    let (app, _tmp) = build_test_router().await;

    // Missing fields are listed in one message.
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "firstName": "Ada" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("lastName"));
    assert!(message.contains("email"));
    assert!(message.contains("password"));

    let _token = signup_and_login(&app, "ada").await;

    // Same email and username again: 400, no second record.
    let duplicate = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "username": "ada",
                "password": "hunter22",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _tmp) = build_test_router().await;
    let _token = signup_and_login(&app, "alan").await;

    // Right user, wrong password.
    let wrong_password = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "alan", "password": "wrong-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Unknown identifier gets the same answer, not a 404.
    let unknown = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "nobody", "password": "hunter22" })),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    // Missing fields are a validation error, not an auth failure.
    let missing = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "alan" })),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn portfolio_requires_auth_and_seeds_capital() {
    let (app, _tmp) = build_test_router().await;

    // No session: 401 and no write.
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/portfolios",
            None,
            Some(json!({ "name": "Wheel", "startingCapital": 10000 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = signup_and_login(&app, "grace").await;

    // startingCapital arrives as a string and is parsed.
    let portfolio = create_portfolio(&app, &token, json!("10000")).await;
    assert_eq!(portfolio["startingCapital"], json!(10000.0));
    assert_eq!(portfolio["currentCapital"], json!(10000.0));

    let list = app
        .clone()
        .oneshot(request(Method::GET, "/api/portfolios", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let list_json = body_json(list).await;
    assert_eq!(list_json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn trade_lifecycle_with_metrics_and_capital_credit() {
    let (app, _tmp) = build_test_router().await;
    let token = signup_and_login(&app, "lin").await;
    let portfolio = create_portfolio(&app, &token, json!(5000)).await;
    let portfolio_id = portfolio["id"].as_str().unwrap();

    let trade_response = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/portfolios/{portfolio_id}/trades"),
            Some(&token),
            Some(json!({
                "ticker": "aapl",
                "strikePrice": 180,
                "expirationDate": "2026-12-18",
                "optionType": "PUT",
                "contracts": 10,
                "contractPrice": 2.0,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(trade_response.status(), StatusCode::CREATED);
    let trade = body_json(trade_response).await;
    let trade_id = trade["id"].as_str().unwrap();
    assert_eq!(trade["ticker"], json!("AAPL"));

    // 10 @ 2.00 plus 10 @ 4.00 should average to 3.00 over 20 contracts.
    let adjustment = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/trades/{trade_id}/adjustments"),
            Some(&token),
            Some(json!({ "contracts": "10", "price": "4.00" })),
        ))
        .await
        .unwrap();
    assert_eq!(adjustment.status(), StatusCode::CREATED);

    let fetched = app
        .clone()
        .oneshot(request(
            Method::GET,
            &format!("/api/trades/{trade_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_json = body_json(fetched).await;
    assert_eq!(fetched_json["metrics"]["adjustedContracts"], json!(20));
    assert_eq!(fetched_json["metrics"]["averagePrice"], json!(3.0));
    assert_eq!(fetched_json["adjustments"].as_array().unwrap().len(), 1);

    // PATCH without expirationDate is rejected.
    let bad_patch = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/api/trades/{trade_id}"),
            Some(&token),
            Some(json!({ "entryPrice": 2.1 })),
        ))
        .await
        .unwrap();
    assert_eq!(bad_patch.status(), StatusCode::BAD_REQUEST);

    let good_patch = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/api/trades/{trade_id}"),
            Some(&token),
            Some(json!({ "entryPrice": 2.1, "expirationDate": "2027-01-15", "notes": "rolled out" })),
        ))
        .await
        .unwrap();
    assert_eq!(good_patch.status(), StatusCode::OK);
    let patched = body_json(good_patch).await;
    assert_eq!(patched["expirationDate"], json!("2027-01-15"));
    assert_eq!(patched["contractPrice"], json!(2.1));

    // Closing credits the captured premium to the portfolio.
    let close = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/trades/{trade_id}/close"),
            Some(&token),
            Some(json!({ "premiumCaptured": 150.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(close.status(), StatusCode::OK);
    let closed = body_json(close).await;
    assert_eq!(closed["premiumCaptured"], json!(150.0));
    assert!(closed["closedAt"].is_string());

    let detail = app
        .clone()
        .oneshot(request(
            Method::GET,
            &format!("/api/portfolios/{portfolio_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let detail_json = body_json(detail).await;
    assert_eq!(detail_json["currentCapital"], json!(5150.0));
    assert_eq!(detail_json["trades"].as_array().unwrap().len(), 1);

    // A second close is rejected.
    let close_again = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/trades/{trade_id}/close"),
            Some(&token),
            Some(json!({ "premiumCaptured": 1.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(close_again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adjustment_with_bad_price_writes_nothing() {
    let (app, _tmp) = build_test_router().await;
    let token = signup_and_login(&app, "mary").await;
    let portfolio = create_portfolio(&app, &token, json!(1000)).await;
    let portfolio_id = portfolio["id"].as_str().unwrap();

    let trade_response = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/portfolios/{portfolio_id}/trades"),
            Some(&token),
            Some(json!({
                "ticker": "MSFT",
                "strikePrice": 400,
                "expirationDate": "2026-11-20",
                "optionType": "CALL",
                "contracts": 1,
                "contractPrice": 5.5,
            })),
        ))
        .await
        .unwrap();
    let trade = body_json(trade_response).await;
    let trade_id = trade["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/trades/{trade_id}/adjustments"),
            Some(&token),
            Some(json!({ "contracts": 1, "price": "not-a-number" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = app
        .clone()
        .oneshot(request(
            Method::GET,
            &format!("/api/trades/{trade_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let fetched_json = body_json(fetched).await;
    assert!(fetched_json["adjustments"].as_array().unwrap().is_empty());

    // Adjustments against a missing trade are a 404.
    let missing = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/trades/nope/adjustments",
            Some(&token),
            Some(json!({ "contracts": 1, "price": 1.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_resources_are_invisible() {
    let (app, _tmp) = build_test_router().await;
    let owner_token = signup_and_login(&app, "owner").await;
    let intruder_token = signup_and_login(&app, "intruder").await;

    let portfolio = create_portfolio(&app, &owner_token, json!(2000)).await;
    let portfolio_id = portfolio["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            Method::GET,
            &format!("/api/portfolios/{portfolio_id}"),
            Some(&intruder_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_update_requires_changes() {
    let (app, _tmp) = build_test_router().await;
    let token = signup_and_login(&app, "ray").await;

    let empty = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            "/api/user/profile",
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let update = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            "/api/user/profile",
            Some(&token),
            Some(json!({ "avatarUrl": "https://example.com/ray.png" })),
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::OK);
    let updated = body_json(update).await;
    assert_eq!(updated["avatarUrl"], json!("https://example.com/ray.png"));
    assert!(updated.get("passwordHash").is_none());
}

#[tokio::test]
async fn seed_user_is_idempotent() {
    let (app, _tmp) = build_test_router().await;

    let first = app
        .clone()
        .oneshot(request(Method::GET, "/api/seed-user", None, None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_json = body_json(first).await;
    assert_eq!(first_json["created"], json!(true));
    assert_eq!(first_json["user"]["isAdmin"], json!(true));

    let second = app
        .clone()
        .oneshot(request(Method::GET, "/api/seed-user", None, None))
        .await
        .unwrap();
    let second_json = body_json(second).await;
    assert_eq!(second_json["created"], json!(false));
    assert_eq!(second_json["user"]["id"], first_json["user"]["id"]);

    // The seeded credentials work.
    let login = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "admin", "password": "seed-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
}
