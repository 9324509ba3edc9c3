//! End-to-end tests over the full router, backed by the in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

use shopcart_api::{
    models::{Item, NewCategory},
    routes::create_app_router,
    state::AppState,
    store::MemoryStore,
    token::TokenKeys,
};

const SECRET: &str = "test-secret";

async fn create_test_app() -> axum::Router {
    let state = AppState::new(MemoryStore::new(), TokenKeys::new(SECRET));
    for (id, category_id, name, price) in [(1, 1, "Apple", 120.0), (2, 2, "Carrot", 40.0)] {
        state
            .store
            .insert_item(Item {
                id,
                category_id,
                name: name.to_string(),
                price,
                image_url: format!("https://img/{id}.png"),
            })
            .await
            .unwrap();
    }
    for name in ["Vegetables", "Fruits"] {
        state
            .store
            .insert_category(NewCategory {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
    }
    create_app_router(state)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));
    (status, body)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

async fn user_info(app: &axum::Router, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/user-info");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn cart_of(app: &axum::Router, user_id: &str) -> Vec<Value> {
    let (status, body) = get(app, &format!("/cart?user_id={user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].as_array().cloned().expect("cart data array")
}

#[tokio::test]
async fn register_twice_conflicts() {
    let app = create_test_app().await;
    let body = json!({ "username": "a", "password": "p", "email": "a@x.com" });

    let (status, resp) = post_json(&app, "/register", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "User registered successfully");

    let (status, resp) = post_json(&app, "/register", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Username already exists");
}

#[tokio::test]
async fn register_with_taken_email_conflicts() {
    let app = create_test_app().await;
    post_json(
        &app,
        "/register",
        json!({ "username": "a", "password": "p", "email": "a@x.com" }),
    )
    .await;

    let (status, resp) = post_json(
        &app,
        "/register",
        json!({ "username": "b", "password": "p", "email": "a@x.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Email already exists");
}

#[tokio::test]
async fn login_issues_token_that_resolves_the_user() {
    let app = create_test_app().await;
    post_json(
        &app,
        "/register",
        json!({ "username": "alice", "password": "secret", "email": "alice@x.com" }),
    )
    .await;

    let (status, resp) = post_json(
        &app,
        "/login",
        json!({ "username": "alice", "password": "secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = resp["jwtToken"].as_str().expect("jwtToken").to_string();

    let (status, resp) = user_info(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["username"], "alice");
    assert_eq!(resp["data"]["email"], "alice@x.com");
    assert!(resp["data"].get("password").is_none());
    assert!(resp["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_with_bad_credentials_is_400() {
    let app = create_test_app().await;
    post_json(
        &app,
        "/register",
        json!({ "username": "alice", "password": "secret", "email": "alice@x.com" }),
    )
    .await;

    let (status, resp) = post_json(
        &app,
        "/login",
        json!({ "username": "alice", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Invalid Password");

    let (status, resp) = post_json(
        &app,
        "/login",
        json!({ "username": "bob", "password": "secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Invalid Username, please Register");
}

#[tokio::test]
async fn user_info_without_valid_token_is_401() {
    let app = create_test_app().await;

    let (status, resp) = user_info(&app, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["message"], "Invalid JWT Token");

    let (status, resp) = user_info(&app, Some("Bearer not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["message"], "Invalid Access Token");

    let forged = TokenKeys::new("other-secret").issue("alice").unwrap();
    let (status, _) = user_info(&app, Some(&format!("Bearer {forged}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_lists_everything() {
    let app = create_test_app().await;

    let (status, items) = get(&app, "/items").await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Apple");
    assert_eq!(items[0]["image_url"], "https://img/1.png");

    let (status, categories) = get(&app, "/categories").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = categories
        .as_array()
        .expect("categories array")
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fruits", "Vegetables"]);
}

#[tokio::test]
async fn adding_same_product_twice_keeps_one_entry() {
    let app = create_test_app().await;

    let (status, resp) = get(&app, "/add-cart?id=1&user_id=u1&quantity=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Success");

    let (status, resp) = get(&app, "/add-cart?id=1&user_id=u1&quantity=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Already exists in the cart");

    let cart = cart_of(&app, "u1").await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["product_id"], 1);
    assert_eq!(cart[0]["name"], "Apple");
    assert_eq!(cart[0]["quantity"], 2);
}

#[tokio::test]
async fn add_cart_for_unknown_item_is_404() {
    let app = create_test_app().await;
    let (status, resp) = get(&app, "/add-cart?id=42&user_id=u1&quantity=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "Product not found");
    assert!(cart_of(&app, "u1").await.is_empty());
}

#[tokio::test]
async fn quantity_moves_by_one_and_floors_at_one() {
    let app = create_test_app().await;
    get(&app, "/add-cart?id=2&user_id=u1&quantity=1").await;

    let (status, resp) = get(&app, "/add-quantity?id=2&user_id=u1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "Quantity updated successfully");
    assert_eq!(cart_of(&app, "u1").await[0]["quantity"], 2);

    get(&app, "/remove-quantity?id=2&user_id=u1").await;
    let (status, _) = get(&app, "/remove-quantity?id=2&user_id=u1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart_of(&app, "u1").await[0]["quantity"], 1);

    let (status, resp) = get(&app, "/add-quantity?id=1&user_id=u1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "Product not found in the cart");
}

#[tokio::test]
async fn remove_cart_is_idempotent() {
    let app = create_test_app().await;
    get(&app, "/add-cart?id=1&user_id=u1").await;
    assert_eq!(cart_of(&app, "u1").await.len(), 1);

    for _ in 0..2 {
        let (status, resp) = get(&app, "/remove-cart?user_id=u1&product_id=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["message"], "Removed from the cart");
    }
    assert!(cart_of(&app, "u1").await.is_empty());
}

#[tokio::test]
async fn carts_are_scoped_per_user() {
    let app = create_test_app().await;
    get(&app, "/add-cart?id=1&user_id=u1&quantity=1").await;
    get(&app, "/add-cart?id=2&user_id=u2&quantity=3").await;

    let u1 = cart_of(&app, "u1").await;
    let u2 = cart_of(&app, "u2").await;
    assert_eq!(u1.len(), 1);
    assert_eq!(u2.len(), 1);
    assert_eq!(u2[0]["product_id"], 2);
    assert_eq!(u2[0]["user_id"], "u2");
}

#[tokio::test]
async fn unknown_path_is_404_and_request_id_is_echoed() {
    let app = create_test_app().await;
    let request = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn malformed_login_body_is_400_with_message() {
    let app = create_test_app().await;
    let (status, resp) = post_json(&app, "/login", json!({ "username": "a" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = resp["message"].as_str().expect("json message");
    assert!(message.contains("password"), "{message}");

    let (status, resp) = post_json(
        &app,
        "/register",
        json!({ "username": "a", "password": "p" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().expect("json message").contains("email"));
}

#[tokio::test]
async fn malformed_cart_query_is_400_with_message() {
    let app = create_test_app().await;
    for uri in ["/add-cart?id=abc&user_id=u1", "/add-quantity?user_id=u1"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json",
            "{uri}"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn blank_register_field_is_rejected() {
    let app = create_test_app().await;
    let (status, resp) = post_json(
        &app,
        "/register",
        json!({ "username": "  ", "password": "p", "email": "a@x.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "username, password and email are required");
}

#[tokio::test]
async fn blank_user_id_is_rejected_on_cart_routes() {
    let app = create_test_app().await;
    for uri in [
        "/add-cart?id=1&user_id=",
        "/cart?user_id=",
        "/remove-cart?user_id=&product_id=1",
        "/add-quantity?id=1&user_id=",
        "/remove-quantity?id=1&user_id=",
    ] {
        let (status, resp) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(resp["message"], "user_id is required", "{uri}");
    }
}

#[tokio::test]
async fn double_space_in_authorization_is_invalid_token() {
    let app = create_test_app().await;
    post_json(
        &app,
        "/register",
        json!({ "username": "alice", "password": "secret", "email": "alice@x.com" }),
    )
    .await;
    let token = TokenKeys::new(SECRET).issue("alice").unwrap();

    let (status, resp) = user_info(&app, Some(&format!("Bearer  {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["message"], "Invalid Access Token");
}
