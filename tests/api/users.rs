use crate::helpers::{body_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn register_returns_201_and_the_profile() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/api/v1/users/register",
            &json!({ "username": "ana", "password": "popcorn-42" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "ana");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_a_taken_username() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let response = app
        .post_json(
            "/api/v1/users/register",
            &json!({ "username": username, "password": "another-one" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 409);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn register_returns_400_for_invalid_payloads() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "username": "", "password": "popcorn-42" }), "empty username"),
        (json!({ "username": "ana", "password": "123" }), "short password"),
        (json!({ "username": "ana" }), "missing password"),
    ];

    for (body, description) in test_cases {
        let response = app.post_json("/api/v1/users/register", &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let ok = app
        .post_json(
            "/api/v1/users/login",
            &json!({ "username": username, "password": "popcorn-42" }),
        )
        .await;
    let wrong = app
        .post_json(
            "/api/v1/users/login",
            &json!({ "username": username, "password": "butter-43" }),
        )
        .await;
    let unknown = app
        .post_json(
            "/api/v1/users/login",
            &json!({ "username": "nobody-here", "password": "popcorn-42" }),
        )
        .await;

    assert_eq!(ok.status().as_u16(), 200);
    assert_eq!(body_json(ok).await["data"]["username"], username.as_str());
    assert_eq!(wrong.status().as_u16(), 401);
    assert_eq!(unknown.status().as_u16(), 401);
}

#[tokio::test]
async fn get_user_returns_404_for_unknown_names() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let found = app.get(&format!("/api/v1/users/{username}")).await;
    let missing = app.get("/api/v1/users/nobody-here").await;

    assert_eq!(found.status().as_u16(), 200);
    assert_eq!(missing.status().as_u16(), 404);
}
