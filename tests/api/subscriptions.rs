use crate::helpers::{body_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn plans_are_seeded_cheapest_first() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/plans").await;

    assert_eq!(response.status().as_u16(), 200);
    let body = body_json(response).await;
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Standard", "Premium"]);
    assert_eq!(body["data"][1]["movie_limit"], 20);
}

#[tokio::test]
async fn active_plan_is_null_before_subscribing() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let before = body_json(app.get(&format!("/api/v1/subscriptions/active/{username}")).await).await;
    app.subscribe(&username, "Standard").await;
    let after = body_json(app.get(&format!("/api/v1/subscriptions/active/{username}")).await).await;

    assert!(before["data"].is_null());
    assert_eq!(after["data"]["name"], "Standard");
    assert_eq!(after["data"]["movie_limit"], 10);
}

#[tokio::test]
async fn subscribing_to_an_unknown_plan_is_404() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let response = app
        .post_json(
            "/api/v1/subscriptions/subscribe",
            &json!({ "username": username, "plan_id": 9999 }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn usage_without_a_plan_is_a_precondition_failure() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let response = app
        .get(&format!("/api/v1/subscriptions/usage/{username}"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn usage_for_an_unknown_user_is_404() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/subscriptions/usage/nobody-here").await;

    assert_eq!(response.status().as_u16(), 404);
}
