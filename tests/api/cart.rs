use crate::helpers::{body_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn tickets_can_be_added_listed_and_removed() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let added = app.add_ticket(&username, 603).await;
    assert_eq!(added.status().as_u16(), 201);
    let item_id = body_json(added).await["data"]["id"].as_i64().unwrap();
    app.add_ticket(&username, 604).await;

    let cart = body_json(app.get(&format!("/api/v1/cart/{username}")).await).await;
    assert_eq!(cart["data"].as_array().unwrap().len(), 2);

    let removed = app.delete(&format!("/api/v1/cart/{item_id}")).await;
    let removed_again = app.delete(&format!("/api/v1/cart/{item_id}")).await;

    assert_eq!(removed.status().as_u16(), 200);
    assert_eq!(removed_again.status().as_u16(), 404);
    let cart = body_json(app.get(&format!("/api/v1/cart/{username}")).await).await;
    assert_eq!(cart["data"][0]["movie_id"], 604);
}

#[tokio::test]
async fn adding_for_an_unknown_user_is_404() {
    let app = spawn_app().await;

    let response = app.add_ticket("nobody-here", 603).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn incomplete_tickets_are_rejected() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let response = app
        .post_json(
            "/api/v1/cart",
            &json!({
                "username": username,
                "movie_id": 603,
                "title": "",
                "showtime": "20:15",
                "date": "2026-10-24",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
