use crate::helpers::{body_json, spawn_app};

#[tokio::test]
async fn purchase_moves_the_cart_into_the_library() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    app.subscribe(&username, "Standard").await;
    for movie_id in [11, 12, 13] {
        app.add_ticket(&username, movie_id).await;
    }

    let response = app.purchase(&username).await;

    assert_eq!(response.status().as_u16(), 200);
    let receipt = body_json(response).await;
    assert_eq!(receipt["data"]["purchased"], serde_json::json!([11, 12, 13]));
    assert_eq!(receipt["data"]["remaining"], 7);

    let cart = body_json(app.get(&format!("/api/v1/cart/{username}")).await).await;
    assert!(cart["data"].as_array().unwrap().is_empty());
    let owned = body_json(app.get(&format!("/api/v1/purchases/{username}")).await).await;
    assert_eq!(owned["data"].as_array().unwrap().len(), 3);
    let usage = body_json(
        app.get(&format!("/api/v1/subscriptions/usage/{username}"))
            .await,
    )
    .await;
    assert_eq!(usage["data"]["purchased"], 3);
    assert_eq!(usage["data"]["remaining"], 7);
}

#[tokio::test]
async fn purchase_without_a_plan_is_rejected_and_keeps_the_cart() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    app.add_ticket(&username, 11).await;

    let response = app.purchase(&username).await;

    assert_eq!(response.status().as_u16(), 400);
    let cart = body_json(app.get(&format!("/api/v1/cart/{username}")).await).await;
    assert_eq!(cart["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn purchase_over_quota_is_rejected_whole() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    app.subscribe(&username, "Standard").await;
    for movie_id in 1..=8 {
        app.add_ticket(&username, movie_id).await;
    }
    assert_eq!(app.purchase(&username).await.status().as_u16(), 200);
    for movie_id in 9..=11 {
        app.add_ticket(&username, movie_id).await;
    }

    let response = app.purchase(&username).await;

    assert_eq!(response.status().as_u16(), 400);
    let owned = body_json(app.get(&format!("/api/v1/purchases/{username}")).await).await;
    assert_eq!(owned["data"].as_array().unwrap().len(), 8);
    let cart = body_json(app.get(&format!("/api/v1/cart/{username}")).await).await;
    assert_eq!(cart["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn purchasing_an_empty_cart_is_rejected() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    app.subscribe(&username, "Premium").await;

    let response = app.purchase(&username).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn purchase_for_an_unknown_user_is_404() {
    let app = spawn_app().await;

    let response = app.purchase("nobody-here").await;

    assert_eq!(response.status().as_u16(), 404);
}
