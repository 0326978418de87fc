use crate::helpers::{body_json, spawn_app};
use serde_json::json;

#[tokio::test]
async fn favorites_reject_duplicates_and_missing_removals() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    let mark = json!({ "username": username, "movie_id": 27205 });

    let first = app.post_json("/api/v1/favorites", &mark).await;
    let duplicate = app.post_json("/api/v1/favorites", &mark).await;

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(duplicate.status().as_u16(), 409);
    let favorites = body_json(app.get(&format!("/api/v1/favorites/{username}")).await).await;
    assert_eq!(favorites["data"]["movie_ids"], json!([27205]));

    let removed = app.delete_json("/api/v1/favorites", &mark).await;
    let removed_again = app.delete_json("/api/v1/favorites", &mark).await;

    assert_eq!(removed.status().as_u16(), 200);
    assert_eq!(removed_again.status().as_u16(), 404);
}

#[tokio::test]
async fn watched_movies_are_recorded_once() {
    let app = spawn_app().await;
    let username = app.register_user().await;
    let mark = json!({ "username": username, "movie_id": 550 });

    assert_eq!(app.post_json("/api/v1/watched", &mark).await.status().as_u16(), 200);
    assert_eq!(app.post_json("/api/v1/watched", &mark).await.status().as_u16(), 409);

    let watched = body_json(app.get(&format!("/api/v1/watched/{username}")).await).await;
    assert_eq!(watched["data"]["movie_ids"], json!([550]));
}

#[tokio::test]
async fn ratings_are_validated_and_replaceable() {
    let app = spawn_app().await;
    let username = app.register_user().await;

    let empty = body_json(app.get(&format!("/api/v1/ratings/{username}/13")).await).await;
    assert!(empty["data"]["rating"].is_null());

    for rating in [0, 6] {
        let response = app
            .post_json(
                "/api/v1/ratings",
                &json!({ "username": username, "movie_id": 13, "rating": rating }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 400, "rating {rating} was accepted");
    }

    for rating in [2, 5] {
        let response = app
            .post_json(
                "/api/v1/ratings",
                &json!({ "username": username, "movie_id": 13, "rating": rating }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let stored = body_json(app.get(&format!("/api/v1/ratings/{username}/13")).await).await;
    assert_eq!(stored["data"]["rating"], 5);
}
