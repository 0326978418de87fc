use fake::faker::internet::en::Username;
use fake::Fake;
use movie_tickets::core::{get_subscriber, init_subscriber, AppConfig};
use movie_tickets::movie_tickets_web_server::MovieTicketsWebServer;
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::{json, Value};
use sqlx::SqlitePool;

// Set TEST_LOG=true to see the bunyan output of a failing test
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers a fresh user and returns its username.
    pub async fn register_user(&self) -> String {
        let username: String = Username().fake();
        let response = self
            .post_json(
                "/api/v1/users/register",
                &json!({ "username": username, "password": "popcorn-42" }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        username
    }

    pub async fn plan_id(&self, name: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM plans WHERE name = ?")
            .bind(name)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to look up plan.")
    }

    pub async fn subscribe(&self, username: &str, plan: &str) {
        let plan_id = self.plan_id(plan).await;
        let response = self
            .post_json(
                "/api/v1/subscriptions/subscribe",
                &json!({ "username": username, "plan_id": plan_id }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    pub async fn add_ticket(&self, username: &str, movie_id: i64) -> reqwest::Response {
        self.post_json(
            "/api/v1/cart",
            &json!({
                "username": username,
                "movie_id": movie_id,
                "title": format!("Movie {movie_id}"),
                "showtime": "20:15",
                "date": "2026-10-24",
            }),
        )
        .await
    }

    pub async fn purchase(&self, username: &str) -> reqwest::Response {
        self.post_json("/api/v1/purchases", &json!({ "username": username }))
            .await
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = AppConfig::new().expect("Failed to read configuration.");
        c.application.port = 0;
        c.application.host = "127.0.0.1".to_string();
        // every test gets its own private database
        c.database.url = Secret::new("sqlite::memory:".to_string());
        c
    };

    let app = MovieTicketsWebServer::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", app.port());
    let db_pool = app.db_pool();
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        db_pool,
        client: reqwest::Client::new(),
    }
}

pub async fn body_json(response: reqwest::Response) -> Value {
    response.json().await.expect("Response body was not JSON.")
}
