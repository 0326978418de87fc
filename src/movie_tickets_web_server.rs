use crate::core::AppConfig;
use crate::db::prepare_database;
use crate::routes::movie_tickets_routes;
use crate::services::PurchaseEngine;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct MovieTicketsWebServer {
    port: u16,
    server: Server,
    pool: SqlitePool,
}

impl MovieTicketsWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );

        let pool = configuration
            .database
            .pool_options()
            .connect_lazy_with(configuration.database.connect()?);

        prepare_database(&pool, &configuration.catalog).await?;

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool.clone())?;

        Ok(Self { port, server, pool })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, pool: SqlitePool) -> Result<Server, anyhow::Error> {
    let engine = Data::new(PurchaseEngine::new(pool.clone()));
    let pool = Data::new(pool);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT]);
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(movie_tickets_routes)
            .app_data(pool.clone())
            .app_data(engine.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
