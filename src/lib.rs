pub mod core;
pub mod db;
pub mod models;
pub mod movie_tickets_web_server;
pub mod routes;
pub mod services;
