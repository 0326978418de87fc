use std::fmt::{Debug, Display};

use movie_tickets::core::{get_subscriber, init_subscriber, AppConfig};
use movie_tickets::movie_tickets_web_server::MovieTicketsWebServer;
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let file_appender = tracing_appender::rolling::daily("/var/tmp/log/movie_tickets", "app");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = get_subscriber("movie_tickets".into(), "info".into(), non_blocking);
    init_subscriber(subscriber);

    let config = AppConfig::new()?;

    let web_server = MovieTicketsWebServer::build(config.clone()).await?;
    let port = web_server.port();

    let server_task = tokio::spawn(web_server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!(
        "🎬 Server started on Addr: {}:{}",
        config.application.host, port
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        outcome = server_task => report_exit("movie_tickets_web_server", outcome),
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{}' task failed to complete",
                task_name
            )
        }
    }
}
