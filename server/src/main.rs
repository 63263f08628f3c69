use claw_server::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()?;

    log::info!("Relaying vault requests to {}", config.backend_url);

    let app = app(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
