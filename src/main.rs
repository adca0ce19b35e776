use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

mod config;
mod cricapi;
mod persist;
mod server;
mod summary;

use config::Config;
use cricapi::CricApiClient;
use server::AppState;
use summary::ScoreReport;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let known_fixtures = config.known_fixtures()?;
    info!("Loaded {} known fixture override(s)", known_fixtures.len());

    let client = CricApiClient::new(
        &config.api_url,
        config.api_key.as_deref().unwrap_or_default(),
    )?;

    if config.once {
        let summary =
            summary::fetch_summary(&client, &known_fixtures, config.match_limit).await;
        let report = ScoreReport::from_summary(&summary);
        persist::write_report(Path::new(&config.output_path), &report)?;
        info!("Score report written to {}", config.output_path);
        return Ok(());
    }

    let state = AppState {
        client,
        known_fixtures,
        match_limit: config.match_limit,
        manual: Default::default(),
    };
    let app = server::router(state);
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Cricket scoring service listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
