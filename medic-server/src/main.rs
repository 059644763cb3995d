use std::error::Error;

use tracing_subscriber::EnvFilter;

use medic_server::config::AppConfig;
use medic_server::discovery::{ConfiguredSource, Discovery};
use medic_server::geocode::GeocodeClient;
use medic_server::overpass::{MockOverpassSource, OverpassClient};
use medic_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Pick the facility source
    let source = match &config.mock_file {
        Some(path) => {
            let fixture = MockOverpassSource::from_file(path)?;
            tracing::warn!(path = %path.display(), "serving facilities from fixture");
            ConfiguredSource::Fixture(fixture)
        }
        None => {
            let client = OverpassClient::new(config.overpass.clone())?;
            tracing::info!(endpoints = ?client.endpoints(), "using Overpass endpoints");
            ConfiguredSource::Overpass(client)
        }
    };

    let discovery = Discovery::new(source, config.scan.clone());
    let geocoder = GeocodeClient::new(config.geocode.clone())?;

    // Build app state
    let state = AppState::new(discovery, geocoder);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Medical facility radar listening on http://{}", config.bind_addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  POST /location/gps             - Report device position");
    tracing::info!("  POST /location/search          - Set location by place name");
    tracing::info!("  POST /scan                     - Scan for nearby facilities");
    tracing::info!("  GET  /facilities               - Filter the latest scan");
    tracing::info!("  GET  /facilities/:kind/:id     - Facility details");
    tracing::info!("  GET  /emergency                - Nearest hospital");

    axum::serve(listener, app).await?;
    Ok(())
}
