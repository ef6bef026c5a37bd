use analytics::MetricsEngine;
use axum::{routing::get, Router};
use configuration::Config;
use database::LedgerRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// Name the API reports about itself.
pub const API_TITLE: &str = "Energy Trading API";
/// Version the API reports about itself.
pub const API_VERSION: &str = "1.0.0";

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub metrics: MetricsEngine,
}

/// Builds the router with every route and middleware layer attached.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::home))
        .route("/pnl/:strategy_id", get(handlers::get_pnl))
        .route("/volume/buy", get(handlers::get_total_buy_volume))
        .route("/volume/sell", get(handlers::get_total_sell_volume))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the ledger described by `config` and serves the API until shutdown.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Tracing is initialized by the binary that calls us.
    let pool = database::connect(&config.database).await?;
    let ledger = LedgerRepository::new(pool, config.database.ledger_table);
    let state = Arc::new(AppState {
        metrics: MetricsEngine::new(ledger),
    });

    serve(config.server.socket_addr(), state).await
}

/// Serves the API on `addr` with an already-built state.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let table = state.metrics.ledger().ledger_table();
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        %table,
        "{} v{} listening on http://{}",
        API_TITLE,
        API_VERSION,
        addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
