use analytics::{AnalyticsError, MetricsEngine};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{Config, LedgerTable};
use core_types::TradeSide;
use database::{connect, LedgerRepository};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the energy trading metrics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; settings then come from config.toml and the environment.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut config = configuration::load_config_from(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(table) = cli.table {
        config.database.ledger_table = table;
    }
    tracing::debug!(table = %config.database.ledger_table, "Reporting on ledger table.");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await,
        Commands::Strategies => handle_strategies(&metrics_engine(&config).await?).await,
        Commands::Pnl(args) => handle_pnl(args, &metrics_engine(&config).await?).await,
        Commands::Volume => handle_volume(&metrics_engine(&config).await?).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reports profit-and-loss and traded volume from an energy trade ledger.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Ledger table to report on, overriding the configuration.
    #[arg(long, global = true, value_enum)]
    table: Option<LedgerTable>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the metrics over HTTP.
    Serve(ServeArgs),
    /// List the strategies present in the ledger.
    Strategies,
    /// Print the profit-and-loss of one strategy.
    Pnl(PnlArgs),
    /// Print the total buy and sell volume.
    Volume,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct PnlArgs {
    /// The strategy identifier (e.g., "strategy_1").
    strategy: String,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn metrics_engine(config: &Config) -> anyhow::Result<MetricsEngine> {
    let pool = connect(&config.database).await?;
    Ok(MetricsEngine::new(LedgerRepository::new(
        pool,
        config.database.ledger_table,
    )))
}

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    web_server::run_server(&config).await
}

async fn handle_strategies(engine: &MetricsEngine) -> anyhow::Result<()> {
    let mut strategies = engine.available_strategies().await?;
    strategies.sort();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Strategy"]);
    for strategy in &strategies {
        table.add_row(vec![strategy]);
    }
    println!("{table}");
    println!(
        "{} strategies in {}",
        strategies.len(),
        engine.ledger().ledger_table()
    );
    Ok(())
}

async fn handle_pnl(args: PnlArgs, engine: &MetricsEngine) -> anyhow::Result<()> {
    let report = match engine.pnl_report(&args.strategy).await {
        Ok(report) => report,
        Err(AnalyticsError::StrategyNotFound {
            strategy,
            mut available,
        }) => {
            available.sort();
            anyhow::bail!(
                "strategy '{}' not found; available strategies: {}",
                strategy,
                available.join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Strategy", "PnL", "Unit", "Captured"]);
    table.add_row(vec![
        report.strategy.clone(),
        format!("{:.2}", report.value),
        report.unit.to_string(),
        report.capture_time_iso(),
    ]);
    println!("{table}");
    Ok(())
}

async fn handle_volume(engine: &MetricsEngine) -> anyhow::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Side", "Volume", "Unit"]);
    for side in [TradeSide::Buy, TradeSide::Sell] {
        let report = engine.volume_report(side).await?;
        table.add_row(vec![
            side.to_string(),
            format!("{:.3}", report.value),
            report.unit.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
