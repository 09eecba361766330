// =============================================================================
// Indicator Desk — Main Entry Point
// =============================================================================
//
//   indicator-desk [serve]                  start the REST facade
//   indicator-desk analyze <chart.json> [SYMBOL]
//                                           analyse a saved chart payload and
//                                           print the report as JSON
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod engine;
mod error;
mod indicators;
mod market_data;
mod runtime_config;
mod signals;
mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::{RuntimeConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "indicator-desk")]
#[command(about = "Technical indicator engine and REST facade", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST facade (default)
    Serve,

    /// Analyse a saved chart payload and print the report as JSON
    Analyze {
        /// Chart JSON file
        path: PathBuf,

        /// Ticker symbol (default: the file name without extension)
        symbol: Option<String>,
    },
}

/// Explicit symbol if given, else `data/volv-b.st.json` -> `VOLV-B.ST`.
fn resolve_symbol(path: &Path, symbol: Option<&str>) -> String {
    symbol
        .or_else(|| path.file_stem().and_then(|s| s.to_str()))
        .unwrap_or_default()
        .trim()
        .to_uppercase()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RuntimeConfig::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = format!("{e:#}"), "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    info!(
        policy = %config.history_policy,
        rsi_period = config.indicators.rsi_period,
        "Indicator engine configured"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Analyze { path, symbol } => {
            let symbol = resolve_symbol(&path, symbol.as_deref());
            analyze_file(&config, &path, &symbol)
        }
    }
}

// ── REST facade ──────────────────────────────────────────────────────────────
async fn serve(config: RuntimeConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(&config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
    }
}

// ── One-shot analysis ────────────────────────────────────────────────────────
fn analyze_file(config: &RuntimeConfig, path: &Path, symbol: &str) -> anyhow::Result<()> {
    if symbol.is_empty() {
        bail!("could not derive a symbol from {}", path.display());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chart payload from {}", path.display()))?;
    let history = market_data::parse_chart(&json, symbol)
        .with_context(|| format!("failed to decode chart payload for {symbol}"))?;

    let result = config
        .engine()
        .analyze(&history)
        .with_context(|| format!("analysis failed for {symbol}"))?;

    info!(
        symbol = %result.symbol,
        price = result.current_price,
        buy = result.summary.buy,
        sell = result.summary.sell,
        neutral = result.summary.neutral,
        "analysis completed"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("failed to serialise analysis result")?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("indicator-desk").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_arguments_means_serve() {
        assert!(parse(&[]).command.is_none());
        assert!(matches!(parse(&["serve"]).command, Some(Commands::Serve)));
    }

    #[test]
    fn analyze_derives_symbol_from_file_name() {
        match parse(&["analyze", "data/volv-b.st.json"]).command {
            Some(Commands::Analyze { path, symbol }) => {
                assert_eq!(path, PathBuf::from("data/volv-b.st.json"));
                assert_eq!(symbol, None);
                assert_eq!(resolve_symbol(&path, symbol.as_deref()), "VOLV-B.ST");
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_accepts_explicit_symbol() {
        match parse(&["analyze", "dump.json", " aapl "]).command {
            Some(Commands::Analyze { path, symbol }) => {
                assert_eq!(resolve_symbol(&path, symbol.as_deref()), "AAPL");
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_without_path_and_unknown_commands_fail() {
        assert!(Cli::try_parse_from(["indicator-desk", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["indicator-desk", "backtest"]).is_err());
    }

    #[test]
    fn analyze_file_runs_end_to_end() {
        let dir =
            std::env::temp_dir().join(format!("indicator-desk-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.json");

        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let payload = serde_json::json!({
            "chart": { "result": [{
                "meta": { "currency": "USD" },
                "timestamp": (0..60i64).map(|i| 1_700_006_400 + i * 86_400).collect::<Vec<_>>(),
                "indicators": { "quote": [{
                    "close": closes,
                    "high": closes.iter().map(|c| c + 1.0).collect::<Vec<_>>(),
                    "low": closes.iter().map(|c| c - 1.0).collect::<Vec<_>>(),
                }]}
            }]}
        });
        std::fs::write(&path, payload.to_string()).unwrap();

        assert!(analyze_file(&RuntimeConfig::default(), &path, "TEST").is_ok());

        let fixed = RuntimeConfig {
            history_policy: engine::MinimumHistoryPolicy::fixed(),
            ..RuntimeConfig::default()
        };
        assert!(analyze_file(&fixed, &path, "TEST").is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
