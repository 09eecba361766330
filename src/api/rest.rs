// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`.  The facade is stateless apart from the
// configured engine: callers post a price history and get the full indicator
// report back.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::app_state::{AppState, UsageSnapshot};
use crate::market_data::ChartResponse;
use crate::types::{AnalysisResult, RawHistory};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS and tracing middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/analyze/chart/:symbol", post(analyze_chart))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    history_policy: String,
    usage: UsageSnapshot,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
        history_policy: state.engine.policy().to_string(),
        usage: state.usage(),
    })
}

// =============================================================================
// Analysis
// =============================================================================

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(mut history): Json<RawHistory>,
) -> Result<Json<AnalysisResult>, ApiError> {
    history.symbol = normalise_symbol(&history.symbol)?;
    run(&state, &history)
}

async fn analyze_chart(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Json(chart): Json<ChartResponse>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let symbol = normalise_symbol(&symbol)?;
    let history = chart.into_history(&symbol).inspect_err(|e| {
        warn!(symbol = %symbol, error = %e, "chart payload rejected");
        state.record_rejected();
    })?;
    run(&state, &history)
}

fn run(state: &AppState, history: &RawHistory) -> Result<Json<AnalysisResult>, ApiError> {
    match state.engine.analyze(history) {
        Ok(result) => {
            state.record_completed();
            info!(
                symbol = %result.symbol,
                points = history.close.len(),
                buy = result.summary.buy,
                sell = result.summary.sell,
                neutral = result.summary.neutral,
                "analysis completed"
            );
            Ok(Json(result))
        }
        Err(e) => {
            state.record_rejected();
            warn!(symbol = %history.symbol, error = %e, "analysis rejected");
            Err(e.into())
        }
    }
}

fn normalise_symbol(raw: &str) -> Result<String, ApiError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("symbol is required".to_string()));
    }
    Ok(symbol)
}
