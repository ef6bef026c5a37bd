use crate::{error::AppError, AppState, API_TITLE};
use axum::{
    extract::{Path, State},
    Json,
};
use core_types::{TradeSide, Unit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PnlResponse {
    pub strategy: String,
    pub value: f64,
    pub unit: Unit,
    /// ISO-8601 in UTC, always ending in `Z`.
    pub capture_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuyVolumeResponse {
    pub total_buy_volume: f64,
    pub unit: Unit,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SellVolumeResponse {
    pub total_sell_volume: f64,
    pub unit: Unit,
}

/// # GET /
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Welcome to the {API_TITLE}"),
    })
}

/// # GET /pnl/:strategy_id
/// Profit-and-loss of one strategy. Unknown strategies are a 404 listing the valid ones.
pub async fn get_pnl(
    Path(strategy_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PnlResponse>, AppError> {
    let report = state.metrics.pnl_report(&strategy_id).await?;
    Ok(Json(PnlResponse {
        capture_time: report.capture_time_iso(),
        strategy: report.strategy,
        value: report.value,
        unit: report.unit,
    }))
}

/// # GET /volume/buy
pub async fn get_total_buy_volume(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BuyVolumeResponse>, AppError> {
    let report = state.metrics.volume_report(TradeSide::Buy).await?;
    Ok(Json(BuyVolumeResponse {
        total_buy_volume: report.value,
        unit: report.unit,
    }))
}

/// # GET /volume/sell
pub async fn get_total_sell_volume(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SellVolumeResponse>, AppError> {
    let report = state.metrics.volume_report(TradeSide::Sell).await?;
    Ok(Json(SellVolumeResponse {
        total_sell_volume: report.value,
        unit: report.unit,
    }))
}
