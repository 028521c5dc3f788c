use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{CloseTradeRequest, CreateAdjustmentRequest, CreateTradeRequest, UpdateTradeRequest},
};
use wheeltrack_core::trades::{Trade, TradeAdjustment, TradeWithMetrics};

async fn create_trade(
    Path(portfolio_id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTradeRequest>,
) -> ApiResult<(StatusCode, Json<Trade>)> {
    let new_trade = payload.validate()?;
    let trade = state
        .trade_service
        .create_trade(&current.user_id, &portfolio_id, new_trade)
        .await?;
    Ok((StatusCode::CREATED, Json(trade)))
}

async fn get_trade(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TradeWithMetrics>> {
    let trade = state.trade_service.get_trade(&current.user_id, &id)?;
    Ok(Json(trade))
}

async fn update_trade(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTradeRequest>,
) -> ApiResult<Json<Trade>> {
    let update = payload.validate()?;
    let trade = state
        .trade_service
        .update_trade(&current.user_id, &id, update)
        .await?;
    Ok(Json(trade))
}

async fn add_adjustment(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAdjustmentRequest>,
) -> ApiResult<(StatusCode, Json<TradeAdjustment>)> {
    let adjustment = payload.validate()?;
    let created = state
        .trade_service
        .add_adjustment(&current.user_id, &id, adjustment)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn close_trade(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CloseTradeRequest>,
) -> ApiResult<Json<Trade>> {
    let close = payload.validate()?;
    let trade = state
        .trade_service
        .close_trade(&current.user_id, &id, close)
        .await?;
    Ok(Json(trade))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/portfolios/{id}/trades", post(create_trade))
        .route("/api/trades/{id}", get(get_trade).patch(update_trade))
        .route("/api/trades/{id}/adjustments", post(add_adjustment))
        .route("/api/trades/{id}/close", post(close_trade))
}
