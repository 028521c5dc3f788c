use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    auth::CurrentUser, error::ApiResult, main_lib::AppState, models::CreatePortfolioRequest,
};
use wheeltrack_core::portfolios::{NewPortfolio, Portfolio, PortfolioDetail};

async fn list_portfolios(
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Portfolio>>> {
    let portfolios = state.portfolio_service.list_portfolios(&current.user_id)?;
    Ok(Json(portfolios))
}

async fn create_portfolio(
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePortfolioRequest>,
) -> ApiResult<(StatusCode, Json<Portfolio>)> {
    let (name, starting_capital) = payload.validate()?;
    let portfolio = state
        .portfolio_service
        .create_portfolio(
            &current.user_id,
            NewPortfolio {
                id: None,
                name,
                starting_capital,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

async fn get_portfolio(
    Path(id): Path<String>,
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioDetail>> {
    let detail = state
        .portfolio_service
        .portfolio_detail(&current.user_id, &id)?;
    Ok(Json(detail))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/portfolios",
            get(list_portfolios).post(create_portfolio),
        )
        .route("/api/portfolios/{id}", get(get_portfolio))
}
