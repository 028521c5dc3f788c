use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::UpdateProfileRequest};
use wheeltrack_core::users::User;

async fn get_profile(
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&current.user_id)?;
    Ok(Json(user))
}

async fn update_profile(
    Extension(current): Extension<CurrentUser>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_service
        .update_profile(&current.user_id, payload.into())
        .await?;
    Ok(Json(user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/user/profile",
        get(get_profile).patch(update_profile),
    )
}
