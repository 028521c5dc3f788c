//! Development seed endpoint: ensures the admin user exists.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};
use wheeltrack_core::users::{NewUser, User};

const SEED_ADMIN_EMAIL: &str = "admin@wheeltrack.local";
const SEED_ADMIN_USERNAME: &str = "admin";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUserResponse {
    pub created: bool,
    pub user: User,
}

pub async fn seed_user(State(state): State<Arc<AppState>>) -> ApiResult<Json<SeedUserResponse>> {
    if let Some(existing) = state.user_service.find_by_identifier(SEED_ADMIN_USERNAME)? {
        return Ok(Json(SeedUserResponse {
            created: false,
            user: existing,
        }));
    }

    let password_hash = state.auth.hash_password(&state.seed_admin_password)?;
    let user = state
        .user_service
        .register(NewUser {
            id: None,
            email: SEED_ADMIN_EMAIL.to_string(),
            username: SEED_ADMIN_USERNAME.to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            password_hash,
            is_admin: true,
        })
        .await?;
    tracing::info!("Seeded admin user {}", user.id);
    Ok(Json(SeedUserResponse {
        created: true,
        user,
    }))
}
