// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User sync and lookup routes.

use crate::error::Result;
use crate::models::{User, UserProfile};
use crate::services::SyncUser;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync", post(sync_user))
        .route("/user/{external_id}", get(get_user))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SyncResponse {
    pub user: User,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Create or refresh a user from identity-provider profile fields.
async fn sync_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SyncUser>, JsonRejection>,
) -> Result<Json<SyncResponse>> {
    let Json(request) = payload?;
    let user = state.ledger.sync_user(&request).await?;
    Ok(Json(SyncResponse { user }))
}

/// Get a user with their recent analyses.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state.ledger.get_profile(&external_id).await?;
    Ok(Json(UserResponse { user }))
}
