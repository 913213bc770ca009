// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credit balance routes.

use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/credits/adjust", post(adjust_credits))
        .route("/credits/purchase", post(purchase_credits))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCreditsRequest {
    #[serde(alias = "clerkId")]
    pub external_id: String,
    /// Positive to add, negative to subtract
    pub amount: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCreditsRequest {
    #[serde(alias = "clerkId")]
    pub external_id: String,
    pub credits: i64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreditsResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credits: i64,
}

async fn adjust_credits(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AdjustCreditsRequest>, JsonRejection>,
) -> Result<Json<CreditsResponse>> {
    let Json(request) = payload?;
    let credits = state
        .ledger
        .adjust_credits(&request.external_id, request.amount)
        .await?;
    Ok(Json(CreditsResponse { credits }))
}

async fn purchase_credits(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PurchaseCreditsRequest>, JsonRejection>,
) -> Result<Json<CreditsResponse>> {
    let Json(request) = payload?;
    let credits = state
        .ledger
        .purchase_credits(&request.external_id, request.credits)
        .await?;
    Ok(Json(CreditsResponse { credits }))
}
