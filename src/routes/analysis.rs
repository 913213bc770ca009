// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analysis submission and history routes.

use crate::error::Result;
use crate::models::Analysis;
use crate::services::records::DEFAULT_HISTORY_LIMIT;
use crate::services::{NewSubmission, SubmissionReceipt};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analysis", post(submit_analysis))
        .route("/analysis/{external_id}", get(list_analyses))
}

/// Submit an analysis, paying for it with credits.
async fn submit_analysis(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewSubmission>, JsonRejection>,
) -> Result<Json<SubmissionReceipt>> {
    let Json(submission) = payload?;
    let receipt = state.submissions.submit(submission).await?;
    Ok(Json(receipt))
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryResponse {
    pub analyses: Vec<Analysis>,
}

/// Get a user's analyses, newest first.
async fn list_analyses(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>> {
    let Query(params) = query?;
    tracing::debug!(external_id = %external_id, limit = params.limit, "Fetching analysis history");

    let user = state.ledger.get_user(&external_id).await?;
    let analyses = state.records.list_analyses(&user.id, params.limit).await?;
    Ok(Json(HistoryResponse { analyses }))
}
