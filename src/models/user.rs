// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Analysis;

/// User row with its credit balance.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Internal id (foreign key target for analyses)
    pub id: String,
    /// Identity provider subject, immutable once created
    pub external_id: String,
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Profile picture URL
    pub avatar_url: Option<String>,
    /// Current credit balance
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credits: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User together with their most recent analyses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    /// Total analyses ever stored for this user
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub analysis_count: i64,
    /// Most recent analyses, newest first
    pub analyses: Vec<Analysis>,
}
