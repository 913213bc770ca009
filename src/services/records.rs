// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analysis record store (append-only).

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Analysis, Prediction};
use sqlx::SqliteConnection;

/// Default page size for history listings.
pub const DEFAULT_HISTORY_LIMIT: u64 = 10;

#[derive(Clone)]
pub struct AnalysisStore {
    db: Database,
}

impl AnalysisStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Build and persist an analysis on `conn`.
    ///
    /// Takes a connection rather than the pool so the insert can share the
    /// caller's transaction. Does not touch the user's balance.
    pub async fn create_analysis(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
        image_ref: &str,
        predictions: Vec<Prediction>,
    ) -> Result<Analysis> {
        let analysis = Analysis::new(user_id, image_ref, predictions)
            .ok_or_else(|| AppError::BadRequest("predictions must not be empty".to_string()))?;

        Database::insert_analysis(conn, &analysis).await?;

        tracing::debug!(
            analysis_id = %analysis.id,
            user_id,
            top_label = %analysis.top_label,
            top_probability = analysis.top_probability,
            "Analysis stored"
        );
        Ok(analysis)
    }

    /// Up to `limit` analyses for a user, newest first.
    pub async fn list_analyses(&self, user_id: &str, limit: u64) -> Result<Vec<Analysis>> {
        self.db.list_analyses(user_id, limit).await
    }
}
