// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Queries against the `analyses` table.

use super::Database;
use crate::error::AppError;
use crate::models::Analysis;
use sqlx::types::Json;
use sqlx::SqliteConnection;

impl Database {
    /// Insert an analysis row on the given connection.
    pub async fn insert_analysis(
        conn: &mut SqliteConnection,
        analysis: &Analysis,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO analyses (id, user_id, image_ref, predictions, top_label, top_probability, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&analysis.id)
        .bind(&analysis.user_id)
        .bind(&analysis.image_ref)
        .bind(Json(&analysis.predictions))
        .bind(&analysis.top_label)
        .bind(analysis.top_probability)
        .bind(analysis.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Most recent analyses for a user, newest first.
    ///
    /// SQLite limits are signed; anything past `i64::MAX` means "all rows".
    pub async fn list_analyses(&self, user_id: &str, limit: u64) -> Result<Vec<Analysis>, AppError> {
        let analyses = sqlx::query_as::<_, Analysis>(
            "SELECT * FROM analyses WHERE user_id = ? \
             ORDER BY created_at DESC, rowid DESC \
             LIMIT ?",
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(self.pool())
        .await?;
        Ok(analyses)
    }

    /// Number of analyses stored for a user.
    pub async fn count_analyses(&self, user_id: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM analyses WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
