// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Queries against the `users` table.

use super::Database;
use crate::error::AppError;
use crate::models::User;
use chrono::Utc;
use sqlx::SqliteConnection;

/// Profile fields supplied by the identity provider on every sync.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub external_id: &'a str,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

impl Database {
    /// Get a user by external id.
    pub async fn get_user(&self, external_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    /// Insert a user with `starting_credits`, or refresh the profile fields
    /// of the existing one. Credits of an existing user are never touched;
    /// an absent name or avatar keeps the stored value.
    pub async fn upsert_user(
        &self,
        profile: &NewUser<'_>,
        starting_credits: i64,
    ) -> Result<User, AppError> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, external_id, email, name, avatar_url, credits, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(external_id) DO UPDATE SET \
                 email = excluded.email, \
                 name = COALESCE(excluded.name, users.name), \
                 avatar_url = COALESCE(excluded.avatar_url, users.avatar_url), \
                 updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(profile.external_id)
        .bind(profile.email)
        .bind(profile.name)
        .bind(profile.avatar_url)
        .bind(starting_credits)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        Ok(user)
    }

    /// Overwrite a user's balance. Callers compute `credits` while holding
    /// the row lock from [`Database::lock_user`].
    pub async fn set_credits(
        conn: &mut SqliteConnection,
        user_id: &str,
        credits: i64,
    ) -> Result<i64, AppError> {
        let credits = sqlx::query_scalar::<_, i64>(
            "UPDATE users SET credits = ?, updated_at = ? WHERE id = ? RETURNING credits",
        )
        .bind(credits)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(credits)
    }

    /// Take the write lock on a user's row and return it.
    ///
    /// SQLite has no `SELECT ... FOR UPDATE`; a no-op write makes the
    /// transaction the sole writer before the balance is read, so the value
    /// returned here cannot go stale before the transaction ends.
    pub async fn lock_user(
        conn: &mut SqliteConnection,
        external_id: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET credits = credits WHERE external_id = ? RETURNING *",
        )
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }

    /// Debit `cost` from a user, guarded so the balance cannot drop below it.
    ///
    /// Returns the new balance, or `None` if the guard rejected the debit.
    pub async fn debit_credits(
        conn: &mut SqliteConnection,
        user_id: &str,
        cost: i64,
    ) -> Result<Option<i64>, AppError> {
        let credits = sqlx::query_scalar::<_, i64>(
            "UPDATE users SET credits = credits - ?, updated_at = ? \
             WHERE id = ? AND credits >= ? \
             RETURNING credits",
        )
        .bind(cost)
        .bind(Utc::now())
        .bind(user_id)
        .bind(cost)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(credits)
    }
}
