// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User ledger: identity mapping and credit balances.
//!
//! Profile sync never changes a balance. Balances move only through
//! `adjust_credits` here and the debit inside a submission.

use crate::db::users::NewUser;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{User, UserProfile};
use serde::Deserialize;
use validator::Validate;

/// Number of analyses embedded in a user profile.
pub const PROFILE_RECENT_ANALYSES: u64 = 10;

/// Profile fields pushed by the frontend after sign-in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncUser {
    #[serde(alias = "clerkId")]
    #[validate(custom(function = "crate::services::not_blank"))]
    pub external_id: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub avatar: Option<String>,
}

#[derive(Clone)]
pub struct UserLedger {
    db: Database,
    starting_credits: i64,
}

impl UserLedger {
    pub fn new(db: Database, starting_credits: i64) -> Self {
        Self {
            db,
            starting_credits,
        }
    }

    /// Create the user on first sync, otherwise refresh profile fields.
    pub async fn sync_user(&self, request: &SyncUser) -> Result<User> {
        request.validate()?;

        let profile = NewUser {
            external_id: request.external_id.trim(),
            email: request.email.trim(),
            name: request.name.as_deref(),
            avatar_url: request.avatar.as_deref(),
        };
        let user = self.db.upsert_user(&profile, self.starting_credits).await?;

        tracing::info!(
            external_id = %user.external_id,
            credits = user.credits,
            "User synced"
        );
        Ok(user)
    }

    /// Get a user by external id.
    ///
    /// Ids are trimmed the same way `sync_user` stores them.
    pub async fn get_user(&self, external_id: &str) -> Result<User> {
        let external_id = external_id.trim();
        self.db
            .get_user(external_id)
            .await?
            .ok_or_else(|| not_found(external_id))
    }

    /// Get a user with their most recent analyses embedded.
    pub async fn get_profile(&self, external_id: &str) -> Result<UserProfile> {
        let user = self.get_user(external_id).await?;
        let analyses = self
            .db
            .list_analyses(&user.id, PROFILE_RECENT_ANALYSES)
            .await?;
        let analysis_count = self.db.count_analyses(&user.id).await?;

        Ok(UserProfile {
            user,
            analysis_count,
            analyses,
        })
    }

    /// Add `delta` (possibly negative) to the balance and return the new one.
    ///
    /// The balance never goes below zero: a delta that would cross it is
    /// rejected with `InsufficientCredits` and nothing changes. A delta that
    /// would overflow the balance is a `BadRequest`.
    pub async fn adjust_credits(&self, external_id: &str, delta: i64) -> Result<i64> {
        let external_id = external_id.trim();
        let mut tx = self.db.begin().await?;

        let user = Database::lock_user(&mut *tx, external_id)
            .await?
            .ok_or_else(|| not_found(external_id))?;

        let Some(credits) = user.credits.checked_add(delta) else {
            tracing::info!(external_id, delta, "Credit adjustment overflows balance");
            return Err(AppError::BadRequest(
                "credit adjustment overflows balance".to_string(),
            ));
        };
        if credits < 0 {
            tracing::info!(
                external_id,
                delta,
                credits = user.credits,
                "Credit adjustment rejected"
            );
            return Err(AppError::InsufficientCredits {
                required: delta.saturating_neg(),
                available: user.credits,
            });
        }

        let credits = Database::set_credits(&mut *tx, &user.id, credits).await?;
        tx.commit().await?;

        tracing::info!(external_id, delta, credits, "Credits adjusted");
        Ok(credits)
    }

    /// Top up a balance. Only positive amounts are accepted.
    pub async fn purchase_credits(&self, external_id: &str, credits: i64) -> Result<i64> {
        if credits <= 0 {
            return Err(AppError::BadRequest(
                "credits must be a positive integer".to_string(),
            ));
        }
        self.adjust_credits(external_id, credits).await
    }
}

fn not_found(external_id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", external_id))
}
