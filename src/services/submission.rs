// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credit-metered analysis submission.
//!
//! A submission moves Received -> Gated -> {Rejected | Committed}:
//! 1. Validate the request
//! 2. Lock the user's row and read the balance
//! 3. Run the entitlement gate against that balance
//! 4. Insert the analysis and debit the cost in the same transaction
//!
//! Any early return drops the transaction, which rolls it back, so a
//! rejected, failed or cancelled submission leaves no trace.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Analysis, Prediction};
use crate::services::{check_entitlement, AnalysisStore};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Submission as received from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    #[serde(alias = "clerkId")]
    #[validate(custom(function = "crate::services::not_blank"))]
    pub external_id: String,
    #[serde(alias = "imageUrl")]
    #[validate(custom(function = "crate::services::not_blank"))]
    pub image_ref: String,
    #[validate(length(min = 1, message = "predictions must not be empty"), nested)]
    pub predictions: Vec<Prediction>,
}

/// Result of a committed submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmissionReceipt {
    pub analysis: Analysis,
    /// Balance after the debit
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub remaining_credits: i64,
}

#[derive(Clone)]
pub struct SubmissionService {
    db: Database,
    records: AnalysisStore,
    cost: i64,
}

impl SubmissionService {
    pub fn new(db: Database, records: AnalysisStore, cost: i64) -> Self {
        Self { db, records, cost }
    }

    /// Credits debited per committed submission.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Run a submission to completion. Either both the analysis row and the
    /// debit are committed, or neither is.
    pub async fn submit(&self, submission: NewSubmission) -> Result<SubmissionReceipt> {
        submission.validate()?;

        let external_id = submission.external_id.trim();
        let mut tx = self.db.begin().await?;

        let user = Database::lock_user(&mut *tx, external_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", external_id)))?;

        if let Err(denied) = check_entitlement(&user, self.cost).into_result() {
            tracing::info!(
                external_id,
                cost = self.cost,
                credits = user.credits,
                "Submission rejected: insufficient credits"
            );
            return Err(denied);
        }

        let analysis = self
            .records
            .create_analysis(
                &mut *tx,
                &user.id,
                &submission.image_ref,
                submission.predictions,
            )
            .await?;

        // The row lock makes a guard miss impossible, but a miss must
        // still abort rather than commit an unpaid record.
        let remaining_credits = Database::debit_credits(&mut *tx, &user.id, self.cost)
            .await?
            .ok_or(AppError::InsufficientCredits {
                required: self.cost,
                available: user.credits,
            })?;

        tx.commit().await?;

        tracing::info!(
            external_id,
            analysis_id = %analysis.id,
            cost = self.cost,
            remaining_credits,
            "Submission committed"
        );

        Ok(SubmissionReceipt {
            analysis,
            remaining_credits,
        })
    }
}
