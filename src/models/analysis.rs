// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Analysis records and the prediction lists they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One (label, probability) pair produced by the inference model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Prediction {
    #[serde(alias = "className")]
    #[validate(custom(function = "crate::services::not_blank"))]
    pub label: String,
    #[validate(range(min = 0.0, max = 1.0, message = "probability must be within [0, 1]"))]
    pub probability: f64,
}

/// Stored analysis. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Analysis {
    pub id: String,
    /// Owning user's internal id
    pub user_id: String,
    /// Data URI or external URL of the analysed image
    pub image_ref: String,
    /// Full prediction list in submission order (stored as a JSON blob)
    #[sqlx(json)]
    pub predictions: Vec<Prediction>,
    pub top_label: String,
    pub top_probability: f64,
    pub created_at: DateTime<Utc>,
}

impl Analysis {
    /// Build a new record, deriving the top prediction from `predictions`.
    ///
    /// Returns `None` if `predictions` is empty.
    pub fn new(user_id: &str, image_ref: &str, predictions: Vec<Prediction>) -> Option<Self> {
        let top = top_prediction(&predictions)?.clone();
        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            image_ref: image_ref.to_string(),
            predictions,
            top_label: top.label,
            top_probability: top.probability,
            created_at: Utc::now(),
        })
    }
}

/// Highest-probability prediction. On ties the earliest element wins.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    predictions.iter().reduce(|best, current| {
        if current.probability > best.probability {
            current
        } else {
            best
        }
    })
}
