// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod entitlement;
pub mod ledger;
pub mod records;
pub mod submission;

pub use entitlement::{check_entitlement, Entitlement};
pub use ledger::{SyncUser, UserLedger};
pub use records::AnalysisStore;
pub use submission::{NewSubmission, SubmissionReceipt, SubmissionService};

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
