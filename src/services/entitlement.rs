// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entitlement gate: may this user pay for a submission?

use crate::error::AppError;
use crate::models::User;

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Allowed,
    Denied { required: i64, available: i64 },
}

impl Entitlement {
    /// Convert a denial into `AppError::InsufficientCredits`.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Entitlement::Allowed => Ok(()),
            Entitlement::Denied {
                required,
                available,
            } => Err(AppError::InsufficientCredits {
                required,
                available,
            }),
        }
    }
}

/// Allowed iff the user's balance covers `cost`. No side effects.
///
/// Only meaningful when `user` was read under the same lock as the debit
/// that follows.
pub fn check_entitlement(user: &User, cost: i64) -> Entitlement {
    if user.credits >= cost {
        Entitlement::Allowed
    } else {
        Entitlement::Denied {
            required: cost,
            available: user.credits,
        }
    }
}
