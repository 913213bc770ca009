// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analysis;
pub mod user;

pub use analysis::{top_prediction, Analysis, Prediction};
pub use user::{User, UserProfile};
