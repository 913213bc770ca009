// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! HairLens API: credit-metered image analysis backend
//!
//! This crate keeps users and their credit balances, and records analyses
//! produced by the in-browser model, charging credits for each one.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{AnalysisStore, SubmissionService, UserLedger};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub ledger: UserLedger,
    pub records: AnalysisStore,
    pub submissions: SubmissionService,
}

impl AppState {
    /// Wire the services around an open database.
    pub fn new(config: Config, db: Database) -> Self {
        let ledger = UserLedger::new(db.clone(), config.starting_credits);
        let records = AnalysisStore::new(db.clone());
        let submissions = SubmissionService::new(db.clone(), records.clone(), config.analysis_cost);

        Self {
            config,
            db,
            ledger,
            records,
            submissions,
        }
    }
}
