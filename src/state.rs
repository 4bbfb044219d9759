// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::BalanceReader;
use crate::storage::UserDatabase;

/// Shared application state.
///
/// Both handles are long-lived and safe for concurrent use: redb provides
/// its own internal serialization, and the chain client is read-only. The
/// balance reader is injected as a trait object so tests can substitute a
/// deterministic implementation.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<UserDatabase>,
    pub chain: Arc<dyn BalanceReader>,
    /// Gating token contract address; when absent, the balance path of
    /// invite eligibility is skipped.
    pub token_address: Option<String>,
}

impl AppState {
    pub fn new(
        db: Arc<UserDatabase>,
        chain: Arc<dyn BalanceReader>,
        token_address: Option<String>,
    ) -> Self {
        Self {
            db,
            chain,
            token_address,
        }
    }
}
