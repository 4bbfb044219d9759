// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for BSC (EVM).
//!
//! This module provides functionality for:
//! - Querying the ERC-20 gating token balance of a candidate address
//! - A mockable [`BalanceReader`] seam for the login orchestrator
//!
//! Failure policy: chain reads are advisory. The caller treats any error
//! as "balance unknown" and degrades to zero, never failing registration.

pub mod client;
pub mod erc20;
pub mod types;

pub use client::{BalanceReader, ChainClient, ChainClientError};
pub use erc20::format_token_balance;
pub use types::{bsc_mainnet, bsc_testnet, NetworkConfig};
