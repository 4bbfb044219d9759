// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
}

/// BNB Smart Chain mainnet configuration.
pub fn bsc_mainnet() -> NetworkConfig {
    NetworkConfig {
        name: "BNB Smart Chain",
        chain_id: 56,
        rpc_url: "https://bsc-dataseed.binance.org".to_string(),
    }
}

/// BNB Smart Chain testnet configuration.
pub fn bsc_testnet() -> NetworkConfig {
    NetworkConfig {
        name: "BNB Smart Chain Testnet",
        chain_id: 97,
        rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545".to_string(),
    }
}
