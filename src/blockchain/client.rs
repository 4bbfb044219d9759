// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BSC chain client for read-only token balance queries.

use alloy::{
    network::Ethereum,
    primitives::U256,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, ProviderBuilder, RootProvider,
    },
};
use async_trait::async_trait;

use super::erc20::Erc20Contract;
use super::types::NetworkConfig;

/// HTTP provider type for the configured EVM chain (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Read-only view of the gating token's balances.
///
/// The login orchestrator depends on this trait rather than on the concrete
/// RPC client so tests can substitute a deterministic implementation.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Raw (smallest-unit) balance of `holder_address` for the token at
    /// `token_address`.
    async fn token_balance(
        &self,
        token_address: &str,
        holder_address: &str,
    ) -> Result<U256, ChainClientError>;
}

/// Long-lived EVM chain client, safe for concurrent use.
pub struct ChainClient {
    /// Network configuration
    network: NetworkConfig,
    /// Alloy HTTP provider
    provider: HttpProvider,
}

impl ChainClient {
    /// Create a new client for the specified network.
    pub fn new(network: NetworkConfig) -> Result<Self, ChainClientError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainClientError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { network, provider })
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[async_trait]
impl BalanceReader for ChainClient {
    async fn token_balance(
        &self,
        token_address: &str,
        holder_address: &str,
    ) -> Result<U256, ChainClientError> {
        let contract = Erc20Contract::new(&self.provider, token_address)?;
        contract.balance_of(holder_address).await
    }
}

/// Errors that can occur during chain reads.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Contract error: {0}")]
    ContractError(String),
}
