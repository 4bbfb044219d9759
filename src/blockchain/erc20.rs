// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions.

use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};

use super::client::ChainClientError;

// Define the ERC-20 read interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
}

impl<P: Provider + Clone> Erc20Contract<P> {
    /// Create a new ERC-20 contract instance.
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, ChainClientError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| ChainClientError::InvalidAddress(e.to_string()))?;

        let contract = IERC20::new(address, provider.clone());

        Ok(Self { contract })
    }

    /// Get the raw (smallest-unit) balance of an address.
    pub async fn balance_of(&self, holder_address: &str) -> Result<U256, ChainClientError> {
        let addr = Address::from_str(holder_address)
            .map_err(|e| ChainClientError::InvalidAddress(e.to_string()))?;

        self.contract
            .balanceOf(addr)
            .call()
            .await
            .map_err(|e| ChainClientError::ContractError(e.to_string()))
    }
}

/// Format a raw balance as a human-readable decimal string.
///
/// Used for the balance snapshot persisted at registration. Fractional
/// digits are trimmed of trailing zeros and capped at 6 places.
pub fn format_token_balance(balance: U256, decimals: u8) -> String {
    if balance.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, &trimmed[..trimmed.len().min(6)])
        }
    }
}
