// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the user database | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `NETWORK` | Chain to read from (`mainnet` or `testnet`) | `mainnet` |
//! | `RPC_URL` | RPC endpoint override for the selected chain | Chain default |
//! | `TOKEN_ADDRESS` | Gating token contract address | Unset (balance gate skipped) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use crate::blockchain::{bsc_mainnet, bsc_testnet, NetworkConfig};

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the gating token contract address.
pub const TOKEN_ADDRESS_ENV: &str = "TOKEN_ADDRESS";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Directory holding the user database file.
    pub data_dir: PathBuf,
    /// Chain to read the gating token from.
    pub network: NetworkConfig,
    /// Gating token contract address, if configured.
    pub token_address: Option<String>,
}

impl Config {
    /// Load configuration from the environment, applying defaults.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let data_dir =
            PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string()));

        let mut network = match env::var("NETWORK").as_deref() {
            Ok("testnet") => bsc_testnet(),
            _ => bsc_mainnet(),
        };
        if let Ok(rpc_url) = env::var("RPC_URL") {
            network.rpc_url = rpc_url;
        }

        let token_address = env::var(TOKEN_ADDRESS_ENV).ok().filter(|t| !t.is_empty());

        Self {
            host,
            port,
            data_dir,
            network,
            token_address,
        }
    }

    /// Path of the user database file inside the data directory.
    pub fn user_db_path(&self) -> PathBuf {
        self.data_dir.join("users.redb")
    }
}
