// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Referral Login Server - Wallet-Signature Authentication with Referrals
//!
//! This crate provides the single login endpoint of a token-gated community
//! application: nonce-challenge signature verification, schema-tolerant user
//! persistence, invite-code bookkeeping, and on-chain balance gating.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Challenge message and wallet-signature verification
//! - `blockchain` - BSC (EVM) chain reads for the gating token
//! - `referral` - Invite-code generation and eligibility rules
//! - `storage` - Embedded user database (redb)

pub mod api;
pub mod auth;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod referral;
pub mod state;
pub mod storage;
