// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Wallet-signature authentication for the login endpoint.
//!
//! ## Auth Flow
//!
//! 1. Frontend generates a random nonce and asks the wallet to sign the
//!    challenge message (`Login with <nonce>`, EIP-191 personal message)
//! 2. Frontend sends `{ address, signature, nonce }` to `POST /api/login`
//! 3. Server rebuilds the challenge from the nonce, recovers the signing
//!    address from the signature, and compares it to the claimed address
//!
//! ## Security
//!
//! - Verification fails closed: malformed addresses or signatures yield
//!   `false`, never a panic or an escaped error
//! - Address comparison is case-insensitive
//! - Nonce uniqueness (replay protection) is the caller's responsibility;
//!   there is no server-side nonce store

pub mod challenge;
pub mod signature;

pub use challenge::login_message;
pub use signature::verify_wallet_signature;
