// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login challenge message construction.
//!
//! The wallet signs this exact string on the frontend; any divergence
//! between the two sides makes every signature fail verification.

/// Build the challenge message for a login nonce.
///
/// The nonce is treated as an opaque string and embedded verbatim.
pub fn login_message(nonce: &str) -> String {
    format!("Login with {nonce}")
}
