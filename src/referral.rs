// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invite-code generation and eligibility rules.
//!
//! A code is always generated and persisted at creation; eligibility only
//! controls whether the code (and inviter) are revealed in responses.

use alloy::primitives::U256;

use crate::models::is_wallet_address;
use crate::storage::StoredUser;

/// Length of user-facing invite codes.
pub const INVITE_CODE_LEN: usize = 8;

/// Number of decimals of the gating token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Generate a fresh invite code: the leading slice of a random UUID.
///
/// Uniqueness is probabilistic; the invite-code index rejects the rare
/// collision at insert time rather than retrying here.
pub fn generate_invite_code() -> String {
    uuid::Uuid::new_v4().to_string()[..INVITE_CODE_LEN].to_string()
}

/// One whole unit of the gating token, in smallest units.
pub fn one_token() -> U256 {
    U256::from(10u64).pow(U256::from(TOKEN_DECIMALS as u64))
}

/// New-user rule: invited by an existing user, or holding at least one
/// whole unit of the gating token.
pub fn can_invite_at_registration(inviter: Option<&str>, balance: U256) -> bool {
    inviter.is_some() || balance >= one_token()
}

/// Existing-user rule, re-derived at every login: the stored inviter is a
/// well-formed address, or the recorded balance snapshot is positive.
pub fn reveals_referral(user: &StoredUser) -> bool {
    if let Some(inviter) = user.inviter.as_deref() {
        if is_wallet_address(inviter) {
            return true;
        }
    }
    let balance = user
        .balance
        .as_deref()
        .and_then(|b| b.parse::<f64>().ok())
        .unwrap_or(0.0);
    balance > 0.0
}
