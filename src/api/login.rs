// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint: wallet-signature authentication plus referral bookkeeping.
//!
//! Request lifecycle: validate input, verify the signature, probe the
//! schema, look up the user, then take the existing-user or new-user
//! branch. Input and signature failures return before any storage work;
//! a chain-read failure degrades to zero balance and never blocks
//! registration.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    auth::{login_message, verify_wallet_signature},
    blockchain::format_token_balance,
    error::ApiError,
    models::{is_wallet_address, LoginData, LoginRequest, LoginResponse},
    referral::{can_invite_at_registration, generate_invite_code, reveals_referral, TOKEN_DECIMALS},
    state::AppState,
    storage::StoredUser,
};

use alloy::primitives::U256;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    tag = "Login",
    responses(
        (status = 200, description = "Login or registration succeeded", body = LoginResponse),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 401, description = "Signature verification failed"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // 1. ValidateInput
    if req.signature.is_empty() || req.nonce.is_empty() || !is_wallet_address(&req.address) {
        return Err(ApiError::bad_request("missing or invalid parameters"));
    }

    // 2. VerifySignature. The message must match the frontend byte for byte.
    let message = login_message(&req.nonce);
    if !verify_wallet_signature(&req.address, &message, &req.signature) {
        return Err(ApiError::unauthorized("signature verification failed"));
    }

    let address = req.address.to_lowercase();

    // 3. ProbeSchema. Informational only, cannot fail the request.
    let has_balance_column = state.db.has_balance_column();

    // 4. LookupUser
    let existing = state
        .db
        .find_by_address(&address)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if let Some(user) = existing {
        return existing_user(&state, user).map(Json);
    }

    new_user(&state, address, req.invite_code, has_balance_column)
        .await
        .map(Json)
}

/// Existing-user branch: count invitees and re-derive eligibility from
/// the stored row.
fn existing_user(state: &AppState, user: StoredUser) -> Result<LoginResponse, ApiError> {
    let count = state
        .db
        .count_invitees(&user.address)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let reveal = reveals_referral(&user);
    let data = LoginData {
        address: user.address.clone(),
        inviter: if reveal { user.inviter.clone() } else { None },
        is_new: false,
        count,
        invite_code: if reveal { Some(user.invite_code) } else { None },
    };
    Ok(LoginResponse::new("login successful", data))
}

/// New-user branch: resolve the inviter, gate eligibility, persist.
async fn new_user(
    state: &AppState,
    address: String,
    invite_code: Option<String>,
    has_balance_column: bool,
) -> Result<LoginResponse, ApiError> {
    // A code that does not resolve is ignored silently; the user simply
    // registers without an inviter.
    let inviter = match invite_code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => state
            .db
            .find_by_invite_code(code)
            .map_err(|e| ApiError::internal(e.to_string()))?
            .map(|owner| owner.address.to_lowercase()),
        None => None,
    };

    // The chain is consulted only when there is no inviter: an invited
    // user is eligible regardless of balance.
    let mut balance = U256::ZERO;
    if inviter.is_none() {
        match state.token_address.as_deref() {
            None => {
                tracing::warn!("TOKEN_ADDRESS not configured, skipping balance gate");
            }
            Some(token) => match state.chain.token_balance(token, &address).await {
                Ok(read) => balance = read,
                Err(e) => {
                    // Balance unknown degrades to zero; registration proceeds.
                    tracing::warn!(error = %e, address = %address, "token balance read failed");
                }
            },
        }
    }

    let can_invite = can_invite_at_registration(inviter.as_deref(), balance);
    let new_code = generate_invite_code();

    let user = StoredUser {
        address: address.clone(),
        inviter: inviter.clone(),
        invite_code: new_code.clone(),
        created_at: Utc::now(),
        balance: has_balance_column.then(|| format_token_balance(balance, TOKEN_DECIMALS)),
    };

    // Not an upsert: the losing side of a concurrent first login for the
    // same address surfaces here as a storage failure.
    state
        .db
        .insert_user(&user)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let data = LoginData {
        address,
        inviter: if can_invite { inviter } else { None },
        is_new: true,
        count: 0,
        invite_code: if can_invite { Some(new_code) } else { None },
    };
    Ok(LoginResponse::new("registered and logged in", data))
}
