// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures for the login endpoint. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! ## Response Envelope
//!
//! Every response, success or error, uses the `{ code, msg, ... }` envelope:
//! `code` 0 carries a `data` payload; a non-zero `code` carries an optional
//! `error` detail and mirrors the HTTP status (400/401/500).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Check that a string is a well-formed wallet address:
/// `0x` followed by 40 hex characters.
pub fn is_wallet_address(value: &str) -> bool {
    let Some(hex) = value.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Claimed wallet address (`0x` + 40 hex chars, any case).
    pub address: String,
    /// Wallet signature over the challenge message.
    pub signature: String,
    /// Caller-supplied random string embedded in the challenge.
    pub nonce: String,
    /// Invite code of the referring user, if any.
    #[serde(default)]
    pub invite_code: Option<String>,
}

/// Login response payload.
///
/// `inviter` and `invite_code` are only populated when the user is
/// eligible to invite others; they stay `null` otherwise even though a
/// code is persisted internally.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Lowercase wallet address of the authenticated user.
    pub address: String,
    /// Lowercase address of the referring user, revealed when eligible.
    pub inviter: Option<String>,
    /// Whether this login created the user record.
    pub is_new: bool,
    /// Number of users this user has referred (live aggregate).
    pub count: u64,
    /// The user's own invite code, revealed when eligible.
    pub invite_code: Option<String>,
}

/// Success envelope for the login endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always 0 on success.
    pub code: i32,
    /// Human-readable status text.
    pub msg: String,
    /// Login payload.
    pub data: LoginData,
}

impl LoginResponse {
    pub fn new(msg: impl Into<String>, data: LoginData) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_validation() {
        assert!(is_wallet_address(
            "0xaaaa000000000000000000000000000000000001"
        ));
        assert!(is_wallet_address(
            "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12"
        ));

        assert!(!is_wallet_address(""));
        assert!(!is_wallet_address("0x1234"));
        assert!(!is_wallet_address(
            "aaaa000000000000000000000000000000000001"
        ));
        assert!(!is_wallet_address(
            "0xzzzz000000000000000000000000000000000001"
        ));
        assert!(!is_wallet_address(
            "0xaaaa0000000000000000000000000000000000012"
        ));
    }

    #[test]
    fn login_request_accepts_camel_case_invite_code() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"address":"0xabc","signature":"0xdef","nonce":"n1","inviteCode":"code0001"}"#,
        )
        .unwrap();
        assert_eq!(req.invite_code.as_deref(), Some("code0001"));

        let req: LoginRequest =
            serde_json::from_str(r#"{"address":"0xabc","signature":"0xdef","nonce":"n1"}"#)
                .unwrap();
        assert!(req.invite_code.is_none());
    }

    #[test]
    fn login_response_serializes_envelope_shape() {
        let resp = LoginResponse::new(
            "login successful",
            LoginData {
                address: "0xaaaa000000000000000000000000000000000001".to_string(),
                inviter: None,
                is_new: false,
                count: 2,
                invite_code: None,
            },
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["isNew"], false);
        assert_eq!(json["data"]["count"], 2);
        assert!(json["data"]["inviter"].is_null());
        assert!(json["data"]["inviteCode"].is_null());
    }
}
