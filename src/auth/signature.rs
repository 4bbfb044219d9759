// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EIP-191 wallet-signature verification.
//!
//! Recovers the signer address from a personal-message signature and
//! compares it against the claimed address. No key material is handled
//! here; only public recovery.

use std::str::FromStr;

use alloy::primitives::{Address, Signature};

/// Verify that `signature` over `message` was produced by `address`.
///
/// Fails closed: a malformed address, a malformed signature, or a failed
/// recovery all return `false`. The caller maps `false` to an unauthorized
/// response.
pub fn verify_wallet_signature(address: &str, message: &str, signature: &str) -> bool {
    let Ok(claimed) = Address::from_str(address) else {
        return false;
    };
    let Ok(sig) = Signature::from_str(signature) else {
        return false;
    };
    // recover_address_from_msg applies the EIP-191 prefix, matching what
    // wallets do for personal_sign.
    match sig.recover_address_from_msg(message) {
        Ok(recovered) => recovered == claimed,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login_message;
    use alloy::signers::{local::PrivateKeySigner, SignerSync};

    fn sign(signer: &PrivateKeySigner, message: &str) -> String {
        let sig = signer
            .sign_message_sync(message.as_bytes())
            .expect("signing succeeds");
        format!("0x{}", alloy::hex::encode(sig.as_bytes()))
    }

    #[test]
    fn valid_signature_verifies() {
        let signer = PrivateKeySigner::random();
        let message = login_message("n1");
        let sig = sign(&signer, &message);

        assert!(verify_wallet_signature(
            &signer.address().to_string(),
            &message,
            &sig
        ));
    }

    #[test]
    fn address_comparison_is_case_insensitive() {
        let signer = PrivateKeySigner::random();
        let message = login_message("n1");
        let sig = sign(&signer, &message);

        let lower = signer.address().to_string().to_lowercase();
        let upper = lower.to_uppercase().replace("0X", "0x");
        assert!(verify_wallet_signature(&lower, &message, &sig));
        assert!(verify_wallet_signature(&upper, &message, &sig));
    }

    #[test]
    fn wrong_address_fails() {
        let signer = PrivateKeySigner::random();
        let other = PrivateKeySigner::random();
        let message = login_message("n1");
        let sig = sign(&signer, &message);

        assert!(!verify_wallet_signature(
            &other.address().to_string(),
            &message,
            &sig
        ));
    }

    #[test]
    fn wrong_nonce_fails() {
        let signer = PrivateKeySigner::random();
        let sig = sign(&signer, &login_message("n1"));

        assert!(!verify_wallet_signature(
            &signer.address().to_string(),
            &login_message("n2"),
            &sig
        ));
    }

    #[test]
    fn tampered_signature_fails() {
        let signer = PrivateKeySigner::random();
        let message = login_message("n1");
        let mut sig = sign(&signer, &message);

        // Flip one hex digit in the middle of the signature.
        let flipped = if sig.as_bytes()[40] == b'0' { '1' } else { '0' };
        sig.replace_range(40..41, &flipped.to_string());

        assert!(!verify_wallet_signature(
            &signer.address().to_string(),
            &message,
            &sig
        ));
    }

    #[test]
    fn malformed_inputs_fail_closed() {
        let signer = PrivateKeySigner::random();
        let message = login_message("n1");
        let sig = sign(&signer, &message);
        let addr = signer.address().to_string();

        assert!(!verify_wallet_signature("not-an-address", &message, &sig));
        assert!(!verify_wallet_signature("0x1234", &message, &sig));
        assert!(!verify_wallet_signature(&addr, &message, "0xdeadbeef"));
        assert!(!verify_wallet_signature(&addr, &message, ""));
    }
}
