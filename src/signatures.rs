//! # Signing Helpers
//!
//! Domain-separated messages signed with identity keys. Each helper builds a
//! fixed text message and signs or verifies it with the key's native
//! algorithm.
//!
//! | Helper | Curve | Signed message |
//! |--------|-------|----------------|
//! | Username ownership | ed25519 | `\x11Mailchain username ownership:\n{len}\n{username}` |
//! | Delivery confirmation | ed25519 | `\x11Mailchain delivery confirmation:\n{hex(id)}` |
//! | Provided messaging key | ed25519 | `\x11Mailchain provided messaging key:\nAddress:{address}\nProtocol:{protocol}\nKey:{0x descriptive key}` |
//! | Raw ed25519 | ed25519 | the message itself |
//! | Ethereum personal message | secp256k1 | `keccak256("\x19Ethereum Signed Message:\n{len}{message}")` |
//!
//! Keys of any other curve are rejected with
//! [`Error::UnsupportedKeyType`](crate::Error::UnsupportedKeyType).

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::encoding::encode_hex_0x_prefix;
use crate::error::{Error, Result};
use crate::keys::{
    Ed25519PrivateKey, Ed25519PublicKey, PrivateKey, PublicKey, Secp256k1PrivateKey,
    Secp256k1PublicKey,
};
use crate::registry;

/// Signing method name for raw ed25519 signatures
pub const RAW_ED25519: &str = "raw_ed25519";

/// Signing method name for Ethereum personal-message signatures
pub const ETHEREUM_PERSONAL_MESSAGE: &str = "ethereum_personal_message";

/// Offset added to the recovery id of an Ethereum signature
const ETHEREUM_V_OFFSET: u8 = 27;

fn ed25519_signer(key: &PrivateKey) -> Result<&Ed25519PrivateKey> {
    match key {
        PrivateKey::Ed25519(key) => Ok(key),
        other => Err(Error::UnsupportedKeyType(format!(
            "{} keys cannot sign this message",
            other.kind()
        ))),
    }
}

fn ed25519_verifier(key: &PublicKey) -> Result<&Ed25519PublicKey> {
    match key {
        PublicKey::Ed25519(key) => Ok(key),
        other => Err(Error::UnsupportedKeyType(format!(
            "{} keys cannot verify this message",
            other.kind()
        ))),
    }
}

// ============================================================================
// RAW ED25519
// ============================================================================

/// Sign a message with no pre-processing
pub fn sign_raw_ed25519(key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    Ok(ed25519_signer(key)?.sign(message).to_vec())
}

/// Verify a raw ed25519 signature
pub fn verify_raw_ed25519(key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<bool> {
    Ok(ed25519_verifier(key)?.verify(message, signature))
}

/// Verify a signature produced by the named signing method
pub fn verify(method: &str, key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<bool> {
    match method {
        ETHEREUM_PERSONAL_MESSAGE => verify_ethereum_personal_message(key, message, signature),
        RAW_ED25519 => verify_raw_ed25519(key, message, signature),
        other => Err(Error::InputValidation(format!(
            "unsupported signing method {}",
            other
        ))),
    }
}

// ============================================================================
// ETHEREUM PERSONAL MESSAGE
// ============================================================================

fn secp256k1_signer(key: &PrivateKey) -> Result<&Secp256k1PrivateKey> {
    match key {
        PrivateKey::Secp256k1(key) => Ok(key),
        other => Err(Error::UnsupportedKeyType(format!(
            "{} keys cannot sign Ethereum messages",
            other.kind()
        ))),
    }
}

fn secp256k1_verifier(key: &PublicKey) -> Result<&Secp256k1PublicKey> {
    match key {
        PublicKey::Secp256k1(key) => Ok(key),
        other => Err(Error::UnsupportedKeyType(format!(
            "{} keys cannot verify Ethereum messages",
            other.kind()
        ))),
    }
}

fn ethereum_message_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()).as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Sign `message` the way Ethereum wallets sign personal messages
///
/// Returns `R ‖ S ‖ V` with `V` in `{27, 28}`.
pub fn sign_ethereum_personal_message(key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let signer = secp256k1_signer(key)?;
    let mut signature = signer.sign(&ethereum_message_hash(message))?;
    signature[64] += ETHEREUM_V_OFFSET;
    Ok(signature.to_vec())
}

/// Verify an Ethereum personal-message signature
///
/// The signer is recovered from `R ‖ S ‖ V` and compared with `key`. A
/// malformed signature verifies as `false`.
pub fn verify_ethereum_personal_message(
    key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let expected = secp256k1_verifier(key)?;
    if signature.len() != 65 {
        return Ok(false);
    }

    let Some(recovery_id) = signature[64]
        .checked_sub(ETHEREUM_V_OFFSET)
        .and_then(RecoveryId::from_byte)
    else {
        return Ok(false);
    };
    let Ok(rs) = Signature::from_slice(&signature[..64]) else {
        return Ok(false);
    };

    let hash = ethereum_message_hash(message);
    let recovered = match VerifyingKey::recover_from_prehash(&hash, &rs, recovery_id) {
        Ok(recovered) => recovered,
        Err(_) => return Ok(false),
    };

    Ok(recovered == VerifyingKey::from(expected.inner()))
}

// ============================================================================
// USERNAME OWNERSHIP
// ============================================================================

fn username_message(username: &[u8]) -> Vec<u8> {
    let mut msg = format!("\x11Mailchain username ownership:\n{}\n", username.len()).into_bytes();
    msg.extend_from_slice(username);
    msg
}

/// Sign a claim that the key owns `username`
pub fn sign_username(key: &PrivateKey, username: &[u8]) -> Result<Vec<u8>> {
    Ok(ed25519_signer(key)?.sign(&username_message(username)).to_vec())
}

/// Verify a username ownership signature
pub fn verify_username(key: &PublicKey, username: &[u8], signature: &[u8]) -> Result<bool> {
    Ok(ed25519_verifier(key)?.verify(&username_message(username), signature))
}

// ============================================================================
// DELIVERY CONFIRMATION
// ============================================================================

fn delivery_confirmation_message(delivery_request_id: &[u8]) -> Vec<u8> {
    format!(
        "\x11Mailchain delivery confirmation:\n{}",
        hex::encode(delivery_request_id)
    )
    .into_bytes()
}

/// Sign confirmation of a delivery request
pub fn sign_delivery_confirmation(key: &PrivateKey, delivery_request_id: &[u8]) -> Result<Vec<u8>> {
    let msg = delivery_confirmation_message(delivery_request_id);
    Ok(ed25519_signer(key)?.sign(&msg).to_vec())
}

/// Verify a delivery confirmation signature
pub fn verify_delivery_confirmation(
    key: &PublicKey,
    delivery_request_id: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let msg = delivery_confirmation_message(delivery_request_id);
    Ok(ed25519_verifier(key)?.verify(&msg, signature))
}

// ============================================================================
// PROVIDED MESSAGING KEY
// ============================================================================

fn provided_messaging_key_message(
    messaging_key: &PublicKey,
    address: &str,
    protocol: &str,
) -> Result<Vec<u8>> {
    if address.is_empty() {
        return Err(Error::InputValidation("address must be supplied".into()));
    }
    if protocol.is_empty() {
        return Err(Error::InputValidation("protocol must be supplied".into()));
    }
    ed25519_verifier(messaging_key)?;

    let key = encode_hex_0x_prefix(&registry::descriptive_bytes_from_public_key(messaging_key));
    Ok(format!(
        "\x11Mailchain provided messaging key:\nAddress:{}\nProtocol:{}\nKey:{}",
        address, protocol, key
    )
    .into_bytes())
}

/// Sign a messaging key issued for `address` on `protocol`
pub fn sign_provided_messaging_key(
    key: &PrivateKey,
    messaging_key: &PublicKey,
    address: &str,
    protocol: &str,
) -> Result<Vec<u8>> {
    let signer = ed25519_signer(key)?;
    let msg = provided_messaging_key_message(messaging_key, address, protocol)?;
    Ok(signer.sign(&msg).to_vec())
}

/// Verify a provided messaging key signature
pub fn verify_provided_messaging_key(
    key: &PublicKey,
    signature: &[u8],
    messaging_key: &PublicKey,
    address: &str,
    protocol: &str,
) -> Result<bool> {
    let verifier = ed25519_verifier(key)?;
    let msg = provided_messaging_key_message(messaging_key, address, protocol)?;
    Ok(verifier.verify(&msg, signature))
}

// ============================================================================
// TESTS
// ============================================================================
