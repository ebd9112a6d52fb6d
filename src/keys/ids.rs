//! Curve identifiers and names.
//!
//! | Curve | Name | Id |
//! |-------|------|----|
//! | secp256k1 | `"secp256k1"` | `0xe1` |
//! | ed25519 | `"ed25519"` | `0xe2` |
//! | sr25519 | `"sr25519"` | `0xe3` |
//! | secp256r1 | `"secp256r1"` | `0xe4` |
//!
//! The id byte is stable across every wire format in this crate: descriptive
//! key bytes, the NaCl public-key header and the NaCl secret-key header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier byte for keys of an unknown curve
pub const ID_UNKNOWN: u8 = 0x00;

/// Identifier byte for secp256k1 keys
pub const ID_SECP256K1: u8 = 0xe1;

/// Identifier byte for ed25519 keys
pub const ID_ED25519: u8 = 0xe2;

/// Identifier byte for sr25519 keys
pub const ID_SR25519: u8 = 0xe3;

/// Identifier byte for secp256r1 keys
pub const ID_SECP256R1: u8 = 0xe4;

/// Identifier byte for secret keys whose curve is not specified
pub const ID_NON_SPECIFIED: u8 = 0xee;

/// The curve family a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    /// secp256k1 (Bitcoin / Ethereum ECDSA)
    Secp256k1,
    /// ed25519 (Edwards-curve signatures)
    Ed25519,
    /// sr25519 (Schnorr over Ristretto)
    Sr25519,
    /// secp256r1 (NIST P-256)
    Secp256r1,
}

impl KeyKind {
    /// Every supported curve family, in registry resolution order
    pub const ALL: [KeyKind; 4] = [
        KeyKind::Secp256k1,
        KeyKind::Ed25519,
        KeyKind::Sr25519,
        KeyKind::Secp256r1,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            KeyKind::Secp256k1 => "secp256k1",
            KeyKind::Ed25519 => "ed25519",
            KeyKind::Sr25519 => "sr25519",
            KeyKind::Secp256r1 => "secp256r1",
        }
    }

    /// Identifier byte used on the wire
    pub fn id(&self) -> u8 {
        match self {
            KeyKind::Secp256k1 => ID_SECP256K1,
            KeyKind::Ed25519 => ID_ED25519,
            KeyKind::Sr25519 => ID_SR25519,
            KeyKind::Secp256r1 => ID_SECP256R1,
        }
    }

    /// Look up a curve family by identifier byte
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            ID_SECP256K1 => Ok(KeyKind::Secp256k1),
            ID_ED25519 => Ok(KeyKind::Ed25519),
            ID_SR25519 => Ok(KeyKind::Sr25519),
            ID_SECP256R1 => Ok(KeyKind::Secp256r1),
            other => Err(Error::UnknownCurveId(other)),
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for KeyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KeyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownKeyKind(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_names_agree() {
        for kind in KeyKind::ALL {
            assert_eq!(KeyKind::from_id(kind.id()).unwrap(), kind);
            assert_eq!(kind.name().parse::<KeyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_sentinels_are_not_curves() {
        assert_eq!(KeyKind::from_id(ID_UNKNOWN), Err(Error::UnknownCurveId(0x00)));
        assert_eq!(KeyKind::from_id(ID_NON_SPECIFIED), Err(Error::UnknownCurveId(0xee)));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!("ed448".parse::<KeyKind>(), Err(Error::UnknownKeyKind(_))));
        assert!("ED25519".parse::<KeyKind>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&KeyKind::Secp256r1).unwrap();
        assert_eq!(json, "\"secp256r1\"");
        let kind: KeyKind = serde_json::from_str("\"sr25519\"").unwrap();
        assert_eq!(kind, KeyKind::Sr25519);
    }
}
