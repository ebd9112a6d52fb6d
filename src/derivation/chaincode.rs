//! Chain codes.
//!
//! A chain code is always 32 bytes. Shorter inputs are zero-padded on the
//! right; longer inputs are replaced by their BLAKE2b-256 digest.

use std::fmt;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Size of a chain code in bytes
pub const CHAIN_CODE_SIZE: usize = 32;

/// A 32-byte derivation chain code
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainCode([u8; CHAIN_CODE_SIZE]);

impl ChainCode {
    /// Normalize arbitrary bytes into a chain code
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut code = [0u8; CHAIN_CODE_SIZE];

        if bytes.len() > CHAIN_CODE_SIZE {
            let mut hasher = Blake2b::<U32>::new();
            hasher.update(bytes);
            code.copy_from_slice(&hasher.finalize());
        } else {
            code[..bytes.len()].copy_from_slice(bytes);
        }

        Self(code)
    }

    /// Chain code for a numeric index (little-endian, zero-padded)
    pub fn from_index(index: u64) -> Self {
        Self::from_bytes(&index.to_le_bytes())
    }

    /// Chain code for a string path segment
    ///
    /// The string is prefixed with a one-byte tag of `len << 2`. The tag is
    /// truncated to eight bits, so strings longer than 63 bytes wrap.
    pub fn from_string(s: &str) -> Self {
        let bytes = s.as_bytes();

        let mut tagged = Vec::with_capacity(1 + bytes.len());
        tagged.push((bytes.len() << 2) as u8);
        tagged.extend_from_slice(bytes);

        Self::from_bytes(&tagged)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; CHAIN_CODE_SIZE] {
        &self.0
    }
}

impl From<u64> for ChainCode {
    fn from(index: u64) -> Self {
        Self::from_index(index)
    }
}

impl From<&str> for ChainCode {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainCode({})", hex::encode(self.0))
    }
}

// ============================================================================
// TESTS
// ============================================================================
