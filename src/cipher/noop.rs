//! Passthrough suite (`0x20`).
//!
//! Prepends the tag and nothing else. Useful for debugging message flows;
//! it provides no confidentiality.

use super::{Decrypter, Encrypter, NO_OPERATION};
use crate::error::{Error, Result};

/// Wraps plaintext with the noop tag
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEncrypter;

impl NoopEncrypter {
    /// Create a noop encrypter
    pub fn new() -> Self {
        Self
    }
}

impl Encrypter for NoopEncrypter {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(1 + plaintext.len());
        out.push(NO_OPERATION);
        out.extend_from_slice(plaintext);
        Ok(out)
    }
}

/// Strips the noop tag
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecrypter;

impl NoopDecrypter {
    /// Create a noop decrypter
    pub fn new() -> Self {
        Self
    }
}

impl Decrypter for NoopDecrypter {
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>> {
        match content.split_first() {
            None => Err(Error::MalformedFraming("empty content")),
            Some((&NO_OPERATION, rest)) => Ok(rest.to_vec()),
            Some(_) => Err(Error::MalformedFraming("invalid prefix")),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
