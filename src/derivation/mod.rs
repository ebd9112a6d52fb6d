//! # Hierarchical Derivation
//!
//! Hardened child keys derived from a parent private key and a chain code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       HARDENED DERIVATION                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  index (u64)  ──► little-endian(8) ──┐                                  │
//! │  "segment"    ──► (len<<2) ‖ utf8  ──┼──► normalize ──► chain code(32)  │
//! │  raw bytes    ───────────────────────┘                                  │
//! │                                                                         │
//! │            normalize:  < 32  zero-pad on the right                      │
//! │                        = 32  unchanged                                  │
//! │                        > 32  BLAKE2b-256                                │
//! │                                                                         │
//! │  child seed = BLAKE2b-256( ",Ed25519HDKD" ‖ parent seed ‖ chain code )  │
//! │                                                                         │
//! │  root ──[0]──► child ──[1]──► grandchild ──[2]──► ...                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derivation is deterministic. Walking a path one step at a time gives the
//! same key as [`derive_hardened_path`] over the whole path.

mod chaincode;
mod hardened;

pub use chaincode::{ChainCode, CHAIN_CODE_SIZE};
pub use hardened::{derive_hardened_key, derive_hardened_path};
