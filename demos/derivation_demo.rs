//! # Derivation Demo
//!
//! Walks a hardened derivation path from an ed25519 root key.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=umbra_multikey=debug cargo run --example derivation_demo
//! ```

use umbra_multikey::encoding::encode_messaging_public_key;
use umbra_multikey::{derive_hardened_key, derive_hardened_path, ChainCode, KeyKind, PrivateKey};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbra_multikey=info".into()),
        )
        .init();

    println!("=== Umbra Multikey: Derivation Demo ===\n");

    let seed = [42u8; 32]; // In production, use a recovery phrase
    let root = PrivateKey::from_bytes(KeyKind::Ed25519, &seed).expect("Failed to create root key");
    println!("Root public key: {}\n", hex::encode(root.public_key().bytes()));

    // Step 1: Chain codes
    println!("Step 1: Building chain codes...");
    for (label, code) in [
        ("index 0", ChainCode::from_index(0)),
        ("index 1", ChainCode::from_index(1)),
        ("\"mailchain\"", ChainCode::from_string("mailchain")),
    ] {
        println!("  {:<12} {}", label, hex::encode(code.as_bytes()));
    }
    println!();

    // Step 2: Step by step
    println!("Step 2: Deriving root/0/1/2 one step at a time...");
    let mut key = root.clone();
    for index in [0u64, 1, 2] {
        key = derive_hardened_key(&key, &ChainCode::from_index(index)).expect("Failed to derive");
        println!("  /{}  {}", index, hex::encode(key.public_key().bytes()));
    }
    println!();

    // Step 3: Whole path
    println!("Step 3: Deriving the same path in one call...");
    let path: Vec<ChainCode> = [0u64, 1, 2].into_iter().map(ChainCode::from_index).collect();
    let folded = derive_hardened_path(&root, &path).expect("Failed to derive path");
    println!(
        "  Matches step-by-step result: {}",
        if folded.public_key() == key.public_key() { "[OK]" } else { "[FAILED]" }
    );
    println!();

    // Step 4: Messaging key
    println!("Step 4: Publishing the child as a messaging key...");
    let encoded = encode_messaging_public_key(&folded.public_key()).expect("Failed to encode");
    println!("  {}", encoded);
    println!();

    println!("=== Example Complete ===");
}
