//! # Signing Demo
//!
//! Signs with every curve family and with the domain signing helpers.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=umbra_multikey=debug cargo run --example signing_demo
//! ```

use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use umbra_multikey::{signatures, KeyKind, PrivateKey};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbra_multikey=info".into()),
        )
        .init();

    println!("=== Umbra Multikey: Signing Demo ===\n");

    // Step 1: One key per curve
    println!("Step 1: Signing with every curve family...");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │  secp256k1, secp256r1  sign a 32-byte digest               │");
    println!("  │  ed25519, sr25519      sign the message itself             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    let message = b"hello from mailchain";
    let digest: [u8; 32] = Sha256::digest(message).into();

    for kind in KeyKind::ALL {
        let key = PrivateKey::generate(kind, &mut OsRng);
        let input: &[u8] = match kind {
            KeyKind::Secp256k1 | KeyKind::Secp256r1 => &digest,
            KeyKind::Ed25519 | KeyKind::Sr25519 => message,
        };

        let signature = key.sign(input).expect("Failed to sign");
        let valid = key.public_key().verify(input, &signature);

        println!("  {:<10} signature: {}... ({} bytes)", kind, hex::encode(&signature[..12]), signature.len());
        println!("  {:<10} valid: {}", "", if valid { "[OK]" } else { "[FAILED]" });
    }
    println!();

    // Step 2: Domain signing helpers
    println!("Step 2: Username ownership...");

    let identity = PrivateKey::generate(KeyKind::Ed25519, &mut OsRng);
    let signature = signatures::sign_username(&identity, b"alice").expect("Failed to sign username");
    let valid = signatures::verify_username(&identity.public_key(), b"alice", &signature)
        .expect("Failed to verify username");
    println!("  Signature: {}...", hex::encode(&signature[..16]));
    println!("  Valid: {}", if valid { "[OK]" } else { "[FAILED]" });

    let forged = signatures::verify_username(&identity.public_key(), b"mallory", &signature)
        .expect("Failed to verify username");
    println!(
        "  Other username: {}",
        if forged { "[FAILED] accepted" } else { "[OK] rejected" }
    );
    println!();

    // Step 3: Unsupported curve
    println!("Step 3: Identity helpers only accept ed25519 keys...");
    let secp = PrivateKey::generate(KeyKind::Secp256k1, &mut OsRng);
    match signatures::sign_username(&secp, b"alice") {
        Ok(_) => println!("  [FAILED] secp256k1 key accepted"),
        Err(e) => println!("  [OK] {}", e),
    }
    println!();

    // Step 4: Ethereum personal message
    println!("Step 4: Ethereum personal message with the secp256k1 key...");
    let signature = signatures::sign_ethereum_personal_message(&secp, b"hello")
        .expect("Failed to sign Ethereum message");
    let valid = signatures::verify(
        signatures::ETHEREUM_PERSONAL_MESSAGE,
        &secp.public_key(),
        b"hello",
        &signature,
    )
    .expect("Failed to verify Ethereum message");
    println!("  V: {}", signature[64]);
    println!("  Valid: {}", if valid { "[OK]" } else { "[FAILED]" });
    println!();

    println!("=== Example Complete ===");
}
