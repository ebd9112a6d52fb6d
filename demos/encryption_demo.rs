//! # Encryption Demo
//!
//! Encrypts a message with each suite and decrypts it through the
//! tag-dispatching decrypter.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=umbra_multikey=debug cargo run --example encryption_demo
//! ```

use rand::rngs::OsRng;
use umbra_multikey::cipher::nacl::NaclPrivateKeyEncrypter;
use umbra_multikey::cipher::{self, Decrypter, Encrypter};
use umbra_multikey::{CipherConfig, KeyKind, PrivateKey};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbra_multikey=info".into()),
        )
        .init();

    println!("=== Umbra Multikey: Encryption Demo ===\n");

    let message = b"Meet me at the usual place at 7pm";
    println!("Plaintext: \"{}\"\n", String::from_utf8_lossy(message));

    // Step 1: Configured suites
    println!("Step 1: Encrypting to Bob with each configured suite...");
    println!();

    let bob = PrivateKey::generate(KeyKind::Secp256k1, &mut OsRng);
    let decrypter = cipher::decrypter(bob.clone());

    for json in [
        r#"{"encrypter": "noop"}"#,
        r#"{"encrypter": "nacl-ecdh"}"#,
        r#"{"encrypter": "aes256cbc"}"#,
    ] {
        let config = CipherConfig::from_json(json).expect("Failed to parse config");
        let content = config
            .encrypter(bob.public_key())
            .expect("Failed to build encrypter")
            .encrypt(message)
            .expect("Failed to encrypt");
        let plaintext = decrypter.decrypt(&content).expect("Failed to decrypt");

        println!("  {:<10} tag {:#04x}, {} bytes", config.encrypter, content[0], content.len());
        println!(
            "  {:<10} round trip: {}",
            "",
            if plaintext == message { "[OK]" } else { "[FAILED]" }
        );
    }
    println!();

    // Step 2: Secret-key suite
    println!("Step 2: Encrypting to yourself with the secret-key suite...");
    let content = NaclPrivateKeyEncrypter::new(bob.clone())
        .encrypt(message)
        .expect("Failed to encrypt");
    let plaintext = decrypter.decrypt(&content).expect("Failed to decrypt");
    println!("  tag {:#04x}, key id {:#04x}", content[0], content[1]);
    println!("  Round trip: {}", if plaintext == message { "[OK]" } else { "[FAILED]" });
    println!();

    // Step 3: Tampering
    println!("Step 3: Flipping one ciphertext bit...");
    let mut tampered = cipher::encrypter(cipher::EncrypterKind::Aes256Cbc, bob.public_key())
        .expect("Failed to build encrypter")
        .encrypt(message)
        .expect("Failed to encrypt");
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    match decrypter.decrypt(&tampered) {
        Ok(_) => println!("  [FAILED] Tampered content decrypted!"),
        Err(e) => println!("  [OK] Rejected: {}", e),
    }
    println!();

    // Step 4: Wrong recipient
    println!("Step 4: Decrypting with Eve's key...");
    let eve = PrivateKey::generate(KeyKind::Secp256k1, &mut OsRng);
    let content = cipher::encrypter(cipher::EncrypterKind::NaclEcdh, bob.public_key())
        .expect("Failed to build encrypter")
        .encrypt(message)
        .expect("Failed to encrypt");
    match cipher::decrypter(eve).decrypt(&content) {
        Ok(_) => println!("  [FAILED] Eve read the message!"),
        Err(e) => println!("  [OK] Rejected: {}", e),
    }
    println!();

    println!("=== Example Complete ===");
}
