//! # Recovery Phrase Demo
//!
//! Generates a BIP39 phrase and turns it into keys for every curve family.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example recovery_phrase_demo
//! ```

use rand::rngs::OsRng;
use umbra_multikey::{mnemonic, KeyKind, PrivateKey, RecoveryPhrase};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbra_multikey=info".into()),
        )
        .init();

    println!("=== Umbra Multikey: Recovery Phrase Demo ===\n");

    // Step 1: Generate
    println!("Step 1: Generating new recovery phrase...");

    let phrase = mnemonic::generate(&mut OsRng).expect("Failed to generate phrase");
    let words = phrase.words();

    println!();
    println!("  ┌────────────────────────────────────────────────────────────┐");
    println!("  │                   YOUR RECOVERY PHRASE                     │");
    println!("  ├────────────────────────────────────────────────────────────┤");

    for (i, chunk) in words.chunks(6).enumerate() {
        print!("  │  ");
        for (j, word) in chunk.iter().enumerate() {
            let num = i * 6 + j + 1;
            print!("{:2}. {:12}", num, word);
        }
        println!("│");
    }

    println!("  └────────────────────────────────────────────────────────────┘");
    println!();

    // Step 2: Validate
    println!("Step 2: Validating phrases...");
    let typo = phrase.phrase().replacen(words[0], "abandonn", 1);
    for (label, text) in [("original", phrase.phrase()), ("with typo", typo)] {
        match RecoveryPhrase::from_phrase(&text) {
            Ok(_) => println!("  {:<10} [OK] valid", label),
            Err(e) => println!("  {:<10} [REJECTED] {}", label, e),
        }
    }
    println!();

    // Step 3: Keys
    println!("Step 3: Deriving one key per curve from the seed...");
    let seed = phrase.to_seed("");
    for kind in KeyKind::ALL {
        let key = PrivateKey::from_bytes(kind, seed.as_slice()).expect("Failed to create key");
        println!("  {:<10} {}", kind, hex::encode(key.public_key().bytes()));
    }
    println!();

    // Step 4: Password
    println!("Step 4: A password gives a different seed...");
    let with_password = phrase.to_seed("correct horse");
    println!(
        "  Seeds differ: {}",
        if *with_password != *seed { "[OK]" } else { "[FAILED]" }
    );
    println!();

    println!("=== Example Complete ===");
}
