//! # AES-256-CBC Hybrid Suite (`0x2e`)
//!
//! ECIES over secp256k1 with AES-256-CBC and an HMAC-SHA256 tag, wire
//! compatible with the `eccrypto` family of libraries.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ENCRYPTION FLOW                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Ephemeral secp256k1 key e, then a random 16-byte IV                 │
//! │  2. X = x-coordinate(e · RecipientPublic), leading zeros stripped       │
//! │  3. h = SHA-512(X)      enc_key = h[0..32]      mac_key = h[32..64]     │
//! │  4. ct = AES-256-CBC(enc_key, IV, PKCS7(plaintext))                     │
//! │  5. mac = HMAC-SHA256(mac_key, IV ‖ E_uncompressed(65) ‖ ct)            │
//! │                                                                         │
//! │  Output:                                                                │
//! │  ┌──────┬────────┬──────────────────┬──────────┬─────────────────┐      │
//! │  │ 0x2e │ IV(16) │ E compressed(33) │ mac(32)  │ ct (≥16)        │      │
//! │  └──────┴────────┴──────────────────┴──────────┴─────────────────┘      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The MAC is checked in constant time before any decryption happens. Every
//! failure after the framing has been parsed is reported as the same
//! `DecryptionFailed`.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{Decrypter, Encrypter, AES256CBC};
use crate::error::{Error, Result};
use crate::exchange::secp256k1_raw_x;
use crate::keys::secp256k1::PUBLIC_KEY_SIZE;
use crate::keys::{PrivateKey, PublicKey, Secp256k1PrivateKey, Secp256k1PublicKey};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Size of the initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Size of the HMAC-SHA256 tag in bytes
pub const MAC_SIZE: usize = 32;

/// Smallest valid encrypted content: header plus one ciphertext byte
pub const MIN_CONTENT_SIZE: usize = 1 + IV_SIZE + PUBLIC_KEY_SIZE + MAC_SIZE + 1;

/// Encrypts to a secp256k1 public key
#[derive(Debug, Clone)]
pub struct AesCbcEncrypter {
    public_key: Secp256k1PublicKey,
}

impl AesCbcEncrypter {
    /// Create an encrypter for a secp256k1 recipient
    pub fn new(public_key: PublicKey) -> Result<Self> {
        match public_key {
            PublicKey::Secp256k1(public_key) => Ok(Self { public_key }),
            other => Err(Error::UnsupportedKeyType(format!(
                "aes256cbc requires a secp256k1 public key, got {}",
                other.kind()
            ))),
        }
    }

    /// Encrypt with a caller-supplied randomness source
    pub fn encrypt_with_rng(&self, plaintext: &[u8], rng: &mut impl CryptoRngCore) -> Result<Vec<u8>> {
        let ephemeral = Secp256k1PrivateKey::generate(rng);
        let mut iv = [0u8; IV_SIZE];
        rng.fill_bytes(&mut iv);

        encrypt_with(&ephemeral, &iv, &self.public_key, plaintext)
    }
}

impl Encrypter for AesCbcEncrypter {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

/// Decrypts with a secp256k1 private key
#[derive(Debug, Clone)]
pub struct AesCbcDecrypter {
    private_key: Secp256k1PrivateKey,
}

impl AesCbcDecrypter {
    /// Create a decrypter; only secp256k1 private keys are accepted
    pub fn new(private_key: PrivateKey) -> Result<Self> {
        match private_key {
            PrivateKey::Secp256k1(private_key) => Ok(Self { private_key }),
            other => Err(Error::UnsupportedKeyType(format!(
                "aes256cbc requires a secp256k1 private key, got {}",
                other.kind()
            ))),
        }
    }
}

impl Decrypter for AesCbcDecrypter {
    fn decrypt(&self, content: &[u8]) -> Result<Vec<u8>> {
        let frame = Frame::parse(content)?;

        let result = open(&self.private_key, &frame);
        if result.is_err() {
            tracing::debug!("aes256cbc content rejected");
        }
        result
    }
}

/// Borrowed view over the fixed-width fields of encrypted content
struct Frame<'a> {
    iv: &'a [u8],
    ephemeral_public_key: &'a [u8],
    mac: &'a [u8],
    ciphertext: &'a [u8],
}

impl<'a> Frame<'a> {
    fn parse(content: &'a [u8]) -> Result<Self> {
        if content.is_empty() {
            return Err(Error::MalformedFraming("empty content"));
        }
        if content.len() < MIN_CONTENT_SIZE {
            return Err(Error::MalformedFraming("content too short"));
        }
        if content[0] != AES256CBC {
            return Err(Error::MalformedFraming("invalid prefix"));
        }

        let (iv, rest) = content[1..].split_at(IV_SIZE);
        let (ephemeral_public_key, rest) = rest.split_at(PUBLIC_KEY_SIZE);
        let (mac, ciphertext) = rest.split_at(MAC_SIZE);

        Ok(Self {
            iv,
            ephemeral_public_key,
            mac,
            ciphertext,
        })
    }
}

/// Encrypt with an explicit ephemeral key and IV
pub(crate) fn encrypt_with(
    ephemeral: &Secp256k1PrivateKey,
    iv: &[u8; IV_SIZE],
    recipient: &Secp256k1PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let (enc_key, mac_key) = derive_keys(ephemeral, recipient);

    let ciphertext = Aes256CbcEnc::new_from_slices(enc_key.as_slice(), iv)
        .map_err(|e| Error::EncryptionFailed(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let ephemeral_public = ephemeral.public_key();
    let mac = compute_mac(
        &mac_key,
        iv,
        &ephemeral_public.uncompressed_bytes(),
        &ciphertext,
    )?;

    let mut out =
        Vec::with_capacity(1 + IV_SIZE + PUBLIC_KEY_SIZE + MAC_SIZE + ciphertext.len());
    out.push(AES256CBC);
    out.extend_from_slice(iv);
    out.extend_from_slice(&ephemeral_public.bytes());
    out.extend_from_slice(&mac);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn open(private_key: &Secp256k1PrivateKey, frame: &Frame<'_>) -> Result<Vec<u8>> {
    let ephemeral_public = Secp256k1PublicKey::from_bytes(frame.ephemeral_public_key)
        .map_err(|_| Error::DecryptionFailed)?;

    let (enc_key, mac_key) = derive_keys(private_key, &ephemeral_public);

    let expected = compute_mac(
        &mac_key,
        frame.iv,
        &ephemeral_public.uncompressed_bytes(),
        frame.ciphertext,
    )
    .map_err(|_| Error::DecryptionFailed)?;

    if !bool::from(expected.as_slice().ct_eq(frame.mac)) {
        return Err(Error::DecryptionFailed);
    }

    Aes256CbcDec::new_from_slices(enc_key.as_slice(), frame.iv)
        .map_err(|_| Error::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(frame.ciphertext)
        .map_err(|_| Error::DecryptionFailed)
}

/// SHA-512 of the stripped ECDH X coordinate, split into encryption and MAC keys
fn derive_keys(
    private_key: &Secp256k1PrivateKey,
    public_key: &Secp256k1PublicKey,
) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>) {
    let x = secp256k1_raw_x(private_key, public_key);
    let first_nonzero = x.iter().position(|&b| b != 0).unwrap_or(x.len());

    let mut hash = Zeroizing::new([0u8; 64]);
    hash.copy_from_slice(&Sha512::digest(&x[first_nonzero..]));

    let mut enc_key = Zeroizing::new([0u8; 32]);
    let mut mac_key = Zeroizing::new([0u8; 32]);
    enc_key.copy_from_slice(&hash[..32]);
    mac_key.copy_from_slice(&hash[32..]);
    (enc_key, mac_key)
}

fn compute_mac(
    mac_key: &[u8; 32],
    iv: &[u8],
    ephemeral_public_uncompressed: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; MAC_SIZE]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key)
        .map_err(|e| Error::EncryptionFailed(e.to_string()))?;
    mac.update(iv);
    mac.update(ephemeral_public_uncompressed);
    mac.update(ciphertext);
    Ok(mac.finalize().into_bytes().into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const GOLDEN: &str = "2e000102030405060708090a0b0c0d0e0f\
                          034f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa\
                          32992a61107866ae7ddec837fa290a233ec4e0fe7c675954e3b17006dd3ed26b\
                          7cbce3d5ceec556ce9456f216b9dc4f4";

    fn alice_decrypter() -> AesCbcDecrypter {
        AesCbcDecrypter::new(testing::secp256k1_alice().into()).unwrap()
    }

    #[test]
    fn test_golden_vector() {
        let ephemeral = Secp256k1PrivateKey::from_bytes(&[0x11; 32]).unwrap();
        let iv: [u8; IV_SIZE] = core::array::from_fn(|i| i as u8);
        let recipient = testing::secp256k1_alice().public_key();

        let content = encrypt_with(&ephemeral, &iv, &recipient, b"message").unwrap();
        assert_eq!(hex::encode(&content), GOLDEN);
    }

    #[test]
    fn test_decrypt_golden_vector() {
        let content = hex::decode(GOLDEN).unwrap();
        assert_eq!(alice_decrypter().decrypt(&content).unwrap(), b"message");
    }

    #[test]
    fn test_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x2e);
        let encrypter = AesCbcEncrypter::new(testing::secp256k1_alice().public_key().into()).unwrap();

        let plaintexts: [&[u8]; 4] = [b"", b"message", &[0xab; 16], &[0x01; 100]];
        for plaintext in plaintexts {
            let content = encrypter.encrypt_with_rng(plaintext, &mut rng).unwrap();
            assert_eq!(content.len() % 16, (1 + IV_SIZE + PUBLIC_KEY_SIZE + MAC_SIZE) % 16);
            assert_eq!(alice_decrypter().decrypt(&content).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_wrong_recipient() {
        let encrypter = AesCbcEncrypter::new(testing::secp256k1_bob().public_key().into()).unwrap();
        let content = encrypter.encrypt(b"message").unwrap();
        assert_eq!(
            alice_decrypter().decrypt(&content).unwrap_err(),
            Error::DecryptionFailed
        );
    }

    #[test]
    fn test_tampering_fails_every_field() {
        let content = hex::decode(GOLDEN).unwrap();
        let decrypter = alice_decrypter();

        // IV, ephemeral key, MAC and ciphertext
        for index in [1, 16, 17, 40, 50, 70, 81, content.len() - 1] {
            let mut tampered = content.clone();
            tampered[index] ^= 0x01;
            assert_eq!(
                decrypter.decrypt(&tampered).unwrap_err(),
                Error::DecryptionFailed,
                "byte {} was not authenticated",
                index
            );
        }
    }

    #[test]
    fn test_framing_errors() {
        let decrypter = alice_decrypter();
        assert_eq!(
            decrypter.decrypt(&[]).unwrap_err(),
            Error::MalformedFraming("empty content")
        );
        assert_eq!(
            decrypter.decrypt(&[AES256CBC; MIN_CONTENT_SIZE - 1]).unwrap_err(),
            Error::MalformedFraming("content too short")
        );

        let mut content = hex::decode(GOLDEN).unwrap();
        content[0] = 0x2a;
        assert_eq!(
            decrypter.decrypt(&content).unwrap_err(),
            Error::MalformedFraming("invalid prefix")
        );
    }

    #[test]
    fn test_rejects_other_curves() {
        assert!(matches!(
            AesCbcDecrypter::new(testing::ed25519_alice().into()),
            Err(Error::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            AesCbcEncrypter::new(testing::secp256r1_alice().public_key().into()),
            Err(Error::UnsupportedKeyType(_))
        ));
    }
}
