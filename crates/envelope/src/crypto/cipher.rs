//! AES-256-GCM encryption and decryption of single buffers under an AAD.
//!
//! Every call generates a fresh 96-bit nonce from the OS CSPRNG. GCM nonce
//! reuse under the same key is catastrophic — it breaks both confidentiality
//! and authentication — which is why [`seal`] owns nonce generation instead
//! of accepting one from the caller.
//!
//! The tag is kept separate from the ciphertext because the wire format
//! stores them in separate hex fields.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of a GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// One sealed buffer: nonce, ciphertext, and tag, ready for hex encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedParts {
    /// Raw nonce bytes, freshly generated for this seal.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
}

/// An AEAD operation failed.
///
/// Deliberately opaque: on the open path this means authentication failed
/// (wrong key, tampered data, or an AAD mismatch), and callers must not be
/// able to tell those apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("aead operation failed")]
pub struct AeadError;

/// Encrypt `plaintext` under `key`, authenticating `aad` alongside it.
///
/// # Errors
///
/// Returns [`AeadError`] on an internal AEAD failure (unreachable with a
/// well-formed key and nonce).
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8], aad: &[u8]) -> Result<SealedParts, AeadError> {
    use aes_gcm::aead::rand_core::RngCore;

    let cipher = Aes256Gcm::new(key.into());

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // The aead API appends the 16-byte tag to the ciphertext; split it off.
    let mut combined = cipher
        .encrypt(nonce, Payload { msg: plaintext, aad })
        .map_err(|_| AeadError)?;
    let tag_start = combined.len() - TAG_LEN;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&combined[tag_start..]);
    combined.truncate(tag_start);

    Ok(SealedParts {
        nonce: nonce_bytes,
        ciphertext: combined,
        tag,
    })
}

/// Decrypt and authenticate a sealed buffer back to plaintext bytes.
///
/// # Errors
///
/// Returns [`AeadError`] if authentication fails for any reason: wrong key,
/// tampered ciphertext or tag, or an `aad` that differs from the one sealed.
pub fn open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    aad: &[u8],
) -> Result<Vec<u8>, AeadError> {
    let cipher = Aes256Gcm::new(key.into());

    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: &combined,
                aad,
            },
        )
        .map_err(|_| AeadError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> [u8; KEY_LEN] {
        use aes_gcm::aead::rand_core::RngCore;
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_round_trip() {
        let key = random_key();
        let sealed = seal(&key, b"tx payload bytes", b"tx_abc:party_1:v1").unwrap();
        let opened = open(
            &key,
            &sealed.nonce,
            &sealed.ciphertext,
            &sealed.tag,
            b"tx_abc:party_1:v1",
        )
        .unwrap();
        assert_eq!(opened, b"tx payload bytes");
    }

    #[test]
    fn ciphertext_matches_plaintext_length() {
        let key = random_key();
        let sealed = seal(&key, &[0u8; 32], b"aad").unwrap();
        assert_eq!(sealed.ciphertext.len(), 32);
    }

    #[test]
    fn fresh_nonce_per_seal() {
        let key = random_key();
        let a = seal(&key, b"same", b"aad").unwrap();
        let b = seal(&key, b"same", b"aad").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_open() {
        let sealed = seal(&random_key(), b"secret", b"aad").unwrap();
        let other = random_key();
        assert_eq!(
            open(&other, &sealed.nonce, &sealed.ciphertext, &sealed.tag, b"aad"),
            Err(AeadError)
        );
    }

    #[test]
    fn tampered_ciphertext_fails_open() {
        let key = random_key();
        let mut sealed = seal(&key, b"tamper me", b"aad").unwrap();
        sealed.ciphertext[0] ^= 0xFF;
        assert!(open(&key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, b"aad").is_err());
    }

    #[test]
    fn tampered_tag_fails_open() {
        let key = random_key();
        let mut sealed = seal(&key, b"tamper me", b"aad").unwrap();
        sealed.tag[TAG_LEN - 1] ^= 0x01;
        assert!(open(&key, &sealed.nonce, &sealed.ciphertext, &sealed.tag, b"aad").is_err());
    }

    #[test]
    fn aad_mismatch_fails_open() {
        let key = random_key();
        let sealed = seal(&key, b"bound", b"tx_a:party_1:v1").unwrap();
        assert!(open(
            &key,
            &sealed.nonce,
            &sealed.ciphertext,
            &sealed.tag,
            b"tx_a:party_2:v1"
        )
        .is_err());
    }
}
