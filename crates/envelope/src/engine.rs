//! [`EnvelopeEngine`]: envelope encryption of transaction payloads.
//!
//! # Construction
//!
//! One engine per master key. The key is validated in the constructor, so
//! a mis-sized key fails before any record is processed. The instance is
//! immutable afterwards and safe to share across threads without locking:
//! the master key is the only shared state, and every call allocates its
//! own nonces, DEK, and buffers.
//!
//! # Identity binding
//!
//! `id`, `party_id`, and `mk_version` are concatenated into the AAD of
//! *both* AEAD layers. A ciphertext is therefore only valid for its exact
//! declared identity: substituting another record's `party_id` (or mutating
//! the version) produces an AAD mismatch that authenticated decryption
//! rejects, even though the ciphertext and tag bytes themselves are
//! untouched and individually well-formed. This blocks cross-record and
//! cross-tenant confusion attacks, not just bit-flip tampering.

use std::fmt;

use aes_gcm::aead::OsRng;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use common::{
    DecryptionInput, EnvelopeError, SecureRecord, ValidationError, ALGORITHM, MK_VERSION,
    RECORD_ID_PREFIX,
};

use crate::crypto::cipher::{self, KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::dek::DekBytes;
use crate::validation::{
    decode_fixed, decode_hex, validate_hex, validate_master_key_hex, validate_nonce, validate_tag,
};

// ---------------------------------------------------------------------------
// MasterKey
// ---------------------------------------------------------------------------

/// The long-lived master key, used only to wrap and unwrap DEKs.
///
/// Fixed for the engine's lifetime; zeroed on drop.
pub struct MasterKey(Box<[u8; KEY_LEN]>);

impl MasterKey {
    /// Parse a 64-hex-character master key.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the string is not valid hex or does
    /// not decode to exactly 32 bytes.
    pub fn from_hex(master_key_hex: &str) -> Result<Self, ValidationError> {
        validate_master_key_hex(master_key_hex)?;
        let bytes = decode_hex(master_key_hex, "masterKeyHex")?;
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&bytes);
        Ok(Self(buf))
    }

    fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("MasterKey([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// EncryptionResult
// ---------------------------------------------------------------------------

/// The outcome of one encryption call.
///
/// The record is what the caller persists; the DEK is transient. The engine
/// keeps no copy of the DEK — this is the only one, and dropping it wipes
/// the key material.
#[derive(Debug)]
pub struct EncryptionResult {
    /// The assembled record, ready for storage or transmission.
    pub record: SecureRecord,
    /// The raw data-encryption key generated for this record.
    pub dek: DekBytes,
}

// ---------------------------------------------------------------------------
// EnvelopeEngine
// ---------------------------------------------------------------------------

/// Stateless envelope-encryption engine bound to one master key.
#[derive(Debug)]
pub struct EnvelopeEngine {
    master_key: MasterKey,
}

impl EnvelopeEngine {
    /// Construct an engine from a 64-hex-character (32-byte) master key.
    ///
    /// # Errors
    ///
    /// Fails synchronously with a validation error if the key is malformed;
    /// construction never defers key checks to first use.
    pub fn new(master_key_hex: &str) -> Result<Self, EnvelopeError> {
        Ok(Self {
            master_key: MasterKey::from_hex(master_key_hex)?,
        })
    }

    /// Encrypt `payload` for `party_id`, producing a [`SecureRecord`] and
    /// the record's raw DEK.
    ///
    /// A fresh DEK and fresh nonces are generated on every call; encrypting
    /// the same payload twice never yields the same ciphertext. The engine
    /// persists nothing — storing the record is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPartyId`] for a blank `party_id`.
    pub fn encrypt_payload(
        &self,
        party_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<EncryptionResult, EnvelopeError> {
        if party_id.trim().is_empty() {
            return Err(ValidationError::EmptyPartyId.into());
        }

        let id = generate_record_id();
        let aad = build_aad(&id, party_id, MK_VERSION);

        let dek = DekBytes::generate();

        let payload_bytes = Zeroizing::new(
            serde_json::to_vec(payload).map_err(|e| EnvelopeError::Internal(e.to_string()))?,
        );
        let sealed_payload = cipher::seal(dek.as_bytes(), &payload_bytes, &aad)
            .map_err(|e| EnvelopeError::Internal(e.to_string()))?;
        let sealed_dek = cipher::seal(self.master_key.as_bytes(), dek.as_bytes(), &aad)
            .map_err(|e| EnvelopeError::Internal(e.to_string()))?;

        let record = SecureRecord {
            id,
            party_id: party_id.to_owned(),
            created_at: Utc::now(),
            payload_nonce: hex::encode(sealed_payload.nonce),
            payload_ct: hex::encode(&sealed_payload.ciphertext),
            payload_tag: hex::encode(sealed_payload.tag),
            dek_wrap_nonce: hex::encode(sealed_dek.nonce),
            dek_wrapped: hex::encode(&sealed_dek.ciphertext),
            dek_wrap_tag: hex::encode(sealed_dek.tag),
            alg: ALGORITHM.to_owned(),
            mk_version: MK_VERSION,
        };

        debug!(record_id = %record.id, "payload encrypted");
        Ok(EncryptionResult { record, dek })
    }

    /// Decrypt a stored (possibly attacker-modified) record back to its
    /// payload object.
    ///
    /// Every format check runs before any cryptographic work, and the
    /// recovered DEK is wiped on every exit path.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for malformed fields, an unsupported
    /// `mk_version`, or a decrypted value that is not a JSON object; returns
    /// [`EnvelopeError::Integrity`] if authentication fails at either layer,
    /// without revealing which.
    pub fn decrypt_payload(
        &self,
        input: &DecryptionInput,
    ) -> Result<Map<String, Value>, EnvelopeError> {
        if input.id.is_empty() || input.party_id.is_empty() {
            return Err(ValidationError::MissingIdentity.into());
        }
        if input.mk_version != MK_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                got: input.mk_version,
                expected: MK_VERSION,
            }
            .into());
        }

        validate_nonce(&input.payload_nonce, "payload_nonce")?;
        validate_tag(&input.payload_tag, "payload_tag")?;
        validate_nonce(&input.dek_wrap_nonce, "dek_wrap_nonce")?;
        validate_tag(&input.dek_wrap_tag, "dek_wrap_tag")?;
        validate_hex(&input.payload_ct, "payload_ct")?;
        validate_hex(&input.dek_wrapped, "dek_wrapped")?;

        let payload_nonce: [u8; NONCE_LEN] = decode_fixed(&input.payload_nonce, "payload_nonce")?;
        let payload_tag: [u8; TAG_LEN] = decode_fixed(&input.payload_tag, "payload_tag")?;
        let dek_wrap_nonce: [u8; NONCE_LEN] = decode_fixed(&input.dek_wrap_nonce, "dek_wrap_nonce")?;
        let dek_wrap_tag: [u8; TAG_LEN] = decode_fixed(&input.dek_wrap_tag, "dek_wrap_tag")?;
        let payload_ct = decode_hex(&input.payload_ct, "payload_ct")?;
        let dek_wrapped = decode_hex(&input.dek_wrapped, "dek_wrapped")?;

        let aad = build_aad(&input.id, &input.party_id, input.mk_version);

        // Zeroizing guarantees the recovered DEK and plaintext are wiped on
        // every exit path from here on, error paths included.
        let dek = Zeroizing::new(
            cipher::open(
                self.master_key.as_bytes(),
                &dek_wrap_nonce,
                &dek_wrapped,
                &dek_wrap_tag,
                &aad,
            )
            .map_err(|_| EnvelopeError::Integrity)?,
        );
        let dek_key: &[u8; KEY_LEN] = dek
            .as_slice()
            .try_into()
            .map_err(|_| ValidationError::DekLength)?;

        let payload_bytes = Zeroizing::new(
            cipher::open(dek_key, &payload_nonce, &payload_ct, &payload_tag, &aad)
                .map_err(|_| EnvelopeError::Integrity)?,
        );

        let parsed: Value = serde_json::from_slice(&payload_bytes)
            .map_err(|_| ValidationError::PayloadNotJson)?;
        match parsed {
            Value::Object(map) => {
                debug!(record_id = %input.id, "payload decrypted");
                Ok(map)
            }
            _ => Err(ValidationError::PayloadNotObject.into()),
        }
    }
}

/// `tx_` + 16 CSPRNG bytes, hex-encoded.
fn generate_record_id() -> String {
    use aes_gcm::aead::rand_core::RngCore;
    let mut suffix = [0u8; 16];
    OsRng.fill_bytes(&mut suffix);
    format!("{RECORD_ID_PREFIX}{}", hex::encode(suffix))
}

/// The identity-binding AAD: `"{id}:{party_id}:v{mk_version}"` as UTF-8.
///
/// Not secret, but must be byte-for-byte reproducible at decryption time.
fn build_aad(id: &str, party_id: &str, mk_version: u32) -> Vec<u8> {
    format!("{id}:{party_id}:v{mk_version}").into_bytes()
}
