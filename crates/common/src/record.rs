//! The secure-record wire contract exchanged between the engine and its callers.
//!
//! These types are serialised as JSON across whatever transport or storage
//! layer embeds the engine. All binary fields are lowercase hex strings;
//! field names on the wire are fixed and must not drift, since stored
//! records outlive any one build of this workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every record id; the suffix is 16 random bytes, hex-encoded.
pub const RECORD_ID_PREFIX: &str = "tx_";

/// AEAD scheme used for both the payload and key-wrap layers.
pub const ALGORITHM: &str = "AES-256-GCM";

/// The single master-key scheme version this engine accepts.
///
/// Records carrying any other value are rejected before cryptographic work
/// begins; there is no migration path.
pub const MK_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// SecureRecord
// ---------------------------------------------------------------------------

/// An envelope-encrypted transaction record — the only persisted entity.
///
/// Produced by `encrypt_payload` and handed back (possibly tampered) for
/// decryption. The identity fields `id`, `party_id`, and `mk_version` are
/// bound into the AAD of both encryption layers, so editing any of them
/// invalidates the ciphertext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecureRecord {
    /// Globally unique id, `tx_` + 32 lowercase hex characters.
    pub id: String,
    /// Caller-supplied owner/tenant identifier.
    #[serde(rename = "partyId")]
    pub party_id: String,
    /// Set once at encryption time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Payload-layer nonce (12 bytes, hex).
    pub payload_nonce: String,
    /// Payload ciphertext (variable length, hex).
    pub payload_ct: String,
    /// Payload-layer authentication tag (16 bytes, hex).
    pub payload_tag: String,

    /// Key-wrap-layer nonce (12 bytes, hex).
    pub dek_wrap_nonce: String,
    /// The DEK encrypted under the master key (32 bytes, hex).
    pub dek_wrapped: String,
    /// Key-wrap-layer authentication tag (16 bytes, hex).
    pub dek_wrap_tag: String,

    /// Always [`ALGORITHM`].
    pub alg: String,
    /// Always [`MK_VERSION`] for records this engine produced.
    pub mk_version: u32,
}

// ---------------------------------------------------------------------------
// DecryptionInput
// ---------------------------------------------------------------------------

/// The fields decryption consumes.
///
/// `createdAt` and `alg` are carried on the record for callers but are not
/// consulted when decrypting; identity binding goes through the AAD instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptionInput {
    pub id: String,
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub mk_version: u32,

    pub payload_nonce: String,
    pub payload_ct: String,
    pub payload_tag: String,

    pub dek_wrap_nonce: String,
    pub dek_wrapped: String,
    pub dek_wrap_tag: String,
}

impl From<&SecureRecord> for DecryptionInput {
    fn from(record: &SecureRecord) -> Self {
        Self {
            id: record.id.clone(),
            party_id: record.party_id.clone(),
            mk_version: record.mk_version,
            payload_nonce: record.payload_nonce.clone(),
            payload_ct: record.payload_ct.clone(),
            payload_tag: record.payload_tag.clone(),
            dek_wrap_nonce: record.dek_wrap_nonce.clone(),
            dek_wrapped: record.dek_wrapped.clone(),
            dek_wrap_tag: record.dek_wrap_tag.clone(),
        }
    }
}

impl From<SecureRecord> for DecryptionInput {
    fn from(record: SecureRecord) -> Self {
        Self::from(&record)
    }
}
