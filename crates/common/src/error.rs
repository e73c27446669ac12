//! Error taxonomy shared between the engine and its callers.
//!
//! Two failure kinds matter to callers:
//!
//! - [`ValidationError`] — deterministic and caller-fixable: malformed or
//!   mis-sized fields, an unsupported version, a blank party id. Raised
//!   before any cryptographic work wherever possible.
//! - [`EnvelopeError::Integrity`] — any authenticated-decryption failure at
//!   either layer. The message is deliberately generic: revealing which
//!   layer rejected the data would give an attacker an oracle for
//!   localising tampering.

use thiserror::Error;

/// Deterministic input-format failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value is empty, odd-length, or contains non-hex characters.
    #[error("{field} must be an even-length hex string (0-9, a-f, A-F)")]
    InvalidHex { field: &'static str },

    /// The value is valid hex but decodes to the wrong number of bytes.
    #[error("{field} must be {expected} bytes, got {actual} bytes")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `party_id` was empty or whitespace-only at encryption time.
    #[error("partyId must be a non-empty string")]
    EmptyPartyId,

    /// `id` or `party_id` was empty at decryption time.
    #[error("id and partyId are required for decryption")]
    MissingIdentity,

    /// The record's `mk_version` does not match the engine's version.
    #[error("unsupported mk_version: {got}, expected {expected}")]
    UnsupportedVersion { got: u32, expected: u32 },

    /// The master key hex decodes to the wrong number of bytes.
    #[error("master key must be 32 bytes (64 hex chars), got {actual} bytes")]
    MasterKeyLength { actual: usize },

    /// The unwrapped DEK was not exactly 32 bytes.
    #[error("invalid unwrapped DEK length")]
    DekLength,

    /// The decrypted payload bytes are not valid JSON.
    #[error("invalid JSON in decrypted payload")]
    PayloadNotJson,

    /// The decrypted payload parsed, but to an array or scalar.
    #[error("decrypted payload must be a JSON object")]
    PayloadNotObject,
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Input-format failure; correct the input and retry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authenticated decryption failed at one of the two layers: tampered
    /// ciphertext or tag, corruption, or an identity-binding (AAD) mismatch.
    /// Not retryable with the same inputs. Never layer-specific.
    #[error("decryption failed: data may be tampered or corrupted")]
    Integrity,

    /// An unexpected internal fault (unreachable with well-formed keys).
    #[error("internal error: {0}")]
    Internal(String),
}
