//! `envelope` — envelope encryption for transaction records.
//!
//! Each payload is encrypted under a one-time 32-byte DEK, and the DEK is
//! wrapped under a long-lived master key; both AES-256-GCM layers
//! authenticate the record's identity (`id`, `partyId`, `mk_version`) as
//! AAD, so a stored record cannot be swapped between owners or versions
//! without failing decryption.
//!
//! The engine is synchronous, stateless with respect to storage, and free
//! of I/O; callers persist the returned [`SecureRecord`] themselves.

pub mod crypto;
pub mod dek;
pub mod engine;
pub mod validation;

pub use dek::DekBytes;
pub use engine::{EncryptionResult, EnvelopeEngine, MasterKey};

// Wire contract re-exports, so embedding callers need only this crate.
pub use common::{DecryptionInput, EnvelopeError, SecureRecord, ValidationError};
