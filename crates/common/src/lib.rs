//! Shared wire types, constants, and errors for the `tx-envelope` crates.

pub mod error;
pub mod record;

pub use error::{EnvelopeError, ValidationError};
pub use record::{DecryptionInput, SecureRecord, ALGORITHM, MK_VERSION, RECORD_ID_PREFIX};
