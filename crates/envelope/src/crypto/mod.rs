//! AES-256-GCM sealing primitives for the two envelope layers.
//!
//! This module is intentionally free of wire-format and record concerns.
//! It provides the low-level seal/open operations used by the engine, with
//! the identity-binding AAD threaded through both directions.

pub mod cipher;

pub use cipher::{KEY_LEN, NONCE_LEN, TAG_LEN};
