//! [`DekBytes`]: the per-record Data Encryption Key.
//!
//! A fresh DEK is generated for every encryption call and exists only for
//! the duration of that call — it is never cached, never reused across
//! records, and never persisted except in wrapped form. The buffer is
//! heap-boxed so moves do not scatter copies across the stack, and it is
//! overwritten with zeroes when dropped.

use std::fmt;

use aes_gcm::aead::OsRng;
use zeroize::Zeroize;

use crate::crypto::KEY_LEN;

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// Returned to the caller inside an `EncryptionResult`; the caller decides
/// whether to retain it, and dropping it wipes the key material.
#[derive(Clone)]
pub struct DekBytes(Box<[u8; KEY_LEN]>);

impl DekBytes {
    /// Generate a fresh DEK from the OS CSPRNG.
    pub fn generate() -> Self {
        use aes_gcm::aead::rand_core::RngCore;
        let mut buf = Box::new([0u8; KEY_LEN]);
        OsRng.fill_bytes(buf.as_mut_slice());
        Self(buf)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DekBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for DekBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("DekBytes([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_is_32_bytes() {
        let dek = DekBytes::generate();
        assert_eq!(dek.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn generated_keys_are_unique() {
        let a = DekBytes::generate();
        let b = DekBytes::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn debug_output_is_redacted() {
        let dek = DekBytes::generate();
        assert_eq!(format!("{dek:?}"), "DekBytes([REDACTED])");
    }
}
