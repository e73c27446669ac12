//! Pure format validation for hex-encoded wire fields.
//!
//! Every check here runs before any cryptographic operation, so malformed
//! input never reaches the AEAD primitive. All functions are side-effect
//! free and fail with a [`ValidationError`] naming the offending field.

use common::ValidationError;

use crate::crypto::{KEY_LEN, NONCE_LEN, TAG_LEN};

/// Check that `value` is a non-empty, even-length string of hex digits.
///
/// Both cases are accepted on input; the engine itself always emits
/// lowercase.
pub fn validate_hex(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let well_formed = !value.is_empty()
        && value.len() % 2 == 0
        && value.bytes().all(|b| b.is_ascii_hexdigit());
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidHex { field })
    }
}

/// [`validate_hex`], then require the decoded length to be exactly
/// `expected` bytes.
pub fn validate_hex_length(
    value: &str,
    expected: usize,
    field: &'static str,
) -> Result<(), ValidationError> {
    validate_hex(value, field)?;
    let actual = value.len() / 2;
    if actual != expected {
        return Err(ValidationError::WrongLength {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Require a hex-encoded 12-byte AEAD nonce.
pub fn validate_nonce(value: &str, field: &'static str) -> Result<(), ValidationError> {
    validate_hex_length(value, NONCE_LEN, field)
}

/// Require a hex-encoded 16-byte authentication tag.
pub fn validate_tag(value: &str, field: &'static str) -> Result<(), ValidationError> {
    validate_hex_length(value, TAG_LEN, field)
}

/// Require a hex-encoded 32-byte master key.
pub fn validate_master_key_hex(value: &str) -> Result<(), ValidationError> {
    validate_hex(value, "masterKeyHex")?;
    let actual = value.len() / 2;
    if actual != KEY_LEN {
        return Err(ValidationError::MasterKeyLength { actual });
    }
    Ok(())
}

/// Decode a hex field that has already passed [`validate_hex`].
pub(crate) fn decode_hex(value: &str, field: &'static str) -> Result<Vec<u8>, ValidationError> {
    hex::decode(value).map_err(|_| ValidationError::InvalidHex { field })
}

/// Decode a hex field into a fixed-size array.
pub(crate) fn decode_fixed<const N: usize>(
    value: &str,
    field: &'static str,
) -> Result<[u8; N], ValidationError> {
    let bytes = decode_hex(value, field)?;
    let actual = bytes.len();
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::WrongLength {
            field,
            expected: N,
            actual,
        })
}
