//! Tolerant Base32 decoding for user-entered secrets
//!
//! Secrets copied from provisioning pages are often grouped with spaces,
//! lowercased, or stripped of padding. Decoding:
//! 1. Remove all spaces
//! 2. Pad to an 8-character boundary
//! 3. Decode case-insensitively

use crate::error::CodeError;
use crate::types::CredentialSecret;
use data_encoding::BASE32;

fn clean(input: &str) -> String {
    input.replace(' ', "")
}

/// padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let padding_len = (8 - (input.len() % 8)) % 8;
    format!("{}{}", input, "=".repeat(padding_len))
}

/// Decode a Base32 string to bytes
pub fn decode_base32(input: &str) -> Result<Vec<u8>, CodeError> {
    let cleaned = clean(input.trim_end_matches('='));
    if cleaned.is_empty() {
        return Err(CodeError::InvalidBase32);
    }

    BASE32
        .decode(pad(&cleaned).to_uppercase().as_bytes())
        .map_err(|_| CodeError::InvalidBase32)
}

/// Decode a Base32 secret straight into a wrapped secret
pub fn decode_secret(input: &str) -> Result<CredentialSecret, CodeError> {
    decode_base32(input).map(CredentialSecret::new)
}
