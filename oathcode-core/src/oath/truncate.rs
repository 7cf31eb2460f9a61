//! RFC 4226 dynamic truncation
//!
//! Reference: https://www.rfc-editor.org/rfc/rfc4226#section-5.3

use crate::error::CodeError;

/// Smallest supported number of digits for numeric codes
pub const MIN_DIGITS: u8 = 6;

/// Largest supported number of digits for numeric codes
pub const MAX_DIGITS: u8 = 8;

/// Extract the 31-bit value selected by the low nibble of the last byte
///
/// # Errors
///
/// Returns `CodeError::InvalidInput` if the response is empty or too short
/// to hold four bytes at the selected offset.
pub fn dynamic_truncate(response: &[u8]) -> Result<u32, CodeError> {
    let last = response
        .last()
        .ok_or_else(|| CodeError::invalid_input("HMAC response is empty"))?;
    let offset = usize::from(last & 0x0f);

    let window: [u8; 4] = response
        .get(offset..offset + 4)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .ok_or_else(|| {
            CodeError::invalid_input(format!(
                "HMAC response of {} bytes is too short for offset {}",
                response.len(),
                offset
            ))
        })?;

    Ok(u32::from_be_bytes(window) & 0x7fff_ffff)
}

/// Format an HMAC response as a zero-padded decimal code of `digits` length
///
/// # Errors
///
/// Returns `CodeError::InvalidInput` if `digits` is outside
/// `MIN_DIGITS..=MAX_DIGITS` or the response is too short.
pub fn truncate_standard(response: &[u8], digits: u8) -> Result<String, CodeError> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(CodeError::invalid_input(format!(
            "digits must be between {} and {}, got {}",
            MIN_DIGITS, MAX_DIGITS, digits
        )));
    }

    let value = dynamic_truncate(response)?;
    let modulus = 10_u32.pow(u32::from(digits));
    Ok(format!("{:01$}", value % modulus, usize::from(digits)))
}
