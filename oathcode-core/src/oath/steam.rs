//! Steam Guard code formatting
//!
//! Steam reuses TOTP with a fixed 30 second step but renders the truncated
//! value as five characters from its own 26 symbol alphabet instead of
//! decimal digits.

use super::engine::HmacEngine;
use super::generator::challenge_for;
use super::time_step::compute_time_step;
use super::truncate::dynamic_truncate;
use crate::error::CodeError;
use crate::types::{Code, Credential};
use tracing::debug;

/// Symbols used by the Steam mobile client, least significant first
pub const STEAM_ALPHABET: &[u8; 26] = b"23456789BCDFGHJKMNPQRTVWXY";

/// Number of characters in a Steam code
pub const STEAM_CODE_LEN: usize = 5;

/// Steam ignores the credential period
pub const STEAM_PERIOD_MS: u64 = 30_000;

/// Format an HMAC response as a Steam code
///
/// Characters are emitted in the order they are produced, lowest base-26
/// digit first. Steam's own client does the same, so the order must not be
/// reversed.
pub fn format_as_steam(response: &[u8]) -> Result<String, CodeError> {
    let mut number = dynamic_truncate(response)? as usize;
    let radix = STEAM_ALPHABET.len();

    let mut code = String::with_capacity(STEAM_CODE_LEN);
    for _ in 0..STEAM_CODE_LEN {
        code.push(char::from(STEAM_ALPHABET[number % radix]));
        number /= radix;
    }
    Ok(code)
}

/// Calculate the current Steam code for `credential`
///
/// # Errors
///
/// - `CodeError::NotSteamCredential` if the credential is not a Steam TOTP credential
/// - `CodeError::UpstreamUnavailable` if the engine fails
pub fn compute_steam_code<E: HmacEngine + ?Sized>(
    engine: &E,
    credential: &Credential,
    timestamp_ms: u64,
) -> Result<Code, CodeError> {
    if !credential.is_steam() {
        return Err(CodeError::NotSteamCredential);
    }

    let step = compute_time_step(timestamp_ms, STEAM_PERIOD_MS)?;
    debug!(counter = step.counter, "Calculating Steam code");

    let response = engine.calculate_response(&credential.id, &challenge_for(step.counter))?;
    Ok(Code::new(
        format_as_steam(&response)?,
        step.window_start,
        step.window_end,
    ))
}
