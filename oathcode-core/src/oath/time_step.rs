//! Time step derivation for TOTP (RFC 6238)

use crate::error::CodeError;

/// Counter and validity window for a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStep {
    pub counter: u64,
    /// Inclusive start of the window in milliseconds
    pub window_start: u64,
    /// Exclusive end of the window in milliseconds
    pub window_end: u64,
}

/// Compute the TOTP counter and window for `timestamp_ms`
///
/// # Errors
///
/// Returns `CodeError::InvalidInput` if `period_ms` is zero.
pub fn compute_time_step(timestamp_ms: u64, period_ms: u64) -> Result<TimeStep, CodeError> {
    if period_ms == 0 {
        return Err(CodeError::invalid_input("period must be greater than zero"));
    }

    let counter = timestamp_ms / period_ms;
    let window_start = counter * period_ms;
    Ok(TimeStep {
        counter,
        window_start,
        window_end: window_start.saturating_add(period_ms),
    })
}
