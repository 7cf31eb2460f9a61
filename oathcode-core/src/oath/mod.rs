//! OATH code calculation
//!
//! Turns HMAC responses into display codes: RFC 4226 dynamic truncation for
//! standard TOTP/HOTP credentials, and the base-26 Steam Guard encoding for
//! Steam credentials. Everything here is pure and stateless; the only I/O
//! happens inside the [`HmacEngine`] supplied by the caller.

pub mod base32;
pub mod engine;
pub mod generator;
pub mod steam;
pub mod time_step;
pub mod truncate;

pub use engine::{HmacEngine, SoftwareHmacEngine};
pub use generator::{challenge_for, truncate_code, CodeGenerator, CodeKind};
pub use steam::{
    compute_steam_code, format_as_steam, STEAM_ALPHABET, STEAM_CODE_LEN, STEAM_PERIOD_MS,
};
pub use time_step::{compute_time_step, TimeStep};
pub use truncate::{dynamic_truncate, truncate_standard, MAX_DIGITS, MIN_DIGITS};
