//! Code generation: counter derivation, engine call, and formatting

use super::engine::HmacEngine;
use super::steam::{compute_steam_code, format_as_steam, STEAM_PERIOD_MS};
use super::time_step::compute_time_step;
use super::truncate::truncate_standard;
use crate::error::CodeError;
use crate::types::{Code, Credential, OathType};
use tracing::debug;

/// How a credential's response is turned into a display code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Steam,
    Totp,
    Hotp,
}

impl CodeKind {
    pub fn of(credential: &Credential) -> Self {
        if credential.is_steam() {
            CodeKind::Steam
        } else {
            match credential.oath_type {
                OathType::Totp => CodeKind::Totp,
                OathType::Hotp => CodeKind::Hotp,
            }
        }
    }
}

/// Encode a counter as the 8 byte big-endian HMAC challenge
pub fn challenge_for(counter: u64) -> [u8; 8] {
    counter.to_be_bytes()
}

/// Format an HMAC response for `credential` and attach its validity window
///
/// Steam credentials always use a 30 second window. HOTP codes are valid
/// from `timestamp_ms` until the next counter increment, so their window
/// ends at `Code::NO_EXPIRY`.
pub fn truncate_code(
    credential: &Credential,
    response: &[u8],
    timestamp_ms: u64,
) -> Result<Code, CodeError> {
    match CodeKind::of(credential) {
        CodeKind::Steam => {
            let step = compute_time_step(timestamp_ms, STEAM_PERIOD_MS)?;
            Ok(Code::new(format_as_steam(response)?, step.window_start, step.window_end))
        }
        CodeKind::Totp => {
            let step = compute_time_step(timestamp_ms, credential.period_ms())?;
            Ok(Code::new(
                truncate_standard(response, credential.digits)?,
                step.window_start,
                step.window_end,
            ))
        }
        CodeKind::Hotp => Ok(Code::new(
            truncate_standard(response, credential.digits)?,
            timestamp_ms,
            Code::NO_EXPIRY,
        )),
    }
}

/// Calculates codes through an HMAC engine
///
/// The generator itself is stateless; HOTP counters are owned by whoever
/// holds the credential.
pub struct CodeGenerator<E> {
    engine: E,
}

impl<E: HmacEngine> CodeGenerator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Calculate the current code of a TOTP (or Steam) credential
    ///
    /// # Errors
    ///
    /// - `CodeError::InvalidInput` for HOTP credentials, zero periods or bad digit counts
    /// - `CodeError::UpstreamUnavailable` if the engine fails
    pub fn calculate(&self, credential: &Credential, timestamp_ms: u64) -> Result<Code, CodeError> {
        let period_ms = match CodeKind::of(credential) {
            CodeKind::Steam => return compute_steam_code(&self.engine, credential, timestamp_ms),
            CodeKind::Totp => credential.period_ms(),
            CodeKind::Hotp => {
                return Err(CodeError::invalid_input(
                    "HOTP credentials need an explicit counter",
                ))
            }
        };

        let step = compute_time_step(timestamp_ms, period_ms)?;
        debug!(
            credential = %credential.label(),
            counter = step.counter,
            "Calculating time based code"
        );
        let response = self
            .engine
            .calculate_response(&credential.id, &challenge_for(step.counter))?;
        truncate_code(credential, &response, timestamp_ms)
    }

    /// Calculate an HOTP code for `counter`
    ///
    /// # Errors
    ///
    /// - `CodeError::InvalidInput` for time based credentials or bad digit counts
    /// - `CodeError::UpstreamUnavailable` if the engine fails
    pub fn calculate_hotp(
        &self,
        credential: &Credential,
        counter: u64,
        timestamp_ms: u64,
    ) -> Result<Code, CodeError> {
        if credential.oath_type != OathType::Hotp {
            return Err(CodeError::invalid_input(format!(
                "{} is a time based credential",
                credential.label()
            )));
        }

        debug!(credential = %credential.label(), counter, "Calculating HOTP code");
        let response = self
            .engine
            .calculate_response(&credential.id, &challenge_for(counter))?;
        truncate_code(credential, &response, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SOFTWARE_DEVICE_ID;
    use std::cell::RefCell;

    /// Returns a canned response and records the challenges it was given
    struct CannedEngine {
        response: Vec<u8>,
        challenges: RefCell<Vec<[u8; 8]>>,
    }

    impl CannedEngine {
        fn new(response: Vec<u8>) -> Self {
            Self {
                response,
                challenges: RefCell::new(Vec::new()),
            }
        }
    }

    impl HmacEngine for CannedEngine {
        fn calculate_response(&self, _: &[u8], challenge: &[u8; 8]) -> Result<Vec<u8>, CodeError> {
            self.challenges.borrow_mut().push(*challenge);
            Ok(self.response.clone())
        }
    }

    struct FailingEngine;

    impl HmacEngine for FailingEngine {
        fn calculate_response(&self, _: &[u8], _: &[u8; 8]) -> Result<Vec<u8>, CodeError> {
            Err(CodeError::UpstreamUnavailable {
                reason: "device removed".to_string(),
            })
        }
    }

    fn rfc_digest() -> Vec<u8> {
        hex::decode("1f8698690e02ca16618550ef7f19da8e945b555a").unwrap()
    }

    fn totp(issuer: &str) -> Credential {
        Credential::new(SOFTWARE_DEVICE_ID, Some(issuer.to_string()), "alice", OathType::Totp)
    }

    #[test]
    fn test_code_kind_dispatch() {
        assert_eq!(CodeKind::of(&totp("Steam")), CodeKind::Steam);
        assert_eq!(CodeKind::of(&totp("Example")), CodeKind::Totp);
        let hotp =
            Credential::new(SOFTWARE_DEVICE_ID, Some("Steam".to_string()), "alice", OathType::Hotp);
        assert_eq!(CodeKind::of(&hotp), CodeKind::Hotp);
    }

    #[test]
    fn test_challenge_is_big_endian() {
        assert_eq!(challenge_for(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(challenge_for(0x0102030405060708), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_truncate_code_totp_window() {
        let credential = totp("Example").with_period(60).with_digits(8);
        let code = truncate_code(&credential, &rfc_digest(), 125_000).unwrap();
        assert_eq!(code.value, "57872921");
        assert_eq!(code.valid_from, 120_000);
        assert_eq!(code.valid_to, 180_000);
    }

    #[test]
    fn test_truncate_code_steam_ignores_period_and_digits() {
        let credential = totp("Steam").with_period(60).with_digits(8);
        let code = truncate_code(&credential, &rfc_digest(), 125_000).unwrap();
        assert_eq!(code.value, "KQ7F9");
        assert_eq!(code.valid_from, 120_000);
        assert_eq!(code.valid_to, 150_000);
    }

    #[test]
    fn test_truncate_code_hotp_open_window() {
        let credential = Credential::new(SOFTWARE_DEVICE_ID, None, "counter", OathType::Hotp);
        let code = truncate_code(&credential, &rfc_digest(), 125_000).unwrap();
        assert_eq!(code.value, "872921");
        assert_eq!(code.valid_from, 125_000);
        assert_eq!(code.valid_to, Code::NO_EXPIRY);
    }

    #[test]
    fn test_truncate_code_rejects_bad_digits() {
        let credential = totp("Example").with_digits(10);
        let result = truncate_code(&credential, &rfc_digest(), 0);
        assert!(matches!(result, Err(CodeError::InvalidInput { .. })));
    }

    #[test]
    fn test_calculate_sends_time_counter() {
        let generator = CodeGenerator::new(CannedEngine::new(rfc_digest()));
        let code = generator.calculate(&totp("Example"), 59_000).unwrap();
        assert_eq!(code.value, "872921");
        assert_eq!(*generator.engine().challenges.borrow(), vec![challenge_for(1)]);
    }

    #[test]
    fn test_calculate_steam_uses_fixed_step() {
        let generator = CodeGenerator::new(CannedEngine::new(rfc_digest()));
        let credential = totp("Steam").with_period(60);
        generator.calculate(&credential, 65_000).unwrap();
        assert_eq!(*generator.engine().challenges.borrow(), vec![challenge_for(2)]);
    }

    #[test]
    fn test_calculate_rejects_hotp() {
        let generator = CodeGenerator::new(CannedEngine::new(rfc_digest()));
        let credential = Credential::new(SOFTWARE_DEVICE_ID, None, "counter", OathType::Hotp);
        assert!(matches!(
            generator.calculate(&credential, 0),
            Err(CodeError::InvalidInput { .. })
        ));
        assert!(generator.engine().challenges.borrow().is_empty());
    }

    #[test]
    fn test_calculate_hotp_rejects_totp() {
        let generator = CodeGenerator::new(CannedEngine::new(rfc_digest()));
        assert!(matches!(
            generator.calculate_hotp(&totp("Example"), 0, 0),
            Err(CodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_engine_failure_propagates() {
        let generator = CodeGenerator::new(FailingEngine);
        let expected = CodeError::UpstreamUnavailable {
            reason: "device removed".to_string(),
        };
        assert_eq!(generator.calculate(&totp("Example"), 0), Err(expected.clone()));
        assert_eq!(
            compute_steam_code(&FailingEngine, &totp("Steam"), 0),
            Err(expected)
        );
    }
}
