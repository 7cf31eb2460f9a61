//! Configuration module
//!
//! Describes the credentials oathcode calculates codes for. Each entry
//! carries its own Base32 secret; the file is read from the user's
//! configuration directory (see [`toml_config`]).

use crate::error::{CodeError, ConfigError};
use crate::oath::base32::decode_secret;
use crate::oath::{SoftwareHmacEngine, MAX_DIGITS, MIN_DIGITS};
use crate::types::{
    Credential, HashAlgorithm, OathType, DEFAULT_DIGITS, DEFAULT_PERIOD, SOFTWARE_DEVICE_ID,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod toml_config;

fn default_oath_type() -> OathType {
    OathType::Totp
}

fn default_period() -> u32 {
    DEFAULT_PERIOD
}

fn default_digits() -> u8 {
    DEFAULT_DIGITS
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single configured credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Issuer, e.g. "Steam"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Account name
    pub name: String,

    /// Base32 encoded shared secret
    pub secret: String,

    #[serde(default = "default_oath_type")]
    pub oath_type: OathType,

    /// Time step in seconds (TOTP only)
    #[serde(default = "default_period")]
    pub period: u32,

    #[serde(default = "default_digits")]
    pub digits: u8,

    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Next HOTP counter value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,

    /// Only calculate on explicit request, never when listing
    #[serde(default, skip_serializing_if = "is_false")]
    pub touch_required: bool,
}

impl CredentialConfig {
    /// Create a TOTP entry with default settings
    pub fn new(issuer: Option<String>, name: String, secret: String) -> Self {
        Self {
            issuer,
            name,
            secret,
            oath_type: OathType::Totp,
            period: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
            algorithm: HashAlgorithm::default(),
            counter: None,
            touch_required: false,
        }
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }

        if self.secret.trim().is_empty() {
            return Err("Secret cannot be empty".to_string());
        }

        if decode_secret(&self.secret).is_err() {
            return Err(format!("Secret for {} is not valid Base32", self.name));
        }

        if self.period == 0 {
            return Err("Period cannot be zero".to_string());
        }

        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(format!(
                "Digits must be between {} and {}",
                MIN_DIGITS, MAX_DIGITS
            ));
        }

        if self.counter.is_some() && self.oath_type == OathType::Totp {
            return Err("Counter is only valid for HOTP credentials".to_string());
        }

        Ok(())
    }

    /// Credential metadata for this entry
    pub fn to_credential(&self) -> Credential {
        Credential::new(
            SOFTWARE_DEVICE_ID,
            self.issuer.clone(),
            self.name.clone(),
            self.oath_type,
        )
        .with_period(self.period)
        .with_digits(self.digits)
        .with_algorithm(self.algorithm)
        .with_touch_required(self.touch_required)
    }

    fn matches(&self, name: &str, issuer: Option<&str>) -> bool {
        self.name == name && issuer.map_or(true, |issuer| self.issuer.as_deref() == Some(issuer))
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("issuer", &self.issuer)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .field("oath_type", &self.oath_type)
            .field("period", &self.period)
            .field("digits", &self.digits)
            .field("algorithm", &self.algorithm)
            .field("counter", &self.counter)
            .field("touch_required", &self.touch_required)
            .finish()
    }
}

/// Complete configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OathcodeConfig {
    #[serde(default)]
    pub credentials: Vec<CredentialConfig>,
}

impl OathcodeConfig {
    /// Validate every entry and reject entries sharing a credential id
    ///
    /// The id is what the engine keys secrets by, so `Steam:alice` without an
    /// issuer clashes with `alice` issued by Steam.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for entry in &self.credentials {
            entry.validate()?;

            let credential = entry.to_credential();
            if !seen.insert(credential.id.clone()) {
                return Err(format!("Duplicate credential: {}", credential.label()));
            }
        }
        Ok(())
    }

    /// Find an entry by name, optionally narrowed by issuer
    pub fn find(&self, name: &str, issuer: Option<&str>) -> Result<&CredentialConfig, ConfigError> {
        self.credentials
            .iter()
            .find(|entry| entry.matches(name, issuer))
            .ok_or_else(|| ConfigError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn find_mut(
        &mut self,
        name: &str,
        issuer: Option<&str>,
    ) -> Result<&mut CredentialConfig, ConfigError> {
        self.credentials
            .iter_mut()
            .find(|entry| entry.matches(name, issuer))
            .ok_or_else(|| ConfigError::NotFound {
                name: name.to_string(),
            })
    }

    /// Decode every secret into a software HMAC engine
    pub fn build_engine(&self) -> Result<SoftwareHmacEngine, CodeError> {
        let mut engine = SoftwareHmacEngine::new();
        for entry in &self.credentials {
            let credential = entry.to_credential();
            if engine.contains(&credential.id) {
                return Err(CodeError::invalid_input(format!(
                    "Duplicate credential: {}",
                    credential.label()
                )));
            }
            engine.insert(credential.id, entry.algorithm, decode_secret(&entry.secret)?);
        }
        Ok(engine)
    }
}
