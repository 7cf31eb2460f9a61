//! Type definitions for credentials and calculated codes
//!
//! Credentials are read-only metadata describing an OATH account; codes are
//! immutable values produced fresh for every calculation. Secret key material
//! is wrapped with the secrecy crate so it never shows up in logs or debug
//! output.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Default TOTP time step in seconds
pub const DEFAULT_PERIOD: u32 = 30;

/// Default number of digits for numeric codes
pub const DEFAULT_DIGITS: u8 = 6;

/// Issuer name that, together with TOTP, marks a Steam credential
pub const STEAM_ISSUER: &str = "Steam";

/// Device id used for credentials held by the software HMAC engine
pub const SOFTWARE_DEVICE_ID: &str = "software";

/// OATH credential type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OathType {
    /// Counter based, RFC 4226
    Hotp,
    /// Time based, RFC 6238
    Totp,
}

impl fmt::Display for OathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OathType::Hotp => write!(f, "HOTP"),
            OathType::Totp => write!(f, "TOTP"),
        }
    }
}

/// Hash algorithm used by the HMAC engine for a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Length in bytes of an HMAC response produced with this algorithm
    pub fn response_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "SHA1"),
            HashAlgorithm::Sha256 => write!(f, "SHA256"),
            HashAlgorithm::Sha512 => write!(f, "SHA512"),
        }
    }
}

/// An OATH credential as stored on a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Device the credential lives on
    pub device_id: String,

    /// Opaque identifier, unique per device
    #[serde(serialize_with = "id_to_base32", deserialize_with = "id_from_base32")]
    pub id: Vec<u8>,

    pub issuer: Option<String>,

    /// Account name
    pub name: String,

    pub oath_type: OathType,

    /// Time step in seconds (TOTP only)
    pub period: u32,

    pub digits: u8,

    pub algorithm: HashAlgorithm,

    pub touch_required: bool,
}

impl Credential {
    /// Create a credential with default period, digits and algorithm
    ///
    /// The identifier follows the OATH applet convention: `issuer:name`,
    /// prefixed with `period/` for TOTP credentials with a non-default period.
    pub fn new(
        device_id: impl Into<String>,
        issuer: Option<String>,
        name: impl Into<String>,
        oath_type: OathType,
    ) -> Self {
        let name = name.into();
        let id = credential_id(issuer.as_deref(), &name, oath_type, DEFAULT_PERIOD);
        Self {
            device_id: device_id.into(),
            id,
            issuer,
            name,
            oath_type,
            period: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
            algorithm: HashAlgorithm::default(),
            touch_required: false,
        }
    }

    /// Set the time step, recomputing the identifier
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self.id = credential_id(self.issuer.as_deref(), &self.name, self.oath_type, period);
        self
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_touch_required(mut self, touch_required: bool) -> Self {
        self.touch_required = touch_required;
        self
    }

    /// Returns true if this credential is considered to be a Steam credential
    pub fn is_steam(&self) -> bool {
        self.issuer.as_deref() == Some(STEAM_ISSUER) && self.oath_type == OathType::Totp
    }

    /// Time step in milliseconds
    pub fn period_ms(&self) -> u64 {
        u64::from(self.period) * 1000
    }

    /// Human readable label, `issuer (name)` or just `name`
    pub fn label(&self) -> String {
        match &self.issuer {
            Some(issuer) => format!("{} ({})", issuer, self.name),
            None => self.name.clone(),
        }
    }
}

/// Build the OATH credential identifier
pub fn credential_id(
    issuer: Option<&str>,
    name: &str,
    oath_type: OathType,
    period: u32,
) -> Vec<u8> {
    let mut id = String::new();
    if oath_type == OathType::Totp && period != DEFAULT_PERIOD {
        id.push_str(&format!("{}/", period));
    }
    if let Some(issuer) = issuer {
        id.push_str(issuer);
        id.push(':');
    }
    id.push_str(name);
    id.into_bytes()
}

fn id_to_base32<S: Serializer>(id: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&data_encoding::BASE32_NOPAD.encode(id))
}

fn id_from_base32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    data_encoding::BASE32_NOPAD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

/// A calculated code and its validity window in milliseconds
///
/// `Debug` output redacts the value; codes are short lived but still
/// sensitive and must not end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub value: String,
    pub valid_from: u64,
    pub valid_to: u64,
}

impl Code {
    /// `valid_to` sentinel for codes that do not expire by time (HOTP)
    pub const NO_EXPIRY: u64 = u64::MAX;

    pub fn new(value: String, valid_from: u64, valid_to: u64) -> Self {
        Self {
            value,
            valid_from,
            valid_to,
        }
    }

    /// Expose the code value
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn expires(&self) -> bool {
        self.valid_to != Self::NO_EXPIRY
    }

    /// Milliseconds left until the code expires, `None` for HOTP codes
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.expires().then(|| self.valid_to.saturating_sub(now_ms))
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Code")
            .field("value", &"[REDACTED]")
            .field("valid_from", &self.valid_from)
            .field("valid_to", &self.valid_to)
            .finish()
    }
}

/// A credential paired with its current code, if one was calculated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialWithCode {
    pub credential: Credential,
    pub code: Option<Code>,
}

impl CredentialWithCode {
    pub fn new(credential: Credential, code: Option<Code>) -> Self {
        Self { credential, code }
    }
}

/// Wrapper for decoded HMAC key material
///
/// This type ensures secrets are never accidentally logged or exposed
/// in debug output.
pub struct CredentialSecret(Secret<Vec<u8>>);

impl CredentialSecret {
    pub fn new(secret: Vec<u8>) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the key bytes (use with caution!)
    ///
    /// This should only be called when keying the HMAC.
    pub fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialSecret([REDACTED])")
    }
}
