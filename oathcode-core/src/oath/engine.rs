//! HMAC engines
//!
//! The engine owns the credential secrets and computes HMAC responses over
//! an 8 byte challenge. Hardware tokens implement [`HmacEngine`] on top of
//! their own transport; [`SoftwareHmacEngine`] keeps decoded secrets in
//! memory and is used by the CLI.
//!
//! Reference: https://www.ietf.org/rfc/rfc2104.txt

use crate::error::CodeError;
use crate::types::{CredentialSecret, HashAlgorithm};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Computes HMAC responses for credentials held by a device
///
/// Implementations must be deterministic for fixed inputs and return 20, 32
/// or 64 bytes depending on the credential algorithm. Any failure to reach
/// the secret is reported as `CodeError::UpstreamUnavailable`.
pub trait HmacEngine {
    fn calculate_response(
        &self,
        credential_id: &[u8],
        challenge: &[u8; 8],
    ) -> Result<Vec<u8>, CodeError>;
}

impl<E: HmacEngine + ?Sized> HmacEngine for &E {
    fn calculate_response(
        &self,
        credential_id: &[u8],
        challenge: &[u8; 8],
    ) -> Result<Vec<u8>, CodeError> {
        (**self).calculate_response(credential_id, challenge)
    }
}

struct StoredKey {
    algorithm: HashAlgorithm,
    secret: CredentialSecret,
}

/// In-memory engine keyed by credential id
#[derive(Default)]
pub struct SoftwareHmacEngine {
    keys: HashMap<Vec<u8>, StoredKey>,
}

impl SoftwareHmacEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a secret, replacing any previous one for the same id
    pub fn insert(
        &mut self,
        credential_id: Vec<u8>,
        algorithm: HashAlgorithm,
        secret: CredentialSecret,
    ) {
        debug!(%algorithm, "Registering credential secret");
        self.keys.insert(credential_id, StoredKey { algorithm, secret });
    }

    pub fn contains(&self, credential_id: &[u8]) -> bool {
        self.keys.contains_key(credential_id)
    }
}

impl HmacEngine for SoftwareHmacEngine {
    fn calculate_response(
        &self,
        credential_id: &[u8],
        challenge: &[u8; 8],
    ) -> Result<Vec<u8>, CodeError> {
        let key = self.keys.get(credential_id).ok_or_else(|| {
            warn!("No secret registered for credential");
            CodeError::UpstreamUnavailable {
                reason: format!(
                    "no secret for credential {}",
                    String::from_utf8_lossy(credential_id)
                ),
            }
        })?;

        compute_hmac(key.algorithm, key.secret.expose(), challenge)
    }
}

/// Compute an HMAC with the given algorithm
pub fn compute_hmac(
    algorithm: HashAlgorithm,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, CodeError> {
    match algorithm {
        HashAlgorithm::Sha1 => mac::<Hmac<Sha1>>(key, message),
        HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(key, message),
        HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(key, message),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, CodeError> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| CodeError::UpstreamUnavailable {
        reason: "HMAC key rejected".to_string(),
    })?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
