//! Code command implementation
//!
//! Outputs the current code of a single credential to stdout. HOTP
//! credentials use the counter stored in the configuration, which is
//! advanced and saved back after each calculation.

use super::now_ms;
use oathcode_core::config::toml_config::{load_config, save_config};
use oathcode_core::config::OathcodeConfig;
use oathcode_core::error::OathcodeError;
use oathcode_core::oath::CodeGenerator;
use oathcode_core::types::{Code, CredentialWithCode, OathType};
use tracing::info;

/// Run the code command
///
/// Prints only the code value (machine-parsable) unless `json` is set.
pub fn run_code(
    name: &str,
    issuer: Option<&str>,
    timestamp: Option<u64>,
    json: bool,
) -> Result<(), OathcodeError> {
    let mut config = load_config()?;
    let timestamp_ms = timestamp.unwrap_or_else(now_ms);

    let (entry, counter_used) = calculate_one(&mut config, name, issuer, timestamp_ms)?;
    if counter_used {
        save_config(&config)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else if let Some(code) = &entry.code {
        println!("{}", code.expose());
    }

    Ok(())
}

/// Calculate the code for one credential
///
/// Returns the credential with its code, and whether an HOTP counter was
/// consumed (in which case `config` has been updated in place).
pub fn calculate_one(
    config: &mut OathcodeConfig,
    name: &str,
    issuer: Option<&str>,
    timestamp_ms: u64,
) -> Result<(CredentialWithCode, bool), OathcodeError> {
    let engine = config.build_engine()?;
    let generator = CodeGenerator::new(&engine);

    let entry = config.find_mut(name, issuer)?;
    let credential = entry.to_credential();

    let (code, counter_used): (Code, bool) = match credential.oath_type {
        OathType::Totp => (generator.calculate(&credential, timestamp_ms)?, false),
        OathType::Hotp => {
            let counter = entry.counter.unwrap_or(0);
            let code = generator.calculate_hotp(&credential, counter, timestamp_ms)?;
            entry.counter = Some(counter + 1);
            info!("Advanced HOTP counter of {} to {}", credential.label(), counter + 1);
            (code, true)
        }
    };

    Ok((CredentialWithCode::new(credential, Some(code)), counter_used))
}
