//! List command implementation
//!
//! Prints every configured credential with its current code. HOTP
//! credentials are listed without a code, since calculating one would
//! consume a counter value. Credentials marked `touch_required` are also
//! left out until they are asked for with `oathcode code`.

use super::{format_entry, now_ms};
use oathcode_core::config::{toml_config::load_config, OathcodeConfig};
use oathcode_core::error::OathcodeError;
use oathcode_core::oath::{CodeGenerator, HmacEngine};
use oathcode_core::types::{CredentialWithCode, OathType};
use tracing::debug;

/// Run the list command
pub fn run_list(json: bool, timestamp: Option<u64>) -> Result<(), OathcodeError> {
    let config = load_config()?;
    let timestamp_ms = timestamp.unwrap_or_else(now_ms);

    let engine = config.build_engine()?;
    let entries = calculate_all(&config, &CodeGenerator::new(&engine), timestamp_ms)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No credentials configured. Add one with `oathcode add`.");
    } else {
        for entry in &entries {
            println!("{}", format_entry(entry, timestamp_ms));
        }
    }

    Ok(())
}

/// Pair every configured credential with its current code
pub fn calculate_all<E: HmacEngine>(
    config: &OathcodeConfig,
    generator: &CodeGenerator<E>,
    timestamp_ms: u64,
) -> Result<Vec<CredentialWithCode>, OathcodeError> {
    config
        .credentials
        .iter()
        .map(|entry| -> Result<CredentialWithCode, OathcodeError> {
            let credential = entry.to_credential();
            let code = match credential.oath_type {
                _ if credential.touch_required => {
                    debug!("Skipping {}, touch required", credential.label());
                    None
                }
                OathType::Totp => Some(generator.calculate(&credential, timestamp_ms)?),
                OathType::Hotp => None,
            };
            Ok(CredentialWithCode::new(credential, code))
        })
        .collect()
}
