//! Add command implementation
//!
//! Appends a credential to the configuration file after validating it.

use clap::ValueEnum;
use colored::Colorize;
use oathcode_core::config::toml_config::{get_config_path, load_config_or_default, save_config};
use oathcode_core::config::{CredentialConfig, OathcodeConfig};
use oathcode_core::error::{ConfigError, OathcodeError};
use oathcode_core::types::{HashAlgorithm, OathType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Totp,
    Hotp,
}

impl From<TypeArg> for OathType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Totp => OathType::Totp,
            TypeArg::Hotp => OathType::Hotp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Sha1,
    Sha256,
    Sha512,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sha1 => HashAlgorithm::Sha1,
            AlgorithmArg::Sha256 => HashAlgorithm::Sha256,
            AlgorithmArg::Sha512 => HashAlgorithm::Sha512,
        }
    }
}

/// Arguments of the add command
#[derive(Debug, Clone, clap::Args)]
pub struct AddArgs {
    /// Account name
    #[arg(long)]
    pub name: String,

    /// Issuer, use "Steam" for Steam Guard codes
    #[arg(long)]
    pub issuer: Option<String>,

    /// Base32 encoded shared secret
    #[arg(long)]
    pub secret: String,

    #[arg(long = "type", value_enum, default_value = "totp")]
    pub oath_type: TypeArg,

    /// Time step in seconds
    #[arg(long, default_value_t = 30)]
    pub period: u32,

    #[arg(long, default_value_t = 6)]
    pub digits: u8,

    #[arg(long, value_enum, default_value = "sha1")]
    pub algorithm: AlgorithmArg,

    /// Leave the code out of `oathcode list`
    #[arg(long)]
    pub touch: bool,
}

impl AddArgs {
    fn to_entry(&self) -> CredentialConfig {
        let mut entry =
            CredentialConfig::new(self.issuer.clone(), self.name.clone(), self.secret.clone());
        entry.oath_type = self.oath_type.into();
        entry.period = self.period;
        entry.digits = self.digits;
        entry.algorithm = self.algorithm.into();
        entry.touch_required = self.touch;
        if entry.oath_type == OathType::Hotp {
            entry.counter = Some(0);
        }
        entry
    }
}

/// Run the add command
pub fn run_add(args: &AddArgs) -> Result<(), OathcodeError> {
    let mut config = load_config_or_default()?;
    let entry = add_entry(&mut config, args)?;

    save_config(&config)?;

    println!(
        "{} Added {} to {}",
        "✓".green(),
        entry.to_credential().label().as_str().bold(),
        get_config_path()?.display()
    );
    Ok(())
}

/// Validate and append a new entry to `config`
pub fn add_entry(
    config: &mut OathcodeConfig,
    args: &AddArgs,
) -> Result<CredentialConfig, OathcodeError> {
    let entry = args.to_entry();
    config.credentials.push(entry.clone());

    if let Err(message) = config.validate() {
        config.credentials.pop();
        return Err(ConfigError::ValidationError { message }.into());
    }

    Ok(entry)
}
