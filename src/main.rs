//! oathcode - OATH and Steam Guard code generator
//!
//! A command-line tool that calculates TOTP, HOTP and Steam Guard codes
//! for the credentials listed in its configuration file.

use clap::{Parser, Subcommand};
use oathcode_core::error::{CodeError, OathcodeError};
use oathcode_core::init_logging;

mod cli;

#[derive(Parser)]
#[command(name = "oathcode")]
#[command(about = "Calculate OATH (TOTP/HOTP) and Steam Guard codes")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current codes for all credentials
    List {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Calculate for this Unix time in milliseconds instead of now
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Print the current code of one credential
    Code {
        /// Account name
        name: String,
        #[arg(long)]
        issuer: Option<String>,
        /// Calculate for this Unix time in milliseconds instead of now
        #[arg(long)]
        timestamp: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Add a credential to the configuration
    Add(cli::add::AddArgs),
}

fn exit_code(error: &OathcodeError) -> i32 {
    match error {
        // Configuration and input errors (exit code 2)
        OathcodeError::Config(_) | OathcodeError::TomlSerialize(_) => 2,
        OathcodeError::Code(code_error) => match code_error {
            CodeError::InvalidInput { .. }
            | CodeError::NotSteamCredential
            | CodeError::InvalidBase32 => 2,
            CodeError::UpstreamUnavailable { .. } => 1,
        },
        // Runtime errors (exit code 1)
        OathcodeError::Io(_) | OathcodeError::Json(_) => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let result = match cli.command {
        Commands::List { json, timestamp } => cli::list::run_list(json, timestamp),
        Commands::Code {
            name,
            issuer,
            timestamp,
            json,
        } => cli::code::run_code(&name, issuer.as_deref(), timestamp, json),
        Commands::Add(args) => cli::add::run_add(&args),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(exit_code(&e));
    }
}
