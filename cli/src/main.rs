//! sigdrop: issuer tooling for signature-authorized airdrop claims.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use sigdrop_types::Address;
use sigdrop_utils::LogFormat;

use crate::commands::{KeySource, SchemeSource};

#[derive(Parser)]
#[command(name = "sigdrop", version, about = "Issue and inspect signature-authorized airdrop claims")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "warn", env = "SIGDROP_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "SIGDROP_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct KeyArgs {
    /// Signer private key as 32-byte hex.
    #[arg(long, env = "SIGDROP_SIGNER_KEY", hide_env_values = true)]
    private_key: String,
}

#[derive(clap::Args)]
struct SchemeArgs {
    /// Airdrop TOML config. Its scheme section takes precedence over --scheme and the domain flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Digest scheme: "personal_sign" or "typed_data".
    #[arg(long, default_value = "personal_sign")]
    scheme: String,

    /// Claim engine address (the EIP-712 verifying contract). Required for typed_data.
    #[arg(long, value_parser = parse_address_arg)]
    engine: Option<Address>,

    /// EIP-712 domain chain id.
    #[arg(long, default_value_t = 1)]
    chain_id: u64,

    /// EIP-712 domain name.
    #[arg(long, default_value = "ProtocolAirdrop")]
    domain_name: String,

    /// EIP-712 domain version.
    #[arg(long, default_value = "1")]
    domain_version: String,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a fresh signer key.
    Keygen {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the address of a private key.
    Address {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Sign a claim authorization.
    Sign {
        #[command(flatten)]
        key: KeyArgs,

        #[arg(long, value_parser = parse_address_arg)]
        claimant: Address,

        /// Amount in raw token units.
        #[arg(long)]
        amount: u128,

        #[command(flatten)]
        scheme: SchemeArgs,

        /// Emit the full claim request as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Recover the signer of a claim authorization.
    Recover {
        #[arg(long, value_parser = parse_address_arg)]
        claimant: Address,

        #[arg(long)]
        amount: u128,

        /// 65-byte signature as hex.
        #[arg(long)]
        signature: String,

        #[command(flatten)]
        scheme: SchemeArgs,
    },

    /// Load and validate an airdrop config.
    CheckConfig {
        #[arg(long)]
        config: PathBuf,

        /// Engine address, to print the EIP-712 domain separator.
        #[arg(long, value_parser = parse_address_arg)]
        engine: Option<Address>,
    },
}

fn parse_address_arg(s: &str) -> Result<Address, String> {
    sigdrop_crypto::parse_address(s).map_err(|e| e.to_string())
}

impl From<KeyArgs> for KeySource {
    fn from(args: KeyArgs) -> Self {
        KeySource(args.private_key)
    }
}

impl From<SchemeArgs> for SchemeSource {
    fn from(args: SchemeArgs) -> Self {
        SchemeSource {
            config: args.config,
            scheme: args.scheme,
            engine: args.engine,
            chain_id: args.chain_id,
            domain_name: args.domain_name,
            domain_version: args.domain_version,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    sigdrop_utils::init_logging(cli.log_format, &cli.log_level);

    let output = match cli.command {
        Command::Keygen { json } => commands::keygen(json)?,
        Command::Address { key } => commands::address(&key.into())?,
        Command::Sign {
            key,
            claimant,
            amount,
            scheme,
            json,
        } => commands::sign(&key.into(), claimant, amount, &scheme.into(), json)?,
        Command::Recover {
            claimant,
            amount,
            signature,
            scheme,
        } => commands::recover(claimant, amount, &signature, &scheme.into())?,
        Command::CheckConfig { config, engine } => commands::check_config(&config, engine)?,
    };
    println!("{output}");
    Ok(())
}
