//! CLI command implementations

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, Level};

use keyspace_client::{ClientConfig, KeyspaceClient};
use keyspace_core::types::to_hex_prefixed;
use keyspace_core::{ConfigData, Hash32, HexBytes, Key, SignatureScheme, SignerKey};

/// Keyspace CLI - key registry tools
#[derive(Parser)]
#[command(name = "keyspace")]
#[command(about = "Derive Keyspace config data and talk to a Keyspace registry")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry JSON-RPC URL (overrides config file and KEYSPACE_RPC_URL)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Path to a JSON client config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the initial config data for a private key
    Account {
        /// The current private key of the owner (hex, or JWK for webauthn)
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: String,

        /// The type of signature for the Keyspace key
        #[arg(long, default_value = "secp256k1")]
        signature_type: SignatureScheme,
    },

    /// Fetch the inclusion proof of a configuration
    Proof {
        #[arg(long)]
        key: Key,

        /// Hash of the verification key
        #[arg(long)]
        vk_hash: Hash32,

        /// Hash of the config data
        #[arg(long)]
        data_hash: Hash32,
    },

    /// Fetch a recovery proof rotating a key
    Recover {
        #[arg(long)]
        key: Key,

        #[arg(long)]
        new_key: Key,

        /// secp256k1 or webauthn
        #[arg(long)]
        circuit_type: String,

        /// Signature authorizing the rotation (hex)
        #[arg(long)]
        signature: HexBytes,
    },

    /// Apply a recovery proof
    Set {
        #[arg(long)]
        key: Key,

        #[arg(long)]
        new_key: Key,

        #[arg(long)]
        current_vk: HexBytes,

        #[arg(long)]
        current_data: HexBytes,

        #[arg(long)]
        proof: HexBytes,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl Cli {
    /// File config (or defaults), then environment, then `--rpc-url`
    pub fn client_config(&self) -> Result<ClientConfig> {
        let base = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        let mut config = base.with_env_overrides()?;
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        Ok(config)
    }
}

/// Run the CLI
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Account {
            private_key,
            signature_type,
        } => {
            let signer = SignerKey::parse(*signature_type, private_key)
                .context("Failed to parse private key")?;
            let config = ConfigData::for_signer(&signer)?;
            let owner = config.owners()[0];

            if cli.json {
                println!(
                    "{}",
                    json!({
                        "signatureType": signature_type,
                        "owner": owner,
                        "initialConfigData": config,
                    })
                );
            } else {
                println!("Signature type: {}", signature_type);
                println!("Owner x: {}", to_hex_prefixed(&owner.x()));
                println!("Owner y: {}", to_hex_prefixed(&owner.y()));
                println!("Initial config data: {}", config.to_hex());
            }
        }

        Commands::Proof {
            key,
            vk_hash,
            data_hash,
        } => {
            let client = connect(&cli)?;
            let proof = client.get_config_proof(key, vk_hash, data_hash).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&proof)?);
            } else {
                println!("Root: {}", proof.root);
                println!("Proof: {}", proof.proof);
            }
        }

        Commands::Recover {
            key,
            new_key,
            circuit_type,
            signature,
        } => {
            let client = connect(&cli)?;
            let proof = client
                .get_recover_proof(key, new_key, circuit_type, signature)
                .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&proof)?);
            } else {
                println!("Proof: {}", proof.proof);
                println!("Current VK: {}", proof.current_vk);
                println!("Current data: {}", proof.current_data);
            }
        }

        Commands::Set {
            key,
            new_key,
            current_vk,
            current_data,
            proof,
        } => {
            let client = connect(&cli)?;
            client
                .set_config(key, new_key, current_vk, current_data, proof)
                .await?;

            if cli.json {
                println!("{}", json!({ "key": key, "newKey": new_key, "applied": true }));
            } else {
                println!("Key {} now points to {}", key, new_key);
            }
        }
    }

    Ok(())
}

fn connect(cli: &Cli) -> Result<KeyspaceClient<keyspace_client::HttpTransport>> {
    let config = cli.client_config()?;
    debug!(rpc_url = %config.rpc_url, "Connecting to registry");
    KeyspaceClient::from_config(&config)
        .with_context(|| format!("Failed to create client for {}", config.rpc_url))
}
