use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use eyre::{eyre, WrapErr};
use passkey39_core::{derive_key, Passkey39Config, PrivateKey};
use tracing::{debug, info};

#[derive(Subcommand)]
pub enum Command {
    /// Print the deterministic challenge for a user
    Challenge {
        /// Username the challenge is bound to
        #[arg(short, long)]
        username: String,

        #[command(flatten)]
        relying_party: RelyingPartyArgs,
    },
    /// Derive the private key from an authenticator signature
    Derive {
        /// Username the signature was produced for
        #[arg(short, long)]
        username: String,

        /// Raw authenticator signature, hex-encoded
        #[arg(short, long)]
        signature: String,

        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = OutputFormat::All)]
        format: OutputFormat,

        #[command(flatten)]
        relying_party: RelyingPartyArgs,
    },
    /// Recover the hex key from a 24-word mnemonic backup
    Recover {
        /// The mnemonic phrase, space separated
        #[arg(short, long)]
        mnemonic: String,
    },
    /// Print the mnemonic backup of a hex key
    Mnemonic {
        /// The 64-character hex key
        #[arg(long)]
        hex: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Lowercase hex
    Hex,
    /// BIP-39 English mnemonic
    Mnemonic,
    /// JSON object with both encodings
    All,
}

/// Relying party settings, read from a JSON config file and/or flags.
///
/// Flags and environment variables override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct RelyingPartyArgs {
    /// Path to a JSON `Passkey39Config`
    #[arg(long, env = "PASSKEY39_CONFIG")]
    config: Option<PathBuf>,

    /// Relying party name (HKDF info label)
    #[arg(long, env = "PASSKEY39_RP_NAME")]
    rp_name: Option<String>,

    /// Origin the challenge is bound to
    #[arg(long, env = "PASSKEY39_ORIGIN")]
    origin: Option<String>,

    /// Custom base challenge
    #[arg(long, env = "PASSKEY39_CHALLENGE")]
    base_challenge: Option<String>,
}

impl RelyingPartyArgs {
    fn resolve(self) -> eyre::Result<Passkey39Config> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("reading config {}", path.display()))?;
                let config = Passkey39Config::from_json(&json)?;
                debug!(path = %path.display(), rp_name = %config.rp_name, "loaded config");
                Some(config)
            }
            None => None,
        };

        if let Some(rp_name) = self.rp_name {
            config = Some(match config {
                Some(mut config) => {
                    config.rp_name = rp_name;
                    config
                }
                None => Passkey39Config::new(rp_name, self.origin.clone().unwrap_or_default()),
            });
        }

        let mut config =
            config.ok_or_else(|| eyre!("--rp-name or --config is required"))?;
        if let Some(origin) = self.origin {
            config.origin = origin;
        }
        if let Some(base) = self.base_challenge {
            config.challenge = Some(base);
        }
        if config.origin.is_empty() {
            return Err(eyre!("--origin or a config with an origin is required"));
        }

        Ok(config)
    }
}

pub fn run(command: Command) -> eyre::Result<String> {
    match command {
        Command::Challenge {
            username,
            relying_party,
        } => {
            let config = relying_party.resolve()?;
            Ok(config.challenge_builder().build(&username))
        }
        Command::Derive {
            username,
            signature,
            format,
            relying_party,
        } => {
            let config = relying_party.resolve()?;
            let challenge = config.challenge_builder().build(&username);
            let signature = hex::decode(signature.trim().trim_start_matches("0x"))
                .wrap_err("signature must be hex-encoded")?;

            info!(rp_name = %config.rp_name, signature_len = signature.len(), "deriving key");
            let key = derive_key(&signature, &challenge, &config.rp_name)?;
            render(&key, format)
        }
        Command::Recover { mnemonic } => Ok(PrivateKey::from_mnemonic(&mnemonic)?.hex()),
        Command::Mnemonic { hex } => Ok(PrivateKey::from_hex(&hex)?.mnemonic()?),
    }
}

fn render(key: &PrivateKey, format: OutputFormat) -> eyre::Result<String> {
    Ok(match format {
        OutputFormat::Hex => key.hex(),
        OutputFormat::Mnemonic => key.mnemonic()?,
        OutputFormat::All => serde_json::json!({
            "hex": key.hex(),
            "mnemonic": key.mnemonic()?,
        })
        .to_string(),
    })
}
