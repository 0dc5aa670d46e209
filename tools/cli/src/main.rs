//! hyde CLI - password-based file encryption.
//!
//! Thin wrapper around `hyde-crypto`: reads the input file, obtains a
//! password, runs the codec and writes the result.

mod output;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hyde_common::Password;
use hyde_crypto::{CodecParams, Envelope, EnvelopeCodec, SALT_SIZE};

use crate::output::{default_opened_output, ensure_distinct, sealed_name};

#[derive(Parser)]
#[command(name = "hyde")]
#[command(about = "hyde - Password-based file encryption")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file with AES-256-GCM.
    Encrypt {
        /// File to encrypt.
        input: PathBuf,

        /// Password (prompted for if omitted).
        #[arg(short, long, env = "HYDE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Output path (default: <input name>.enc in the current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the original file after encryption.
        #[arg(long)]
        delete: bool,
    },

    /// Decrypt a file produced by `hyde encrypt`.
    Decrypt {
        /// File to decrypt.
        input: PathBuf,

        /// Password (prompted for if omitted).
        #[arg(short, long, env = "HYDE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Output path (default: input name without .enc in the current directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the encrypted file after decryption.
        #[arg(long)]
        delete: bool,

        /// Use the work factor of earlier releases (4096 iterations).
        #[arg(long)]
        legacy: bool,
    },

    /// Show the public header of an encrypted file.
    Inspect {
        /// Encrypted file.
        input: PathBuf,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Public envelope fields, as reported by `inspect`.
#[derive(Debug, Serialize)]
struct HeaderInfo {
    salt: String,
    nonce: String,
    envelope_len: usize,
    ciphertext_len: usize,
    plaintext_len: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Encrypt {
            input,
            password,
            output,
            delete,
        } => {
            let output = match output {
                Some(path) => path,
                None => sealed_name(&input)?,
            };
            let password = resolve_password(password, true)?;
            cmd_encrypt(CodecParams::default(), &input, &output, password, delete).await
        }

        Commands::Decrypt {
            input,
            password,
            output,
            delete,
            legacy,
        } => {
            let output = match output {
                Some(path) => path,
                None => default_opened_output(&input)?,
            };
            let params = if legacy {
                CodecParams::legacy()
            } else {
                CodecParams::default()
            };
            let password = resolve_password(password, false)?;
            cmd_decrypt(params, &input, &output, password, delete).await
        }

        Commands::Inspect { input, json } => cmd_inspect(&input, json).await,

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "hyde", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Use the flag/env value if present, otherwise prompt securely.
fn resolve_password(given: Option<String>, confirm: bool) -> Result<Password> {
    if let Some(password) = given {
        return Ok(Password::from(password));
    }

    let password = prompt_password("Enter password: ")?;
    if confirm {
        let again = prompt_password("Confirm password: ")?;
        if password != again {
            bail!("Passwords do not match");
        }
    }
    if password.is_empty() {
        warn!("Empty password; the output is only weakly protected");
    }
    Ok(password)
}

/// Prompt for password securely.
fn prompt_password(prompt: &str) -> Result<Password> {
    let password = rpassword::prompt_password(prompt).context("Failed to read password")?;
    Ok(Password::from(password))
}

/// Encrypt `input` into `output`.
async fn cmd_encrypt(
    params: CodecParams,
    input: &Path,
    output: &Path,
    password: Password,
    delete: bool,
) -> Result<()> {
    ensure_distinct(input, output)?;
    info!("Encrypting {} to {}", input.display(), output.display());

    let plaintext = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    debug!(path = %input.display(), size = plaintext.len(), "Read plaintext");

    let codec = EnvelopeCodec::new(params);
    let envelope = tokio::task::spawn_blocking(move || codec.encrypt(&plaintext, password.as_str()))
        .await
        .context("Encryption task failed")?
        .context("Failed to encrypt")?;

    tokio::fs::write(output, &envelope)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), size = envelope.len(), "File encrypted");

    if delete {
        remove_input(input).await;
    }

    Ok(())
}

/// Decrypt `input` into `output`.
async fn cmd_decrypt(
    params: CodecParams,
    input: &Path,
    output: &Path,
    password: Password,
    delete: bool,
) -> Result<()> {
    ensure_distinct(input, output)?;
    info!("Decrypting {} to {}", input.display(), output.display());

    let envelope = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    debug!(path = %input.display(), size = envelope.len(), "Read envelope");

    let codec = EnvelopeCodec::new(params);
    let plaintext = tokio::task::spawn_blocking(move || codec.decrypt(&envelope, password.as_str()))
        .await
        .context("Decryption task failed")?
        .with_context(|| format!("Failed to decrypt {}", input.display()))?;

    tokio::fs::write(output, &plaintext)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), size = plaintext.len(), "File decrypted");

    if delete {
        remove_input(input).await;
    }

    Ok(())
}

/// Print the public header of an envelope. No password is needed.
async fn cmd_inspect(input: &Path, json: bool) -> Result<()> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let info = header_info(&bytes)
        .with_context(|| format!("Failed to inspect {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Envelope: {}", input.display());
        println!("  Salt: {}", info.salt);
        println!("  Nonce: {}", info.nonce);
        println!("  Size: {} bytes", info.envelope_len);
        println!("  Ciphertext: {} bytes (tag included)", info.ciphertext_len);
        println!("  Plaintext: {} bytes", info.plaintext_len);
    }

    Ok(())
}

fn header_info(bytes: &[u8]) -> Result<HeaderInfo> {
    let envelope = Envelope::parse(bytes, SALT_SIZE)?;
    Ok(HeaderInfo {
        salt: STANDARD.encode(envelope.salt()),
        nonce: STANDARD.encode(envelope.nonce()),
        envelope_len: envelope.encoded_len(),
        ciphertext_len: envelope.ciphertext().len(),
        plaintext_len: envelope.plaintext_len(),
    })
}

/// Best effort; the output is already written.
async fn remove_input(input: &Path) {
    match tokio::fs::remove_file(input).await {
        Ok(()) => info!(path = %input.display(), "Removed original file"),
        Err(e) => warn!(path = %input.display(), "Error removing file: {}", e),
    }
}
