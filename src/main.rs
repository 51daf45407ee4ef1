//! ALFA AEAD - CLI
//!
//! Seal/open hex-encoded messages and benchmark the registered algorithms.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use alfa_aead::{speed, AeadError, AeadResult, Algorithm, SpeedConfig, TAG_LEN};

#[derive(Parser)]
#[command(name = "alfa-aead")]
#[command(author = "Karen Tonoyan")]
#[command(version = alfa_aead::VERSION)]
#[command(about = "ALFA AEAD - ChaCha20-Poly1305 / AES-256-GCM seal & open")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported algorithms
    Algorithms,

    /// Encrypt a hex plaintext, print ciphertext||tag as hex
    Seal {
        #[arg(short, long, default_value = "aes-256-gcm")]
        algorithm: Algorithm,

        /// Key (hex)
        #[arg(short, long)]
        key: String,

        /// Nonce (hex)
        #[arg(short, long)]
        nonce: String,

        /// Associated data (hex)
        #[arg(long, default_value = "")]
        aad: String,

        /// Plaintext (hex)
        plaintext: String,
    },

    /// Decrypt a hex ciphertext with a separate tag, print plaintext as hex
    Open {
        #[arg(short, long, default_value = "aes-256-gcm")]
        algorithm: Algorithm,

        /// Key (hex)
        #[arg(short, long)]
        key: String,

        /// Nonce (hex)
        #[arg(short, long)]
        nonce: String,

        /// Associated data (hex)
        #[arg(long, default_value = "")]
        aad: String,

        /// Authentication tag (hex, 16 bytes)
        #[arg(short, long)]
        tag: String,

        /// Ciphertext without tag (hex)
        ciphertext: String,
    },

    /// Measure throughput of every algorithm
    Speed {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override block size in bytes
        #[arg(long)]
        block_size: Option<usize>,

        /// Override time per algorithm in milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AeadResult<()> {
    match cli.command {
        Commands::Algorithms => {
            println!("{:<20} {:>4} {:>6} {:>6} {:>4}", "ALGORITHM", "ID", "KEY", "NONCE", "TAG");
            for alg in Algorithm::ALL {
                println!(
                    "{:<20} {:>4} {:>6} {:>6} {:>4}",
                    alg.name(),
                    alg.id(),
                    alg.key_len(),
                    alg.nonce_len(),
                    alg.tag_len()
                );
            }
        }

        Commands::Seal { algorithm, key, nonce, aad, plaintext } => {
            let key = decode_exact(&key, algorithm.key_len(), "key")?;
            let nonce = decode_exact(&nonce, algorithm.nonce_len(), "nonce")?;
            let aad = hex::decode(aad)?;
            let plaintext = hex::decode(plaintext)?;

            let mut out = vec![0u8; plaintext.len() + TAG_LEN];
            let n = alfa_aead::seal(algorithm, &plaintext, &aad, &key, &nonce, &mut out);
            println!("{}", hex::encode(&out[..n]));
        }

        Commands::Open { algorithm, key, nonce, aad, tag, ciphertext } => {
            let key = decode_exact(&key, algorithm.key_len(), "key")?;
            let nonce = decode_exact(&nonce, algorithm.nonce_len(), "nonce")?;
            let tag = decode_exact(&tag, algorithm.tag_len(), "tag")?;
            let aad = hex::decode(aad)?;
            let ciphertext = hex::decode(ciphertext)?;

            let mut out = vec![0u8; ciphertext.len()];
            let n = alfa_aead::open(algorithm, &ciphertext, &aad, &tag, &key, &nonce, &mut out)?;
            println!("{}", hex::encode(&out[..n]));
        }

        Commands::Speed { config, block_size, duration_ms } => {
            let mut config = match config {
                Some(path) => SpeedConfig::load(&path)?,
                None => SpeedConfig::default(),
            };
            if let Some(block_size) = block_size {
                config.block_size = block_size;
            }
            if let Some(duration_ms) = duration_ms {
                config.duration_ms = duration_ms;
            }

            println!("ALFA AEAD {} - {} byte blocks", alfa_aead::VERSION, config.block_size);
            for result in speed::run(&config)? {
                let marker = if result.fastest { "\t(fastest)" } else { "" };
                println!("{:<20}\t{:8.2} MB/s{}", result.algorithm.name(), result.mb_per_sec, marker);
            }
        }
    }

    Ok(())
}

/// Decode hex and insist on an exact length, so typos get a message
/// instead of the library's abort.
fn decode_exact(input: &str, len: usize, what: &str) -> AeadResult<Vec<u8>> {
    let bytes = hex::decode(input)?;
    if bytes.len() != len {
        return Err(AeadError::InvalidInput(format!(
            "{} must be {} bytes, got {}",
            what,
            len,
            bytes.len()
        )));
    }
    Ok(bytes)
}
