//! # SteganoCleats Command Line
//!
//! Hides messages in the green channel of lossless images and reads them back.
//!
//! ## Usage
//!
//! ```bash
//! stegano encode --input cleat.png --message "meet at the pitch" --output secret.png
//! stegano decode --input secret.png --save
//! stegano capacity --input cleat.png
//! stegano locker list
//! ```
//!
//! Decoded messages saved with `--save` go to the locker file named in the
//! configuration (`locker.json` by default).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use stegano_cleats::common::config::AppConfig;
use stegano_cleats::common::logging::init_logger;
use stegano_cleats::locker::Locker;
use stegano_cleats::processing::{capacity, decode_message_file, encode_message_file};

/// Command-line arguments for the stegano binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML format)
    ///
    /// Example: config/stegano.toml
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at DEBUG level regardless of the configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message inside an image
    Encode {
        /// Cover image
        #[arg(short, long)]
        input: PathBuf,

        /// Message to hide
        #[arg(short, long, conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file instead
        #[arg(long)]
        message_file: Option<PathBuf>,

        /// Where to write the result (defaults to `<input>_encoded.<format>`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Truncate the message instead of failing when the image is too small
        #[arg(long)]
        allow_truncate: bool,
    },

    /// Recover a hidden message
    Decode {
        #[arg(short, long)]
        input: PathBuf,

        /// Record the message in the locker
        #[arg(long)]
        save: bool,
    },

    /// Show how many characters an image can hold
    Capacity {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the message locker
    Locker {
        #[command(subcommand)]
        action: LockerAction,
    },
}

#[derive(Subcommand, Debug)]
enum LockerAction {
    /// List saved messages
    List,
    /// Remove all saved messages
    Clear,
}

fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}_encoded.{}", stem, extension))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_optional_file(cli.config.as_deref())?;
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logger(level);

    match cli.command {
        Command::Encode {
            input,
            message,
            message_file,
            output,
            allow_truncate,
        } => {
            let message = match (message, message_file) {
                (Some(message), _) => message,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("either --message or --message-file is required"),
            };
            let output =
                output.unwrap_or_else(|| default_output(&input, &config.encode.output_format));
            let strict = config.encode.strict_capacity && !allow_truncate;

            encode_message_file(&input, &message, &output, strict)?;
            println!("Message hidden in {}", output.display());
        }

        Command::Decode { input, save } => {
            let message = decode_message_file(&input)?;
            if message.is_empty() {
                println!("No hidden message found");
                return Ok(());
            }
            println!("Hidden message: {}", message);

            if save {
                let mut locker = Locker::load(&config.locker.path)?;
                locker.record(&message, &input.display().to_string());
                locker.save()?;
            }
        }

        Command::Capacity { input } => {
            let img = image::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let cap = capacity(&img);
            println!(
                "{}: {} bits, up to {} characters",
                input.display(),
                cap.available_bits,
                cap.max_message_chars
            );
        }

        Command::Locker { action } => {
            let mut locker = Locker::load(&config.locker.path)?;
            match action {
                LockerAction::List => {
                    if locker.is_empty() {
                        println!("Locker is empty");
                    }
                    for entry in locker.entries() {
                        println!(
                            "[{}] {}: {}",
                            entry.recorded_at.format("%Y-%m-%d %H:%M"),
                            entry.source,
                            entry.message
                        );
                    }
                }
                LockerAction::Clear => {
                    if locker.is_empty() {
                        warn!("Locker at {} is already empty", locker.path().display());
                    }
                    locker.clear();
                    locker.save()?;
                    info!("Locker cleared");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("cleats/nike.png"), "png"),
            PathBuf::from("cleats/nike_encoded.png")
        );
        assert_eq!(
            default_output(Path::new("boot.jpg"), "bmp"),
            PathBuf::from("boot_encoded.bmp")
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "stegano", "encode", "-i", "in.png", "-m", "hi", "--allow-truncate",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Encode { allow_truncate: true, .. }
        ));

        assert!(Cli::try_parse_from([
            "stegano", "encode", "-i", "in.png", "-m", "hi", "--message-file", "m.txt",
        ])
        .is_err());
    }
}
