//! zkApp Transcoder CLI
//!
//! `transcode` turns a lenient zkApp command file into a test-vector literal
//! (or JSON). `compare` checks a primitive witness dump against a reference.
//!
//! Exit codes: 0 success or match, 1 witness mismatch, 2 error.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zkapp_transcoder::{
    compare, decode_witness, fingerprint, parse_lenient, parse_reference, transcode_str,
    JsonRenderer, OptionalShape, Renderer, RustLiteralRenderer, SchemaVariant, TranscodeConfig,
    VERSION,
};

#[derive(Parser)]
#[command(name = "zkapp-transcoder", version, about = "zkApp command transcoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcode a lenient zkApp command document.
    Transcode {
        /// Input document.
        file: PathBuf,
        /// Test-vector name; `multiple_account_updates` implies the proper variant.
        #[arg(long)]
        name: Option<String>,
        /// Schema variant, overriding the one implied by the name.
        #[arg(long)]
        variant: Option<SchemaVariant>,
        /// Optional-value shape.
        #[arg(long)]
        optional_shape: Option<OptionalShape>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Rust)]
        format: Format,
        /// Print the record fingerprint to stderr.
        #[arg(long)]
        fingerprint: bool,
    },
    /// Compare a primitive witness dump against a reference sequence.
    Compare {
        /// Tagged-primitive witness text.
        witness: PathBuf,
        /// Reference list of `[value, width]` pairs.
        reference: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Rust,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {e}");
    }

    let cli = Cli::parse();
    info!("zkapp-transcoder v{}", VERSION);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Transcode {
            file,
            name,
            variant,
            optional_shape,
            format,
            fingerprint: print_fingerprint,
        } => {
            // --variant > ZKAPP_SCHEMA_VARIANT > variant implied by the name
            let mut config = TranscodeConfig::from_env_named(name)
                .context("invalid environment configuration")?;
            if let Some(variant) = variant {
                config.variant = variant;
            }
            if let Some(shape) = optional_shape {
                config.optional_shape = shape;
            }

            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let transcoded = transcode_str(&text, &config)
                .with_context(|| format!("failed to transcode {}", file.display()))?;
            if !transcoded.diagnostics.is_empty() {
                info!(count = transcoded.diagnostics.len(), "fallbacks taken");
            }

            let renderer: Box<dyn Renderer> = match format {
                Format::Rust => Box::new(RustLiteralRenderer),
                Format::Json => Box::new(JsonRenderer::default()),
            };
            println!("{}", renderer.render(&transcoded.record)?);

            if print_fingerprint {
                let digest = fingerprint(&transcoded.record).context("failed to fingerprint record")?;
                eprintln!("fingerprint: {digest}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare { witness, reference } => {
            let witness_text = fs::read_to_string(&witness)
                .with_context(|| format!("failed to read {}", witness.display()))?;
            let reference_text = fs::read_to_string(&reference)
                .with_context(|| format!("failed to read {}", reference.display()))?;

            let decoded = decode_witness(&witness_text).context("failed to decode witness")?;
            let tree = parse_lenient(&reference_text).context("failed to parse reference")?;
            let expected = parse_reference(&tree).context("invalid reference sequence")?;

            let report = compare(&decoded, &expected);
            println!("{report}");
            Ok(if report.is_match() { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
    }
}
