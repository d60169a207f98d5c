//! Shapeprint CLI - fingerprint and regenerate schema descriptor trees.

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{compare, digest, fingerprint, kinds, regenerate};

#[derive(Parser)]
#[command(name = "shapeprint")]
#[command(about = "Structural fingerprints for schema descriptor trees")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical fingerprint of a descriptor
    Fingerprint {
        /// Input descriptor JSON file (or stdin if not provided)
        input: Option<String>,
        /// Ambient scope name applied to the whole tree
        #[arg(long)]
        scope: Option<String>,
        /// Reject trees nested deeper than N (default 256)
        #[arg(long)]
        max_depth: Option<usize>,
        /// Fingerprint grammar profile
        #[arg(long)]
        profile: Option<String>,
        /// Output fingerprint, digest and hygiene report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the constructor expression for a descriptor
    Regenerate {
        /// Input descriptor JSON file (or stdin if not provided)
        input: Option<String>,
        /// Reject trees nested deeper than N (default 256)
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Print the digest of a descriptor's fingerprint
    Digest {
        /// Input descriptor JSON file (or stdin if not provided)
        input: Option<String>,
        /// Ambient scope name applied to the whole tree
        #[arg(long)]
        scope: Option<String>,
        /// Fingerprint grammar profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// Compare two descriptors for structural equivalence
    Compare {
        /// First descriptor JSON file
        left: String,
        /// Second descriptor JSON file
        right: String,
        /// Exit with error code if the shapes differ
        #[arg(long)]
        strict: bool,
        /// Output both fingerprints as JSON
        #[arg(long)]
        json: bool,
    },
    /// List descriptor kinds and which operations support them
    Kinds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Fingerprint {
            input,
            scope,
            max_depth,
            profile,
            json,
        } => fingerprint::run(input, scope, max_depth, profile, json),
        Commands::Regenerate { input, max_depth } => regenerate::run(input, max_depth),
        Commands::Digest {
            input,
            scope,
            profile,
        } => digest::run(input, scope, profile),
        Commands::Compare {
            left,
            right,
            strict,
            json,
        } => compare::run(left, right, strict, json),
        Commands::Kinds { json } => kinds::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
