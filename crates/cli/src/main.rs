use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use urx_corelib as core;
use urx_corelib::{DigestSource, ExtractorKind, HarnessConfig, RangeSampler, Width};

#[derive(Parser)]
#[command(name = "urx", version, about = "Unbiased range extraction toolkit")]
struct Cli {
    /// Log sweep details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct VerifyArgs {
    /// Harness config (JSON); flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// First bit-width to sweep
    #[arg(long)]
    min_bits: Option<u32>,
    /// Exclusive upper bit-width
    #[arg(long)]
    max_bits: Option<u32>,
    /// Smallest product N1*N2*N3*N4 enumerated
    #[arg(long)]
    min_product: Option<u64>,
    /// Print the sweep report as JSON after the progress lines
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Exhaustively verify both extractors
    Verify(VerifyArgs),
    /// Extract one value from an entropy word
    Extract {
        #[arg(long)]
        bits: u32,
        #[arg(short)]
        n: u64,
        #[arg(short)]
        x: u64,
        /// Use the bias-corrected extractor
        #[arg(long)]
        corrected: bool,
    },
    /// Map a key to a shard
    Shard {
        #[arg(long, default_value = "blake3")]
        hash: String,
        #[arg(long, default_value = "urx.shard")]
        label: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        shards: u64,
    },
    /// Deterministically shuffle items from a seed
    Shuffle {
        #[arg(long, default_value = "blake3")]
        hash: String,
        #[arg(long)]
        seed: String,
        items: Vec<String>,
    },
    /// List supported hashes
    HashLs,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn harness_config(args: &VerifyArgs) -> Result<HarnessConfig> {
    let mut cfg = match &args.config {
        Some(path) => HarnessConfig::from_json_file(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(b) = args.min_bits {
        cfg.min_bits = b;
    }
    if let Some(b) = args.max_bits {
        cfg.max_bits = b;
    }
    if let Some(p) = args.min_product {
        cfg.min_product = p;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn verify(args: &VerifyArgs) -> Result<()> {
    let cfg = harness_config(args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = core::run(&cfg, &mut out)?;
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("writing sweep report")?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Some(Commands::Verify(args)) => verify(&args)?,
        Some(Commands::Extract {
            bits,
            n,
            x,
            corrected,
        }) => {
            let kind = if corrected {
                ExtractorKind::Corrected
            } else {
                ExtractorKind::Simple
            };
            let e = Width::new(bits)?.extract(kind, x, n)?;
            println!("{} {}", e.output, e.leftover);
        }
        Some(Commands::Shard {
            hash,
            label,
            key,
            shards,
        }) => {
            println!("{}", core::shard_of(&hash, &label, key.as_bytes(), shards)?);
        }
        Some(Commands::Shuffle { hash, seed, mut items }) => {
            let width = Width::new(64)?;
            let source = DigestSource::new(&hash, "urx.shuffle", seed.as_bytes(), width)?;
            RangeSampler::new(source).shuffle(&mut items)?;
            println!("{}", items.join(" "));
        }
        Some(Commands::HashLs) => {
            for h in core::list_hashes() {
                println!("{}  digest={} bits", h.id, h.digest_bits);
            }
        }
        None => verify(&VerifyArgs::default())?,
    }
    Ok(())
}
