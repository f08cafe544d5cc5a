use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use meml_parse::{lexemes, parse_str_with, wrap, ParseOptions, DEFAULT_MAX_DEPTH};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Maximum source size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

/// Upper bound for `--max-depth`; deeper recursion risks the main thread's stack.
const MAX_DEPTH_LIMIT: u64 = 1024;

#[derive(Parser, Debug)]
#[command(name = "meml")]
#[command(about = "Parse meml configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a document and print the value tree
    Parse {
        /// Path to the source file (`-` reads stdin)
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Input already has its own enclosing `{ ... }`
        #[arg(long)]
        no_wrap: bool,

        /// Deepest allowed nesting of dicts and lists
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_DEPTH,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DEPTH_LIMIT)
        )]
        max_depth: usize,
    },

    /// Print the lexemes of a document, one per line
    Tokens {
        /// Path to the source file (`-` reads stdin)
        file: String,

        /// Input already has its own enclosing `{ ... }`
        #[arg(long)]
        no_wrap: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            format,
            no_wrap,
            max_depth,
        } => cmd_parse(&file, format, no_wrap, max_depth),

        Commands::Tokens { file, no_wrap } => cmd_tokens(&file, no_wrap),
    }
}

fn load_source(path: &str, no_wrap: bool) -> Result<String> {
    let limit = MAX_SOURCE_SIZE as u64 + 1;
    let mut bytes = Vec::new();
    if path == "-" {
        std::io::stdin()
            .take(limit)
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
    } else {
        std::fs::File::open(path)
            .and_then(|f| f.take(limit).read_to_end(&mut bytes))
            .with_context(|| format!("failed to read '{}'", path))?;
    }

    if bytes.len() > MAX_SOURCE_SIZE {
        bail!(
            "source exceeds {}MB limit (more than {} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            MAX_SOURCE_SIZE
        );
    }
    let src = String::from_utf8(bytes).with_context(|| format!("'{}' is not UTF-8", path))?;
    debug!(path, bytes = src.len(), no_wrap, "loaded source");

    Ok(if no_wrap { src } else { wrap(&src) })
}

fn cmd_parse(file: &str, format: Format, no_wrap: bool, max_depth: usize) -> Result<()> {
    let src = load_source(file, no_wrap)?;
    let opts = ParseOptions {
        max_depth,
        ..ParseOptions::default()
    };
    let dict =
        parse_str_with(&src, &opts).with_context(|| format!("failed to parse '{}'", file))?;

    match format {
        Format::Pretty => println!("{:#?}", dict),
        Format::Json => println!("{}", serde_json::to_string_pretty(&dict)?),
    }
    Ok(())
}

fn cmd_tokens(file: &str, no_wrap: bool) -> Result<()> {
    let src = load_source(file, no_wrap)?;
    for lexeme in lexemes(&src) {
        if lexeme == "\n" {
            println!("\\n");
        } else {
            println!("{}", lexeme);
        }
    }
    Ok(())
}
