//! wav-edit CLI
//!
//! Shows WAVE header information, dumps file bytes as hex and applies trim, fade and reverb
//! edits to WAVE files.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wav_edit::{
    fade, format_hex_columns, hex::DEFAULT_COLUMNS, hex::DEFAULT_MAX_COUNT, io::path_exists,
    read_file_prefix, read_whole_file, reverb, trim, write_file, FadeOptions, ReverbOptions,
    TrimOptions, WavHeader,
};

#[derive(Parser)]
#[command(name = "wav-edit")]
#[command(about = "Inspect and edit WAVE files in place", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Replace existing output files without asking
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header information of a WAVE file
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Print the first bytes of a file as hex numbers
    Hex {
        /// Input file path
        input: PathBuf,

        /// Maximum number of bytes to print
        #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_COUNT)]
        count: usize,
    },

    /// Keep only the data between a start and an end point
    Trim {
        /// Input file path
        input: PathBuf,

        /// Start of the kept fragment in milliseconds
        #[arg(short, long, default_value_t = 0)]
        start: u32,

        /// End of the kept fragment in milliseconds (end of data by default)
        #[arg(short, long)]
        end: Option<u32>,

        /// Output file path (same file by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fade the volume out linearly from a start point to an end point
    Fade {
        /// Input file path
        input: PathBuf,

        /// Start of the effect in milliseconds
        #[arg(short, long, default_value_t = 0)]
        start: u32,

        /// End of the effect in milliseconds (end of data by default)
        #[arg(short, long)]
        end: Option<u32>,

        /// Volume level at the end point, from 0 to 1
        #[arg(short = 'l', long, default_value_t = 0.0)]
        level: f64,

        /// Output file path (same file by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add an echo with the given delay and decay coefficient
    Reverb {
        /// Input file path
        input: PathBuf,

        /// Echo delay in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        delay: u32,

        /// Decay coefficient, from 0 to 1
        #[arg(short = 'k', long, default_value_t = 0.1)]
        decay: f64,

        /// Output file path (same file by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let assume_yes = cli.yes;
    match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Hex { input, count } => cmd_hex(&input, count),
        Commands::Trim {
            input,
            start,
            end,
            output,
        } => {
            let options = TrimOptions::new(start, end);
            cmd_effect(&input, output.as_deref(), assume_yes, |bytes| {
                let summary = trim(bytes, &options)?;
                info!("Trim: {}", summary);
                Ok(())
            })
        }
        Commands::Fade {
            input,
            start,
            end,
            level,
            output,
        } => {
            let options = FadeOptions::new(start, end, level);
            cmd_effect(&input, output.as_deref(), assume_yes, |bytes| {
                let summary = fade(bytes, &options)?;
                info!("Fade: {}", summary);
                Ok(())
            })
        }
        Commands::Reverb {
            input,
            delay,
            decay,
            output,
        } => {
            let options = ReverbOptions::new(delay, decay);
            cmd_effect(&input, output.as_deref(), assume_yes, |bytes| {
                let summary = reverb(bytes, &options)?;
                info!("Reverb: {}", summary);
                Ok(())
            })
        }
    }
}

fn cmd_info(input: &Path) -> anyhow::Result<()> {
    info!("Getting info for: {}", input.display());
    let header = WavHeader::from_path(input)
        .with_context(|| format!("{} is not a correct WAV file", input.display()))?;
    println!("{}", header);
    Ok(())
}

fn cmd_hex(input: &Path, count: usize) -> anyhow::Result<()> {
    let bytes = read_file_prefix(input, count)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), input.display());
    print!("{}", format_hex_columns(&bytes, DEFAULT_COLUMNS, count));
    Ok(())
}

/// Reads `input`, applies `effect` to the whole file buffer and writes the result to `output`
/// (or back to `input`), asking before replacing an existing file.
fn cmd_effect<F>(
    input: &Path,
    output: Option<&Path>,
    assume_yes: bool,
    effect: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&mut Vec<u8>) -> wav_edit::WavEditResult<()>,
{
    let output = output.unwrap_or(input);
    let mut bytes =
        read_whole_file(input).with_context(|| format!("Failed to read {}", input.display()))?;
    info!("Editing {} -> {}", input.display(), output.display());

    effect(&mut bytes).with_context(|| format!("Failed to edit {}", input.display()))?;

    if !assume_yes && !confirm_replace(output)? {
        info!("Kept existing {}", output.display());
        return Ok(());
    }
    write_file(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "WAVE file successfully edited and written to {}",
        output.display()
    );
    Ok(())
}

/// Returns false only when `path` exists and the user answers `n`.
fn confirm_replace(path: &Path) -> anyhow::Result<bool> {
    if !path_exists(path) {
        return Ok(true);
    }
    print!(
        "File {} already exists. Would you like to replace it (y/n)?: ",
        path.display()
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(!is_declined(&answer))
}

fn is_declined(answer: &str) -> bool {
    matches!(answer.trim_end_matches(['\r', '\n']), "n" | "N")
}
