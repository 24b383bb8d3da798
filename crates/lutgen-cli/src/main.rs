//! lutgen - extract a 3D color LUT from a reference image
//!
//! Generates `.cube` files, grades images through them and inspects them.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use lutgen_core::Resolution;
use lutgen_lut::cube;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lutgen")]
#[command(author, version, about = "Extract a 3D color LUT from a reference image")]
#[command(long_about = "
Samples the colors of a reference image into a 3D lookup table, smooths it,
and writes it as an Adobe/Resolve .cube file.

Examples:
  lutgen generate ref.jpg                       # myLUT_17x17x17.cube
  lutgen generate ref.jpg -r 33 -o warm.cube
  lutgen generate ref.png --preview shot.jpg --preview-out graded.png -s 0.6
  lutgen apply shot.jpg -l warm.cube -o graded.png -s 0.8
  lutgen info warm.cube --json
  lutgen --settings look.json generate ref.png  # {\"resolution\":\"64x64x64\",\"strength\":0.5}
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// JSON settings file with default resolution and strength
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a LUT from a reference image and export it as .cube
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Grade an image through a .cube LUT
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show size and value ranges of .cube files
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Reference image (PNG or JPEG)
    reference: PathBuf,

    /// Lattice resolution: 17x17x17, 33x33x33, 64x64x64 (or 17, 33, 64)
    #[arg(short, long)]
    resolution: Option<Resolution>,

    /// Output .cube file [default: <prefix>_<resolution>.cube]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name prefix used when --output is not given
    #[arg(long, default_value = cube::DEFAULT_PREFIX)]
    prefix: String,

    /// Image to grade through the new LUT
    #[arg(long, requires = "preview_out")]
    preview: Option<PathBuf>,

    /// Where to write the graded preview
    #[arg(long, requires = "preview")]
    preview_out: Option<PathBuf>,

    /// Preview strength, 0 (original) to 1 (full LUT)
    #[arg(short, long)]
    strength: Option<f32>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image
    input: PathBuf,

    /// LUT file (.cube)
    #[arg(short, long)]
    lut: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(short, long)]
    output: PathBuf,

    /// Strength, 0 (original) to 1 (full LUT)
    #[arg(short, long)]
    strength: Option<f32>,
}

#[derive(Args)]
struct InfoArgs {
    /// LUT file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let settings = commands::load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, settings, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, settings, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}

/// Installs the stderr logger and, with `--log`, a non-blocking file logger.
///
/// `RUST_LOG` overrides the level picked from `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lutgen={level}").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
