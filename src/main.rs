//! bmpfilter CLI: apply one filter to a bitmap and save the result.

use std::path::PathBuf;
use std::process::ExitCode;

use bmpfilter::{pipeline, Operation, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

#[derive(Parser)]
#[command(name = "bmpfilter")]
#[command(about = "Filter uncompressed 8-bit or 24-bit BMP images")]
#[command(version)]
struct Cli {
    /// Path to write the 8-bit grayscale result.
    #[arg(short, long, global = true, default_value = "output.bmp")]
    output: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Binarize the image at a threshold (0-255).
    Binarize {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        threshold: i64,
    },

    /// Smooth with a Gaussian filter. Colour input is blurred before reduction.
    Smooth {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        sigma: f64,
    },

    /// Detect edges with the Sobel operator.
    Edge { input: PathBuf },

    /// Apply the Laplacian filter.
    Laplacian { input: PathBuf },

    /// Apply a Laplacian of Gaussian filter.
    Log {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        sigma: f64,
    },
}

impl Commands {
    fn into_operation(self) -> Result<(PathBuf, Operation)> {
        Ok(match self {
            Commands::Binarize { input, threshold } => (input, Operation::binarize(threshold)?),
            Commands::Smooth { input, sigma } => (input, Operation::smooth(sigma)?),
            Commands::Edge { input } => (input, Operation::Edge),
            Commands::Laplacian { input } => (input, Operation::Laplacian),
            Commands::Log { input, sigma } => (input, Operation::log(sigma)?),
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit with 1; --help and --version are not errors.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let (input, op) = cli.command.into_operation()?;
    info!("Running {} on {}", op.kind(), input.display());

    pipeline::process_file(&op, &input, &cli.output)?;
    info!("Processing complete. Image saved as {}", cli.output.display());
    Ok(())
}
