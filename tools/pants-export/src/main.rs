//! pants-export - data builder for the pants editor
//!
//! # Commands
//!
//! - `pants-export build` - Build data/ into data.h + data.cpp (main command)
//! - `pants-export check` - Verify data.h + data.cpp match the current data/
//! - `pants-export image` - Decode one .tga and show its table entry
//! - `pants-export segment` - Segment one .wav and show the sample table
//!
//! # Manifest (pants.toml, optional)
//!
//! ```toml
//! [build]
//! data_dir = "data"
//!
//! [samples]
//! silence_threshold = 26
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

use pants_export::{build, inspect};

#[derive(Parser)]
#[command(name = "pants-export")]
#[command(about = "Data builder for the pants editor")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build data.h and data.cpp from the data directory
    Build(build::BuildArgs),

    /// Check that data.h and data.cpp are in sync with the data directory
    Check(build::BuildArgs),

    /// Decode a single image
    Image(inspect::ImageArgs),

    /// Segment a single recording
    Segment(inspect::SegmentArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Build(args) => {
            build::execute(&args)?;
            tracing::info!("Build complete!");
        }
        Commands::Check(args) => {
            if !build::check(&args)? {
                anyhow::bail!("Generated data is out of date. Run 'pants-export build' to regenerate.");
            }
            tracing::info!("All generated files are in sync!");
        }
        Commands::Image(args) => inspect::image(&args)?,
        Commands::Segment(args) => {
            inspect::segment(&args)?;
        }
    }

    Ok(())
}
