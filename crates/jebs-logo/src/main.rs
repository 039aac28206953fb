//! # logo-trace
//!
//! ```text
//! logo-trace logo [SOURCE]   # assets/logo.png -> assets/logo-outline-white.svg
//! logo-trace text [SOURCE]   # assets/logo-text-only.png -> transparent PNG + outline SVG
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use jebs_logo::{trace_logo, trace_text, Tools};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "logo-trace", version, about = "Trace logo bitmaps into white outline SVGs")]
struct Cli {
    /// Directory holding the source bitmaps and receiving the outputs
    #[arg(long, global = true, default_value = "assets")]
    assets_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Awning + lettering outline from the full sign
    Logo {
        /// Defaults to <assets-dir>/logo.png
        source: Option<PathBuf>,
    },
    /// Lettering only, from the black-background text artwork
    Text {
        /// Defaults to <assets-dir>/logo-text-only.png
        source: Option<PathBuf>,
    },
}

/// A given SOURCE that does not exist falls back to the default asset.
fn resolve_source(assets_dir: &Path, given: Option<PathBuf>, default: &str) -> Result<PathBuf> {
    let fallback = assets_dir.join(default);
    let source = match given {
        Some(path) if path.is_file() => path,
        Some(path) => {
            warn!("{} not found, using {}", path.display(), fallback.display());
            fallback
        }
        None => fallback,
    };
    if !source.is_file() {
        bail!("Source not found: {}", source.display());
    }
    Ok(source)
}

fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_target(false))
        .init();

    let cli = Cli::parse();
    let tools = Tools::locate()?;

    match cli.command {
        Command::Logo { source } => {
            let source = resolve_source(&cli.assets_dir, source, "logo.png")?;
            info!("Tracing {}", source.display());
            let output = trace_logo(&tools, &source, &cli.assets_dir)?;
            info!("Created {}", output.display());
        }
        Command::Text { source } => {
            let source = resolve_source(&cli.assets_dir, source, "logo-text-only.png")?;
            info!("Tracing {}", source.display());
            let outputs = trace_text(&tools, &source, &cli.assets_dir)?;
            info!("Created {}", outputs.transparent_png.display());
            info!("Created {}", outputs.outline_svg.display());
        }
    }

    Ok(())
}
