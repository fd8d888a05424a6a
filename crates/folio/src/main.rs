//! Folio CLI: converts a directory of markdown documents into a static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use folio_static::{BuildConfig, SiteBuilder};

mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Convert a directory of markdown documents into a static site")]
#[command(version)]
struct Cli {
    /// Source directory (defaults to config or ".")
    source: Option<PathBuf>,

    /// Output directory (defaults to config or "build")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load(&cli.config)?;

    let build_config = BuildConfig {
        source_dir: cli
            .source
            .unwrap_or_else(|| PathBuf::from(&file_config.build.source)),
        output_dir: cli
            .output
            .unwrap_or_else(|| PathBuf::from(&file_config.build.output)),
        assets_dir: file_config.build.assets,
        stylesheet: file_config.build.stylesheet.map(PathBuf::from),
        site_title: file_config.site.title,
        description: file_config.site.description,
        theme_color: file_config.site.theme_color,
        portrait: file_config.site.portrait,
    };

    let report = SiteBuilder::new(build_config).build().await?;

    tracing::info!(
        "Built {} pages and {} assets in {}ms",
        report.pages,
        report.assets,
        report.duration_ms
    );
    tracing::info!("Output: {}", report.output_dir.display());

    Ok(())
}
