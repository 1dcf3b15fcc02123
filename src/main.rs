use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use product_extractor::candidate::CleanupMode;
use product_extractor::extractor::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use product_extractor::{Config, GeminiClient, PageFetcher, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "product_extractor")]
#[command(about = "Extract structured product data from an e-commerce product page")]
struct Cli {
    /// Product page URL.
    url: String,

    /// Hosted model identifier.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature for the model.
    #[arg(long, env = "GEMINI_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Strip noise words, whitespace runs and stop-words from the script
    /// text before sending it.
    #[arg(long)]
    clean: bool,

    /// Directory that receives the output files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write `<slug>.cleaned.html` with scripts, styles and page chrome
    /// removed.
    #[arg(long)]
    dump_cleaned_html: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("refusing to run without configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let fetcher = PageFetcher::new(config.fetch_timeout_secs)?;
    let gemini = GeminiClient::with_base_url(
        &config.api_key,
        config.model_timeout_secs,
        &config.model_base_url,
    )?;

    let options = RunOptions {
        model: cli.model,
        temperature: cli.temperature,
        cleanup: if cli.clean {
            CleanupMode::Clean
        } else {
            CleanupMode::Raw
        },
        out_dir: cli.out_dir,
        dump_cleaned_html: cli.dump_cleaned_html,
    };

    let report = product_extractor::run(&cli.url, &fetcher, &gemini, &options)
        .with_context(|| format!("extraction failed for {}", cli.url))?;

    println!(
        "Product data saved to {} ({} scripts scanned).",
        report.paths.json.display(),
        report.script_count
    );
    Ok(())
}
