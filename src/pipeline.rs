//! One extraction run: fetch, pick the data-bearing script, ask the model,
//! write the result.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::archiver::{self, OutputPaths};
use crate::candidate::{self, CleanupMode};
use crate::error::ExtractError;
use crate::extractor::ProductExtractor;
use crate::fetcher::PageFetcher;
use crate::llm::TextGenerator;
use crate::models::ExtractedProduct;
use crate::naming::output_slug;
use crate::parser;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub model: String,
    pub temperature: f32,
    pub cleanup: CleanupMode,
    pub out_dir: PathBuf,
    /// Also write the page with scripts and chrome stripped, for manual
    /// inspection.
    pub dump_cleaned_html: bool,
}

#[derive(Debug)]
pub struct RunReport {
    pub slug: String,
    pub paths: OutputPaths,
    pub script_count: usize,
    pub product: ExtractedProduct,
}

/// Runs every stage for `url` and writes the artifacts under
/// `options.out_dir`.
///
/// # Errors
///
/// - [`ExtractError::Fetch`] if the page cannot be fetched.
/// - [`ExtractError::NoScripts`] if the page has no `<script>` elements.
/// - [`ExtractError::NoJsonFound`] if the model reply holds no JSON.
/// - [`ExtractError::EmptyProduct`] if the reply does not parse or parses to
///   an empty object.
/// - Generator and I/O errors as they occur.
pub fn run(
    url: &str,
    fetcher: &PageFetcher,
    generator: &dyn TextGenerator,
    options: &RunOptions,
) -> Result<RunReport, ExtractError> {
    let slug = output_slug(url);
    let paths = OutputPaths::new(&options.out_dir, &slug);
    info!(url, slug = %slug, "fetching page");

    let html = fetcher.fetch_html(url)?;
    archiver::save_text(&paths.html, &html)?;
    info!(bytes = html.len(), path = %paths.html.display(), "saved page source");

    if options.dump_cleaned_html {
        let cleaned = parser::strip_noise(&html);
        archiver::save_text(&paths.cleaned_html, &cleaned)?;
        debug!(bytes = cleaned.len(), "saved cleaned html");
    }

    let scripts = parser::extract_scripts(&html);
    info!(count = scripts.len(), "found <script> tags");

    let candidate = candidate::select_candidate(&scripts).ok_or(ExtractError::NoScripts)?;
    let text = options.cleanup.apply(candidate);
    archiver::save_text(&paths.script_data, &text)?;
    info!(
        chars = candidate.chars().count(),
        cleaned_chars = text.chars().count(),
        cleanup = ?options.cleanup,
        "selected candidate script"
    );

    let extractor = ProductExtractor::new(
        generator,
        &options.model,
        options.temperature,
        &paths.failed_json,
    );
    let product = extractor
        .extract_product(&text)?
        .filter(|p| !p.is_empty())
        .ok_or(ExtractError::EmptyProduct)?;

    match product.variant_count() {
        Some(n) => info!(variants = n, "extracted variants"),
        None => warn!("product has no variants array"),
    }

    archiver::save_to_file(&product, &paths.json)?;
    info!(path = %paths.json.display(), name = product.name(), "saved product data");

    Ok(RunReport {
        slug,
        paths,
        script_count: scripts.len(),
        product,
    })
}
