//! Model-backed product extraction and recovery of JSON from free-text
//! replies.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::archiver;
use crate::error::ExtractError;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::models::ExtractedProduct;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

const SYSTEM_INSTRUCTION: &str = r#"You are a product data extraction engine for e-commerce pages.
You receive the raw contents of a <script> tag taken from a product page. It usually holds JSON, JavaScript state or JSON-LD describing the product.

Extract the product into a single JSON object with these keys:
- "name": product name (string)
- "brand": brand name (string)
- "description": product description (string)
- "variants": array of variant objects, each with:
    - "size": size or volume (string or null)
    - "color": color or shade name (string or null)
    - "price": numeric price (number or null)
    - "currency": ISO 4217 currency code (string or null)
    - "sku": SKU or variant identifier (string or null)
    - "images": array of absolute image URLs (array of strings)
- "availability": whether the product is in stock (boolean)
- "rating": average rating (number or null)
- "reviews_count": number of reviews (integer or null)

Rules:
- Values must be plain text: decode HTML entities and remove HTML tags and markup.
- When the product has several variants (sizes, shades, colors), list every one of them in "variants".
- Use null for values that are not present. Do not invent data."#;

/// Extraction strategies tried in order on a model reply.
const STRATEGIES: &[(&str, fn(&str) -> Option<&str>)] = &[
    ("fenced_block", fenced_block),
    ("first_brace", first_brace),
];

/// Sends a candidate script to a [`TextGenerator`] and parses its reply.
pub struct ProductExtractor<'a> {
    generator: &'a dyn TextGenerator,
    model: String,
    temperature: f32,
    failure_dump: PathBuf,
}

impl<'a> ProductExtractor<'a> {
    /// `failure_dump` receives the raw JSON candidate whenever it does not
    /// parse.
    pub fn new(
        generator: &'a dyn TextGenerator,
        model: &str,
        temperature: f32,
        failure_dump: &Path,
    ) -> Self {
        Self {
            generator,
            model: model.to_owned(),
            temperature,
            failure_dump: failure_dump.to_path_buf(),
        }
    }

    /// Asks the model for product data found in `text`.
    ///
    /// Returns `Ok(None)` when the reply holds something JSON-like that is
    /// not a valid JSON object; the offending text is written to the
    /// failure dump first.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NoJsonFound`] if the reply has no JSON candidate at all.
    /// - Any error from the generator.
    /// - [`ExtractError::Io`] if the failure dump cannot be written.
    pub fn extract_product(&self, text: &str) -> Result<Option<ExtractedProduct>, ExtractError> {
        let prompt = build_prompt(text);
        let generation = self.generator.generate(&GenerationRequest {
            model: &self.model,
            temperature: self.temperature,
            system_instruction: SYSTEM_INSTRUCTION,
            prompt: &prompt,
        })?;

        let usage = generation.usage;
        info!(
            model = generation.model_version.as_deref().unwrap_or(&self.model),
            cached = usage.cached,
            candidates = usage.candidates,
            prompt = usage.prompt,
            total = usage.total,
            "token usage"
        );

        let json_str = locate_json(&generation.text)?;
        match parse_product(json_str) {
            Ok(product) => Ok(Some(product)),
            Err(e) => {
                warn!(error = %e, path = %self.failure_dump.display(), "model reply is not a JSON object; saving it");
                archiver::save_text(&self.failure_dump, json_str)?;
                Ok(None)
            }
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        "Extract the product information from the following script content.\n\n\
         Script content:\n{text}\n\n\
         Respond with only the JSON object, no explanations."
    )
}

/// Returns the first JSON candidate any strategy finds in `reply`.
///
/// # Errors
///
/// Returns [`ExtractError::NoJsonFound`] when no strategy matches.
pub fn locate_json(reply: &str) -> Result<&str, ExtractError> {
    for (name, strategy) in STRATEGIES {
        if let Some(found) = strategy(reply) {
            debug!(strategy = name, len = found.len(), "located JSON in reply");
            return Ok(found);
        }
    }
    Err(ExtractError::NoJsonFound)
}

/// Strict parse of a located JSON candidate into a product object.
///
/// # Errors
///
/// Returns the `serde_json` error when `json_str` is not valid JSON or not
/// an object.
pub fn parse_product(json_str: &str) -> Result<ExtractedProduct, serde_json::Error> {
    let value: Value = serde_json::from_str(json_str)?;
    serde_json::from_value(value)
}

/// Contents of the first fenced code block, with an optional language tag
/// such as `json` or `json-ld` skipped. An unterminated fence runs to the
/// end of the reply. Blocks without a `{` are not JSON candidates.
fn fenced_block(reply: &str) -> Option<&str> {
    const FENCE: &str = "```";

    let start = reply.find(FENCE)? + FENCE.len();
    let after = &reply[start..];
    let tag_len = after
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(after.len());
    let body = &after[tag_len..];
    let end = body.find(FENCE).unwrap_or(body.len());

    let inner = body[..end].trim();
    inner.contains('{').then_some(inner)
}

/// Everything from the first `{` to the end of the reply.
fn first_brace(reply: &str) -> Option<&str> {
    reply.find('{').map(|i| reply[i..].trim_end())
}
