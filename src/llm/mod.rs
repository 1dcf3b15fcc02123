//! Hosted text generation.

mod gemini;

pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL_TIMEOUT_SECS, GeminiClient};

use crate::error::ExtractError;
use crate::models::Generation;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub system_instruction: &'a str,
    pub prompt: &'a str,
}

/// A hosted model that turns a prompt into free text.
pub trait TextGenerator {
    /// # Errors
    ///
    /// Implementations return an [`ExtractError`] when the model cannot be
    /// reached or its response cannot be read.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Generation, ExtractError>;
}
