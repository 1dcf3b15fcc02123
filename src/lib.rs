pub mod archiver;
pub mod candidate;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod llm;
pub mod models;
pub mod naming;
pub mod parser;
pub mod pipeline;

pub use config::Config;
pub use error::{ConfigError, ExtractError};
pub use fetcher::PageFetcher;
pub use llm::{GeminiClient, TextGenerator};
pub use models::ExtractedProduct;
pub use pipeline::{RunOptions, RunReport, run};
