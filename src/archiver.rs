use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExtractError;

pub const SCRIPT_DATA_FILE: &str = "script_data.txt";
pub const FAILED_JSON_FILE: &str = "failed_json_str.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub html: PathBuf,
    pub cleaned_html: PathBuf,
    pub script_data: PathBuf,
    pub json: PathBuf,
    pub failed_json: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: &Path, slug: &str) -> Self {
        Self {
            html: out_dir.join(format!("{slug}.html")),
            cleaned_html: out_dir.join(format!("{slug}.cleaned.html")),
            script_data: out_dir.join(SCRIPT_DATA_FILE),
            json: out_dir.join(format!("{slug}.json")),
            failed_json: out_dir.join(FAILED_JSON_FILE),
        }
    }
}

pub fn save_text(path: &Path, text: &str) -> Result<(), ExtractError> {
    write_bytes(path, text.as_bytes())
}

/// Writes `value` as pretty-printed JSON with a trailing newline.
pub fn save_to_file<T: Serialize>(value: &T, path: &Path) -> Result<(), ExtractError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_bytes(path, json.as_bytes())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExtractError> {
    let io_err = |source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    Ok(())
}
