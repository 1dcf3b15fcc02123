use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product fields as returned by the model.
///
/// The shape is advisory: name, brand, description, variants, availability,
/// rating and reviews_count are all optional and may carry any JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedProduct(pub Map<String, Value>);

impl ExtractedProduct {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Number of variants, only when `variants` is present and an array.
    pub fn variant_count(&self) -> Option<usize> {
        self.0.get("variants").and_then(Value::as_array).map(Vec::len)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Token counters reported by the hosted model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub cached: u64,
    pub candidates: u64,
    pub prompt: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub model_version: Option<String>,
    pub usage: TokenUsage,
}
