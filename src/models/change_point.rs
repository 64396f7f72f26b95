use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Precomputed structural-break result.
///
/// The document is kept exactly as it was loaded and handed to clients
/// unchanged; nothing in this service computes or validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangePointResult(Value);

impl ChangePointResult {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Stand-in used when no precomputed result is available.
    pub fn placeholder() -> Self {
        Self(json!({
            "change_point": {
                "index": 5000,
                "date": "2014-06-15",
                "description": "Oil price crash structural break"
            },
            "impact": {
                "price_before": 105.32,
                "price_after": 48.76,
                "price_change_pct": -53.7
            }
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
