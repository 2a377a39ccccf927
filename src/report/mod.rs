use serde::Serialize;

use crate::verdict::{ConfidenceBand, InferenceResult, Verdict};

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub verdict: Verdict,
    pub confidence_band: ConfidenceBand,
    pub authentic_probability: f64,
    pub confidence_percent: u8,
}

impl From<&InferenceResult> for JsonReport {
    fn from(result: &InferenceResult) -> Self {
        Self {
            verdict: result.verdict(),
            confidence_band: result.confidence_band(),
            authentic_probability: result.raw_probability(),
            confidence_percent: result.confidence_percent(),
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
