use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MISSING_PREDICTIONS_MESSAGE: &str = "Gateway response did not contain a predictions array";

/// Per-file outcome returned to the client.
///
/// Absent values serialize as explicit `null` so clients can tell an absent
/// field from a falsy one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    pub filename: Option<String>,
    pub disease: Option<String>,
    pub confidence: Option<f64>,
    pub probabilities: Option<BTreeMap<String, f64>>,
    pub error: Option<String>,
}

impl PredictionResult {
    pub fn failed(filename: Option<String>, message: impl Into<String>) -> Self {
        Self {
            filename,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn missing_predictions() -> Self {
        Self::failed(None, MISSING_PREDICTIONS_MESSAGE)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
