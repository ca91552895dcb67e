use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::PredictionResult;

const NO_PREDICTION_MESSAGE: &str = "no prediction returned for this file";

/// Maps the gateway's prediction array onto one result per expected file.
///
/// A response without a predictions array yields a single synthetic error
/// result, so the reply is never an empty list.
pub fn reshape_predictions(raw: &Value, expected: &[String]) -> Vec<PredictionResult> {
    let Some(entries) = locate_predictions(raw) else {
        tracing::warn!("Gateway response has no predictions array");
        return vec![PredictionResult::missing_predictions()];
    };

    if entries.len() > expected.len() {
        tracing::warn!(
            returned = entries.len(),
            expected = expected.len(),
            "Gateway returned more predictions than files; extra entries dropped"
        );
    }

    expected
        .iter()
        .enumerate()
        .map(|(index, name)| match entries.get(index) {
            Some(Value::Object(entry)) => map_entry(entry, name),
            Some(other) => PredictionResult::failed(
                Some(name.clone()),
                format!("malformed prediction entry: {}", other),
            ),
            None => PredictionResult::failed(Some(name.clone()), NO_PREDICTION_MESSAGE),
        })
        .collect()
}

fn locate_predictions(raw: &Value) -> Option<&Vec<Value>> {
    raw.pointer("/data/0/predictions")
        .or_else(|| raw.get("predictions"))
        .and_then(Value::as_array)
}

fn map_entry(entry: &Map<String, Value>, expected_name: &str) -> PredictionResult {
    let filename = entry
        .get("filename")
        .and_then(Value::as_str)
        .unwrap_or(expected_name)
        .to_string();

    let disease = ["disease", "result"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    let mut error = entry
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);

    let confidence = match entry.get("confidence").and_then(Value::as_f64) {
        Some(c) if (0.0..=1.0).contains(&c) => Some(c),
        Some(c) => {
            error.get_or_insert_with(|| format!("confidence {} outside [0, 1]", c));
            None
        }
        None => None,
    };

    let probabilities = entry
        .get("probabilities")
        .and_then(Value::as_object)
        .map(|probs| {
            probs
                .iter()
                .filter_map(|(label, p)| p.as_f64().map(|p| (label.clone(), p)))
                .collect::<BTreeMap<_, _>>()
        });

    PredictionResult {
        filename: Some(filename),
        disease,
        confidence,
        probabilities,
        error,
    }
}
