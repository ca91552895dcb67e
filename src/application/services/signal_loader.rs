use matfile::{Array, MatFile, NumericData};

use crate::domain::SignalMatrix;

/// Parses an uploaded signal file into a matrix of `channel_count` channels.
pub type SignalLoader = fn(&[u8], usize) -> Result<SignalMatrix, String>;

/// Picks the loader for a lowercase file extension.
pub fn loader_for(extension: &str) -> Option<SignalLoader> {
    match extension {
        "json" => Some(load_json_matrix),
        "dat" => Some(load_raw_i16),
        "mat" => Some(load_mat_matrix),
        _ => None,
    }
}

fn load_json_matrix(data: &[u8], channel_count: usize) -> Result<SignalMatrix, String> {
    let rows: Vec<Vec<f64>> = serde_json::from_slice(data).map_err(|e| e.to_string())?;
    SignalMatrix::from_rows(rows, channel_count).map_err(|e| e.to_string())
}

fn load_raw_i16(data: &[u8], channel_count: usize) -> Result<SignalMatrix, String> {
    SignalMatrix::from_interleaved_i16(data, channel_count).map_err(|e| e.to_string())
}

/// MAT v5 container. The first variable whose name does not start with
/// `__` is taken as the recording.
fn load_mat_matrix(data: &[u8], channel_count: usize) -> Result<SignalMatrix, String> {
    let mat = MatFile::parse(data).map_err(|_| "not a readable MAT v5 file".to_string())?;
    let array = mat
        .arrays()
        .iter()
        .find(|array| !array.name().starts_with("__"))
        .ok_or_else(|| "MAT file contains no data variable".to_string())?;

    let rows = mat_rows(array)?;
    SignalMatrix::from_rows(rows, channel_count).map_err(|e| e.to_string())
}

// MAT arrays are column-major.
fn mat_rows(array: &Array) -> Result<Vec<Vec<f64>>, String> {
    let (rows, columns) = match array.size().as_slice() {
        [rows, columns] => (*rows, *columns),
        dims => {
            return Err(format!(
                "variable '{}' has {} dimensions, expected 2",
                array.name(),
                dims.len()
            ));
        }
    };

    let values = real_values(array.data())
        .ok_or_else(|| format!("variable '{}' holds complex values", array.name()))?;
    if values.len() != rows * columns {
        return Err(format!(
            "variable '{}' holds {} values for a {}x{} matrix",
            array.name(),
            values.len(),
            rows,
            columns
        ));
    }

    Ok((0..rows)
        .map(|r| (0..columns).map(|c| values[c * rows + r]).collect())
        .collect())
}

fn real_values(data: &NumericData) -> Option<Vec<f64>> {
    let values = match data {
        NumericData::Double { real, imag: None } => real.clone(),
        NumericData::Single { real, imag: None } => widen(real),
        NumericData::Int8 { real, imag: None } => widen(real),
        NumericData::UInt8 { real, imag: None } => widen(real),
        NumericData::Int16 { real, imag: None } => widen(real),
        NumericData::UInt16 { real, imag: None } => widen(real),
        NumericData::Int32 { real, imag: None } => widen(real),
        NumericData::UInt32 { real, imag: None } => widen(real),
        NumericData::Int64 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt64 { real, imag: None } => real.iter().map(|&v| v as f64).collect(),
        _ => return None,
    };
    Some(values)
}

fn widen<T: Copy + Into<f64>>(values: &[T]) -> Vec<f64> {
    values.iter().map(|&v| v.into()).collect()
}
