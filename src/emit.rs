//! JSON output for alert batches

use crate::error::{AlertError, Result};
use crate::types::{AlertBatch, AlertRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the document written into the output directory
pub const OUTPUT_FILE_NAME: &str = "alerts.json";

/// Pretty-printed JSON array, one object per record
pub fn batch_to_json(batch: &AlertBatch) -> Result<String> {
    serde_json::to_string_pretty(batch).map_err(AlertError::Serialize)
}

/// Pretty-printed JSON object for a single record
pub fn record_to_json(record: &AlertRecord) -> Result<String> {
    serde_json::to_string_pretty(record).map_err(AlertError::Serialize)
}

/// Write `json` to `dir/file_name`, creating `dir` if missing
pub fn write_json(dir: &Path, file_name: &str, json: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let write_error = |source| AlertError::OutputWrite {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(write_error)?;
    fs::write(&path, json).map_err(write_error)?;

    Ok(path)
}

/// Serialize `batch` and save it as `alerts.json` in `dir`
pub fn save_batch(dir: &Path, batch: &AlertBatch) -> Result<PathBuf> {
    let json = batch_to_json(batch)?;
    let path = write_json(dir, OUTPUT_FILE_NAME, &json)?;
    info!("Saved {} alerts to {}", batch.len(), path.display());
    Ok(path)
}

/// Load a batch previously written by [`save_batch`]
pub fn load_batch(path: &Path) -> Result<AlertBatch> {
    let json = fs::read_to_string(path).map_err(|source| AlertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(AlertError::Deserialize)
}
