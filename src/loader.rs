//! Data file loading for mold.
//! Reads the JSON or YAML data file whose values back template placeholder
//! resolution, dispatching on the file extension.

use crate::error::{Error, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads a JSON or YAML data file into the data context used for rendering.
///
/// The top level of the file must be a mapping; the mapping is treated as
/// read-only for the remainder of the run.
///
/// # Arguments
/// * `path` - Path to the data file (`.json`, `.yaml` or `.yml`)
///
/// # Returns
/// * `Result<Value>` - The loaded data context
///
/// # Errors
/// * `Error::NotFound` if the path is absent
/// * `Error::UnsupportedFormat` if the extension is not a recognized format
/// * `Error::ParseError` if the content is malformed for its format, or the
///   top level is not a mapping
pub fn load_data_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    debug!("Loading data from: {}", path.display());
    let content = fs::read_to_string(path)?;

    let data: Value = match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| {
            Error::ParseError(format!("invalid JSON in '{}': {}", path.display(), e))
        })?,
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
            Error::ParseError(format!("invalid YAML in '{}': {}", path.display(), e))
        })?,
        _ => return Err(Error::UnsupportedFormat { extension }),
    };

    if !data.is_object() {
        return Err(Error::ParseError(format!(
            "data file '{}' must contain a top-level mapping",
            path.display()
        )));
    }
    Ok(data)
}
