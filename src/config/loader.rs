//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::InspectorConfig;
use crate::error::{InspectorError, Result};

/// Load configuration from an optional path.
///
/// `None` yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<InspectorConfig> {
    let Some(path) = path else {
        return Ok(InspectorConfig::default());
    };

    if !path.exists() {
        return Err(InspectorError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str(&content).map_err(|e| InspectorError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
