//! Runtime configuration for the service and CLI tools.

use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration; a partial JSON file overlays the defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Pipeline stage parameters.
    pub pipeline: PipelineParams,
    /// Digit model parameter file.
    pub model_path: PathBuf,
    /// HTTP bind address for the server binary.
    pub bind_addr: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineParams::default(),
            model_path: PathBuf::from("resources/digits_mlp.json"),
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Load a config file; missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overlays_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{ "bind_addr": "127.0.0.1:8080" }"#).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.pipeline.canvas_size, 450);
        assert_eq!(config.model_path, PathBuf::from("resources/digits_mlp.json"));
    }

    #[test]
    fn nested_pipeline_overrides_apply() {
        let config: RuntimeConfig = serde_json::from_str(
            r#"{ "pipeline": { "locator": { "min_grid_area": 0.0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.pipeline.locator.min_grid_area, 0.0);
        assert_eq!(config.pipeline.locator.min_contour_area, 50.0);
    }
}
