use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Directory holding the exported alert JSON files.
    pub alerts_dir: PathBuf,
    /// Path of the generated report artifact.
    pub output_file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Config {
    pipeline: PipelineConfig,
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config.pipeline)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alerts_dir: PathBuf::from("alerts-kiosk"),
            output_file: PathBuf::from("data/alerts-data.json"),
        }
    }
}
