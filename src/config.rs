// Server configuration, loadable from a YAML file with sane defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: String,
    /// Directory holding one `<collection>.json` file per collection.
    pub data_dir: PathBuf,
    /// Public root that image paths like `/images/pets/max.jpg` resolve under.
    pub images_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:4000".to_string(),
            data_dir: PathBuf::from("data"),
            images_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
