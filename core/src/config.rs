use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_API_URL: &str = "GEODO_API_URL";
pub const ENV_DATA_DIR: &str = "GEODO_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub data_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Defaults, then `<data_dir>/config.toml`, then the environment.
    pub fn load() -> Result<Self> {
        let data_dir = match env::var_os(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let mut cfg = Self::load_from(&data_dir)?;
        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                debug!(api_url = %url, "api url taken from environment");
                cfg.api_url = url;
            }
        }
        Ok(cfg)
    }

    pub fn load_from(data_dir: &Path) -> Result<Self> {
        let mut cfg = Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: data_dir.to_path_buf(),
        };

        let path = data_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            info!(config = %path.display(), "loading config");
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            let file: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("failed parsing {}", path.display()))?;
            if let Some(url) = file.api_url {
                cfg.api_url = url;
            }
            if let Some(secs) = file.timeout_secs {
                cfg.timeout_secs = secs;
            }
        }
        Ok(cfg)
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_url = url;
        }
        self
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".geodo"))
}
