use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ReconError, Result};

pub const SECRET_FINDER_URL: &str =
    "https://raw.githubusercontent.com/m4ll0k/SecretFinder/master/SecretFinder.py";

/// Run configuration. Every field has a default so a partial JSON file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding every artifact of the run.
    pub work_dir: PathBuf,
    /// Where the fetcher drops installed binaries. Defaults to `$HOME/go/bin`.
    pub install_bin: Option<PathBuf>,
    /// Program invoked as `<fetcher> install <locator>`.
    pub fetcher: String,
    pub script_url: String,
    pub script_name: String,
    pub interpreter: String,
    /// Substring selecting script URLs out of the crawl dump.
    pub script_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            install_bin: None,
            fetcher: "go".into(),
            script_url: SECRET_FINDER_URL.into(),
            script_name: "secretfinder.py".into(),
            interpreter: "python3".into(),
            script_filter: ".js".into(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| ReconError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|e| ReconError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Install destination, falling back to `$HOME/go/bin`, then to `go/bin`
    /// relative to the working directory when no home is known.
    pub fn install_bin(&self) -> PathBuf {
        if let Some(dir) = &self.install_bin {
            return dir.clone();
        }
        match dirs::home_dir() {
            Some(home) => home.join("go").join("bin"),
            None => self.work_dir.join("go").join("bin"),
        }
    }

    pub fn script_path(&self) -> PathBuf {
        self.work_dir.join(&self.script_name)
    }
}
