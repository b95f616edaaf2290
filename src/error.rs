use std::path::PathBuf;
use thiserror::Error;

/// Failures the pipeline knows how to report. Only `MissingDomain` is fatal;
/// every other variant is printed and the run carries on.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("domain is required")]
    MissingDomain,

    #[error("failed to install {tool}: {detail}")]
    InstallFailed { tool: String, detail: String },

    #[error("{tool} binary missing after install: {}", path.display())]
    MissingBinary { tool: String, path: PathBuf },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    ExitStatus { tool: String, status: std::process::ExitStatus },

    #[error("artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {detail}")]
    Fetch { url: String, detail: String },

    #[error("failed to load config {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },
}

impl ReconError {
    pub fn artifact(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReconError::Artifact { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
