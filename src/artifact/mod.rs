//! Working directory holding the line-oriented files stages hand to each other.

pub mod filter;
pub mod merge;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{ReconError, Result};

pub use filter::extract_matching;
pub use merge::merge_unique;

/// Every file the pipeline produces. Names are fixed so reruns overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    SubfinderRaw,
    AssetsRaw,
    Subdomains,
    Live,
    Status,
    Crawl,
    ScriptUrls,
}

impl Artifact {
    pub const ALL: [Artifact; 7] = [
        Artifact::SubfinderRaw,
        Artifact::AssetsRaw,
        Artifact::Subdomains,
        Artifact::Live,
        Artifact::Status,
        Artifact::Crawl,
        Artifact::ScriptUrls,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::SubfinderRaw => "subfinder.txt",
            Artifact::AssetsRaw => "assets.txt",
            Artifact::Subdomains => "sub.txt",
            Artifact::Live => "live.txt",
            Artifact::Status => "status.txt",
            Artifact::Crawl => "katana.txt",
            Artifact::ScriptUrls => "jsfiles.txt",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making the directory if needed. Nothing is ever cleaned up.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| ReconError::artifact(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }

    /// Lines of an artifact, untrimmed. A missing artifact reads as empty.
    pub fn read_lines(&self, artifact: Artifact) -> Result<Vec<String>> {
        let path = self.path(artifact);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReconError::artifact(path, e)),
        };
        let mut out = Vec::new();
        for line in raw_lines(BufReader::new(file)) {
            out.push(line.map_err(|e| ReconError::artifact(&path, e))?);
        }
        Ok(out)
    }
}

/// Newline-split reader that tolerates invalid UTF-8 and drops a trailing `\r`.
pub(crate) fn raw_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.split(b'\n').map(|chunk| {
        chunk.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}
