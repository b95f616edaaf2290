use once_cell::sync::Lazy;

use crate::external::tools::{ASSETFINDER, HTTPX_TOOLKIT, KATANA, SUBFINDER, SUBZY};

/// A required external tool and the locator it is fetched from
/// (`module-path@version`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub install_source: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, install_source: impl Into<String>) -> Self {
        Self { name: name.into(), install_source: install_source.into() }
    }

    /// Version part of the locator, if any.
    pub fn version(&self) -> Option<&str> {
        self.install_source.rsplit_once('@').map(|(_, v)| v)
    }
}

/// A tool fetched under one name and installed under another, to stay clear
/// of an unrelated system binary sharing the fetched name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub fetched_as: String,
    pub install_as: String,
    pub install_source: String,
}

impl RenameRule {
    /// Tool entry handed to the fetcher.
    pub fn fetch_spec(&self) -> ToolSpec {
        ToolSpec::new(&self.fetched_as, &self.install_source)
    }
}

pub static REQUIRED_TOOLS: Lazy<Vec<ToolSpec>> = Lazy::new(|| {
    vec![
        ToolSpec::new(SUBFINDER, "github.com/projectdiscovery/subfinder/v2/cmd/subfinder@latest"),
        ToolSpec::new(ASSETFINDER, "github.com/tomnomnom/assetfinder@latest"),
        ToolSpec::new(SUBZY, "github.com/PentestPad/subzy@latest"),
        ToolSpec::new(KATANA, "github.com/projectdiscovery/katana/cmd/katana@latest"),
    ]
});

// python's httpx ships a CLI of the same name
pub static HTTPX_RENAME: Lazy<RenameRule> = Lazy::new(|| RenameRule {
    fetched_as: "httpx".into(),
    install_as: HTTPX_TOOLKIT.into(),
    install_source: "github.com/projectdiscovery/httpx/cmd/httpx@latest".into(),
});
