use clap::Parser;
use std::path::PathBuf;

use reconflow::error::ReconError;
use reconflow::utils::normalize_domain;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Chained subdomain recon: discovery, probing, takeover check, crawl and JS secret scan", long_about = None)]
pub struct Cli {
    /// Target domain (e.g. example.com)
    #[arg(short = 'd', long)]
    pub domain: Option<String>,

    /// Working directory for every artifact (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not install missing tools or download the secret scanner
    #[arg(long, default_value_t = false)]
    pub skip_install: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// The domain to scan. Blank counts as missing.
    pub fn target(&self) -> Result<String, ReconError> {
        self.domain.as_deref().and_then(normalize_domain).ok_or(ReconError::MissingDomain)
    }
}

pub const USAGE: &str = "Usage: reconflow -d target.com";

pub fn parse_cli() -> Cli {
    Cli::parse()
}
