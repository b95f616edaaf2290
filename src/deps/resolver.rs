use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use super::search_path::SearchPath;
use super::tools::{RenameRule, ToolSpec};
use crate::config::Config;
use crate::error::{ReconError, Result};
use crate::output::console;

#[derive(Debug)]
pub enum ToolStatus {
    Present(PathBuf),
    Installed,
    Failed(ReconError),
}

#[derive(Debug)]
pub struct ToolReport {
    pub name: String,
    pub status: ToolStatus,
}

impl ToolReport {
    pub fn is_available(&self) -> bool {
        !matches!(self.status, ToolStatus::Failed(_))
    }
}

/// Checks required tools against the search path and fetches the missing ones.
/// Every failure is reported and skipped; nothing here aborts the run.
pub struct DependencyResolver {
    fetcher: String,
    install_bin: PathBuf,
    search_path: SearchPath,
}

impl DependencyResolver {
    pub fn new(config: &Config, search_path: SearchPath) -> Self {
        Self { fetcher: config.fetcher.clone(), install_bin: config.install_bin(), search_path }
    }

    /// Add the install destination to the search path. Safe to call twice.
    pub fn init(&mut self) -> bool {
        match self.search_path.prepend(&self.install_bin) {
            Ok(added) => {
                if added {
                    tracing::debug!(dir=%self.install_bin.display(), "install dir added to search path");
                }
                added
            }
            Err(e) => {
                console::error(format!("Cannot add {} to PATH: {}", self.install_bin.display(), e));
                false
            }
        }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    pub fn into_search_path(self) -> SearchPath {
        self.search_path
    }

    pub async fn ensure_tools(&self, specs: &[ToolSpec]) -> Vec<ToolReport> {
        let mut reports = Vec::with_capacity(specs.len());
        for spec in specs {
            reports.push(self.ensure_tool(spec).await);
        }
        reports
    }

    async fn ensure_tool(&self, spec: &ToolSpec) -> ToolReport {
        if let Some(path) = self.search_path.lookup(&spec.name) {
            println!("    -> {}: OK ({})", spec.name, path.display());
            return ToolReport { name: spec.name.clone(), status: ToolStatus::Present(path) };
        }

        console::warn(format!("'{}' not found. Installing automatically... (This may take a while)", spec.name));
        let status = match self.install(spec).await {
            Ok(()) => {
                console::success(format!("{} installed successfully.", spec.name));
                ToolStatus::Installed
            }
            Err(e) => {
                console::error(format!("ERROR: Failed to install {}. Please install it manually.", spec.name));
                console::error(format!("Detail: {e}"));
                ToolStatus::Failed(e)
            }
        };
        ToolReport { name: spec.name.clone(), status }
    }

    /// Install `rule.fetched_as` and move it to `rule.install_as`, unless the
    /// latter is already on the path.
    pub async fn ensure_renamed(&self, rule: &RenameRule) -> ToolReport {
        let name = rule.install_as.clone();
        if let Some(path) = self.search_path.lookup(&rule.install_as) {
            println!("    -> {}: OK ({})", rule.install_as, path.display());
            return ToolReport { name, status: ToolStatus::Present(path) };
        }

        console::warn(format!(
            "'{}' not found. Installing '{}' and renaming...",
            rule.install_as, rule.fetched_as
        ));
        if let Err(e) = self.install(&rule.fetch_spec()).await {
            console::error(format!("ERROR: {e}"));
            return ToolReport { name, status: ToolStatus::Failed(e) };
        }

        match self.rename_installed(rule) {
            Ok(()) => {
                console::success(format!("{} installed and configured.", rule.install_as));
                ToolReport { name, status: ToolStatus::Installed }
            }
            Err(e) => {
                console::error(format!("{e}"));
                if let ReconError::Rename { from, to, .. } = &e {
                    console::error(format!("    Manually rename {} to {}", from.display(), to.display()));
                }
                ToolReport { name, status: ToolStatus::Failed(e) }
            }
        }
    }

    fn rename_installed(&self, rule: &RenameRule) -> Result<()> {
        let from = self.binary_path(&rule.fetched_as);
        let to = self.binary_path(&rule.install_as);
        if !from.exists() {
            return Err(ReconError::MissingBinary { tool: rule.fetched_as.clone(), path: from });
        }
        // stale destination; absence is the normal case
        let _ = std::fs::remove_file(&to);
        std::fs::rename(&from, &to).map_err(|source| ReconError::Rename { from, to, source })
    }

    fn binary_path(&self, tool: &str) -> PathBuf {
        self.install_bin.join(format!("{tool}{}", std::env::consts::EXE_SUFFIX))
    }

    async fn install(&self, spec: &ToolSpec) -> Result<()> {
        let program = self.search_path.lookup(&self.fetcher).unwrap_or_else(|| PathBuf::from(&self.fetcher));
        tracing::info!(tool=%spec.name, source=%spec.install_source, version=?spec.version(), fetcher=%program.display(), "installing tool");

        let status = Command::new(&program)
            .arg("install")
            .arg(&spec.install_source)
            .env("PATH", self.search_path.as_os_str())
            .env("GOBIN", &self.install_bin)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ReconError::InstallFailed { tool: spec.name.clone(), detail: e.to_string() })?;

        if status.success() {
            Ok(())
        } else {
            Err(ReconError::InstallFailed { tool: spec.name.clone(), detail: format!("{} exited with {status}", self.fetcher) })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;

    fn resolver(fetcher: &str, install_bin: &Path) -> DependencyResolver {
        let config = Config {
            fetcher: fetcher.into(),
            install_bin: Some(install_bin.to_path_buf()),
            ..Config::default()
        };
        let mut r = DependencyResolver::new(&config, SearchPath::from_env());
        r.init();
        r
    }

    fn rule(fetched: &str, installed: &str) -> RenameRule {
        RenameRule {
            fetched_as: fetched.into(),
            install_as: installed.into(),
            install_source: "example.org/tool@v1".into(),
        }
    }

    #[test]
    fn init_adds_install_bin_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = resolver("true", dir.path());
        assert!(!r.init());
        assert_eq!(r.search_path().dirs()[0], dir.path());
        assert_eq!(r.search_path().dirs().iter().filter(|d| *d == dir.path()).count(), 1);
    }

    #[tokio::test]
    async fn present_tool_is_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver("false", dir.path());
        let reports = r.ensure_tools(&[ToolSpec::new("sh", "example.org/sh@latest")]).await;
        assert!(matches!(reports[0].status, ToolStatus::Present(_)));
    }

    #[tokio::test]
    async fn failed_install_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver("false", dir.path());
        let reports = r
            .ensure_tools(&[
                ToolSpec::new("reconflow-no-such-tool", "example.org/a@latest"),
                ToolSpec::new("sh", "example.org/sh@latest"),
            ])
            .await;
        assert_eq!(reports.len(), 2);
        assert!(matches!(reports[0].status, ToolStatus::Failed(ReconError::InstallFailed { .. })));
        assert!(reports[1].is_available());
    }

    #[tokio::test]
    async fn missing_fetcher_is_install_failure() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver("reconflow-no-such-fetcher", dir.path());
        let reports = r.ensure_tools(&[ToolSpec::new("reconflow-no-such-tool", "x@latest")]).await;
        assert!(!reports[0].is_available());
    }

    #[tokio::test]
    async fn rename_reports_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver("true", dir.path());
        let report = r.ensure_renamed(&rule("reconflow-fetched", "reconflow-renamed")).await;
        assert!(matches!(report.status, ToolStatus::Failed(ReconError::MissingBinary { .. })));
    }

    #[tokio::test]
    async fn rename_moves_fetched_binary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reconflow-fetched"), "bin").unwrap();
        std::fs::write(dir.path().join("reconflow-renamed"), "stale").unwrap();
        let r = resolver("true", dir.path());

        // stale file is not executable, so lookup misses it and the rule runs
        let report = r.ensure_renamed(&rule("reconflow-fetched", "reconflow-renamed")).await;

        assert!(matches!(report.status, ToolStatus::Installed));
        assert!(!dir.path().join("reconflow-fetched").exists());
        assert_eq!(std::fs::read_to_string(dir.path().join("reconflow-renamed")).unwrap(), "bin");
    }

    #[tokio::test]
    async fn rename_skipped_when_target_present() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver("false", dir.path());
        let report = r.ensure_renamed(&rule("reconflow-fetched", "sh")).await;
        assert!(matches!(report.status, ToolStatus::Present(_)));
    }

    #[tokio::test]
    async fn failed_rename_reports_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reconflow-fetched"), "bin").unwrap();
        let blocker = dir.path().join("reconflow-renamed");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        // install dir stays off the search path so the directory is never looked up
        let config = Config {
            fetcher: "true".into(),
            install_bin: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let r = DependencyResolver::new(&config, SearchPath::from_env());

        let report = r.ensure_renamed(&rule("reconflow-fetched", "reconflow-renamed")).await;

        match report.status {
            ToolStatus::Failed(ReconError::Rename { from, to, .. }) => {
                assert_eq!(from, dir.path().join("reconflow-fetched"));
                assert_eq!(to, blocker);
            }
            other => panic!("expected rename failure, got {other:?}"),
        }
        assert!(dir.path().join("reconflow-fetched").exists());
    }
}
