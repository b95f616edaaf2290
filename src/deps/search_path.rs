use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Executable search path carried explicitly instead of mutating the
/// process environment. Children get it through `Command::env("PATH", ..)`.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
    value: OsString,
}

impl SearchPath {
    pub fn from_env() -> Self {
        Self::from_value(env::var_os("PATH").unwrap_or_default())
    }

    pub fn from_value(value: impl Into<OsString>) -> Self {
        let value = value.into();
        let dirs = env::split_paths(&value).filter(|d| !d.as_os_str().is_empty()).collect();
        Self { dirs, value }
    }

    /// Put `dir` in front. Returns `Ok(false)` when it is already listed.
    pub fn prepend(&mut self, dir: &Path) -> Result<bool, env::JoinPathsError> {
        if self.contains(dir) {
            return Ok(false);
        }
        let mut dirs = Vec::with_capacity(self.dirs.len() + 1);
        dirs.push(dir.to_path_buf());
        dirs.extend(self.dirs.iter().cloned());
        self.value = env::join_paths(&dirs)?;
        self.dirs = dirs;
        Ok(true)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.value
    }

    /// Resolve `tool` the way a shell would against this path.
    pub fn lookup(&self, tool: &str) -> Option<PathBuf> {
        which::which_in(tool, Some(&self.value), ".").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_is_idempotent() {
        let mut sp = SearchPath::from_value(env::join_paths(["/usr/bin", "/bin"]).unwrap());
        assert!(sp.prepend(Path::new("/home/u/go/bin")).unwrap());
        assert!(!sp.prepend(Path::new("/home/u/go/bin")).unwrap());
        assert!(!sp.prepend(Path::new("/bin")).unwrap());
        assert_eq!(sp.dirs()[0], PathBuf::from("/home/u/go/bin"));
        assert_eq!(sp.dirs().len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn lookup_finds_executable_in_prepended_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("faketool");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut sp = SearchPath::from_value("");
        assert!(sp.lookup("faketool").is_none());
        sp.prepend(dir.path()).unwrap();
        let found = sp.lookup("faketool").expect("tool on prepended path");
        assert_eq!(found.file_name(), tool.file_name());
    }
}
