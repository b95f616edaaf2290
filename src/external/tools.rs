//! Command-line contracts of the external collaborators. Each builder only
//! knows which arguments a tool takes and which file it writes.

use std::path::Path;

use super::runner::Invocation;

pub const SUBFINDER: &str = "subfinder";
pub const ASSETFINDER: &str = "assetfinder";
pub const HTTPX_TOOLKIT: &str = "httpx-toolkit";
pub const SUBZY: &str = "subzy";
pub const KATANA: &str = "katana";

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// subfinder writes its own output file.
pub fn subfinder(domain: &str, out: &Path) -> Invocation {
    Invocation::new(SUBFINDER, ["-d".to_string(), domain.to_string(), "-o".to_string(), path_arg(out)])
}

/// assetfinder only prints, so its stdout is captured.
pub fn assetfinder(domain: &str, out: &Path) -> Invocation {
    Invocation::new(ASSETFINDER, ["--subs-only", domain]).stdout_to(out)
}

pub fn httpx_live(list: &Path, out: &Path) -> Invocation {
    Invocation::new(HTTPX_TOOLKIT, ["-l".to_string(), path_arg(list), "-o".to_string(), path_arg(out)])
}

/// Titles, status codes, content length, redirect location, following redirects.
pub fn httpx_status(list: &Path, out: &Path) -> Invocation {
    let mut args = vec!["-l".to_string(), path_arg(list)];
    args.extend(["-title", "-sc", "-cl", "-location", "-fr"].map(String::from));
    args.extend(["-o".to_string(), path_arg(out)]);
    Invocation::new(HTTPX_TOOLKIT, args)
}

pub fn subzy(list: &Path) -> Invocation {
    Invocation::new(SUBZY, ["run".to_string(), "--targets".to_string(), path_arg(list)])
}

pub fn katana(list: &Path, out: &Path) -> Invocation {
    Invocation::new(KATANA, ["-u".to_string(), path_arg(list), "-o".to_string(), path_arg(out)])
}

/// One secret-scanner run against a single script URL, printing to the terminal.
pub fn secret_finder(interpreter: &str, script: &Path, url: &str) -> Invocation {
    Invocation::new(
        interpreter,
        [path_arg(script), "-i".to_string(), url.to_string(), "-o".to_string(), "cli".to_string()],
    )
}
