use reqwest::Client;
use std::path::PathBuf;

use crate::error::{ReconError, Result};
use crate::output::console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    AlreadyPresent,
    Downloaded { bytes: usize },
}

/// Fetches the auxiliary secret-scanner script into the working directory
/// when it is not there yet.
pub struct ScriptFetcher {
    url: String,
    dest: PathBuf,
}

impl ScriptFetcher {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self { url: url.into(), dest: dest.into() }
    }

    pub async fn ensure(&self, client: &Client) -> Result<ScriptStatus> {
        if self.dest.exists() {
            tracing::debug!(path=%self.dest.display(), "script already present");
            return Ok(ScriptStatus::AlreadyPresent);
        }

        let name = self.dest.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        console::warn(format!("'{name}' not found. Downloading..."));

        let body = self.download(client).await?;
        std::fs::write(&self.dest, &body).map_err(|e| ReconError::artifact(&self.dest, e))?;
        tracing::info!(url=%self.url, path=%self.dest.display(), bytes = body.len(), "script downloaded");
        Ok(ScriptStatus::Downloaded { bytes: body.len() })
    }

    async fn download(&self, client: &Client) -> Result<Vec<u8>> {
        let fetch_err = |e: reqwest::Error| ReconError::Fetch { url: self.url.clone(), detail: e.to_string() };
        let resp = client.get(&self.url).send().await.map_err(fetch_err)?;
        let resp = resp.error_for_status().map_err(fetch_err)?;
        let body = resp.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn present_script_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("secretfinder.py");
        std::fs::write(&dest, "print('hi')").unwrap();

        // unroutable URL: any network attempt would fail the test
        let fetcher = ScriptFetcher::new("http://127.0.0.1:9/SecretFinder.py", &dest);
        let status = fetcher.ensure(&Client::new()).await.unwrap();

        assert_eq!(status, ScriptStatus::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "print('hi')");
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("secretfinder.py");

        let fetcher = ScriptFetcher::new("http://127.0.0.1:9/SecretFinder.py", &dest);
        let err = fetcher.ensure(&Client::new()).await.unwrap_err();

        assert!(matches!(err, ReconError::Fetch { .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn error_status_writes_nothing() {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found")
                .unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("secretfinder.py");
        let fetcher = ScriptFetcher::new(format!("http://{addr}/SecretFinder.py"), &dest);
        let err = fetcher.ensure(&Client::new()).await.unwrap_err();
        server.join().unwrap();

        match err {
            ReconError::Fetch { detail, .. } => assert!(detail.contains("404"), "{detail}"),
            other => panic!("expected fetch error, got {other:?}"),
        }
        assert!(!dest.exists());
    }
}
