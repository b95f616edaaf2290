use reqwest::{Client, ClientBuilder};

use crate::error::{ReconError, Result};

const USER_AGENT: &str = concat!("reconflow/", env!("CARGO_PKG_VERSION"));

/// Client for the one-off script download. No timeout and no retry: a stalled
/// download stalls the bootstrap, same as a stalled tool install.
pub fn create_fetch_client() -> Result<Client> {
    ClientBuilder::new()
        .use_rustls_tls()
        .redirect(reqwest::redirect::Policy::limited(5))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ReconError::Fetch { url: String::new(), detail: format!("client setup: {e}") })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = create_fetch_client().unwrap();
        assert!(client.get("https://example.com").build().is_ok());
    }
}
