use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::NeoWatchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client that only talks to approved hosts.
/// Every outbound call (NeoWs feed, identity provider) goes through here.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default NeoWatch allowlist.
    pub fn new(timeout: Duration) -> Result<Self, NeoWatchError> {
        let domains = [
            "api.nasa.gov", // NeoWs
            "supabase.co",  // Supabase auth
            "localhost",
            "127.0.0.1",
        ];
        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("NeoWatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NeoWatchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_ascii_lowercase());
    }

    /// Allows the host of a configured base URL (e.g. a self-hosted auth server).
    pub fn allow_url_host(&mut self, url: &str) -> Result<(), NeoWatchError> {
        let parsed = Url::parse(url)
            .map_err(|e| NeoWatchError::Config(format!("Invalid URL {}: {}", url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| NeoWatchError::Config(format!("URL has no host: {}", url)))?;
        self.allow_domain(host);
        Ok(())
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, NeoWatchError> {
        if !self.is_allowed(url) {
            return Err(NeoWatchError::SecurityError(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
