//! Configuration loading for NeoWatch.
//! Reads neowatch.toml from the current directory or the path in NEOWATCH_CONFIG,
//! then applies environment overrides (NASA_API_KEY, NEOWS_BASE_URL,
//! SUPABASE_URL, SUPABASE_ANON_KEY, NEOWATCH_BIND).

use neowatch_ingestion::sources::neows::NEOWS_BASE_URL;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// On-disk shape of neowatch.toml. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub neows: NeoWsSection,
    #[serde(default)]
    pub supabase: SupabaseSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { bind: default_bind(), service_name: default_service_name() }
    }
}

fn default_bind()         -> String { "0.0.0.0:5001".to_string() }
fn default_service_name() -> String { "neowatch-api".to_string() }

#[derive(Debug, Deserialize)]
pub struct NeoWsSection {
    #[serde(default = "default_neows_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NeoWsSection {
    fn default() -> Self {
        Self {
            base_url: default_neows_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_neows_base_url() -> String { NEOWS_BASE_URL.to_string() }
fn default_timeout_secs()   -> u64    { 30 }

#[derive(Debug, Default, Deserialize)]
pub struct SupabaseSection {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

/// Resolved runtime configuration. Secrets never leave `SecretString`.
#[derive(Debug)]
pub struct Config {
    pub bind_addr: String,
    pub service_name: String,
    pub neows_base_url: String,
    pub nasa_api_key: Option<SecretString>,
    pub http_timeout: Duration,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<SecretString>,
}

impl Config {
    /// Load neowatch.toml (optional unless NEOWATCH_CONFIG names it) and
    /// apply process environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let file = match std::env::var("NEOWATCH_CONFIG") {
            Ok(path) => {
                if !Path::new(&path).exists() {
                    anyhow::bail!("Config file not found: {}", path);
                }
                Self::parse_file(&std::fs::read_to_string(&path)?)?
            }
            Err(_) if Path::new("neowatch.toml").exists() => {
                Self::parse_file(&std::fs::read_to_string("neowatch.toml")?)?
            }
            Err(_) => {
                debug!("No neowatch.toml found, using defaults");
                ConfigFile::default()
            }
        };

        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    pub fn parse_file(content: &str) -> anyhow::Result<ConfigFile> {
        Ok(toml::from_str(content)?)
    }

    /// Merge file values with overrides from `env`. Blank values count as unset.
    pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            bind_addr: lookup("NEOWATCH_BIND").unwrap_or(file.server.bind),
            service_name: file.server.service_name,
            neows_base_url: lookup("NEOWS_BASE_URL").unwrap_or(file.neows.base_url),
            nasa_api_key: lookup("NASA_API_KEY")
                .or(non_blank(file.neows.api_key))
                .map(SecretString::from),
            http_timeout: Duration::from_secs(file.neows.timeout_secs),
            supabase_url: lookup("SUPABASE_URL").or(non_blank(file.supabase.url)),
            supabase_anon_key: lookup("SUPABASE_ANON_KEY")
                .or(non_blank(file.supabase.anon_key))
                .map(SecretString::from),
        }
    }
}
