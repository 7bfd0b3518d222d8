//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Instant;

use neowatch_common::error::NeoWatchError;
use neowatch_common::sandbox::SandboxClient;
use neowatch_ingestion::sources::neows::NeoWsClient;
use neowatch_ingestion::NeoSource;
use tracing::{info, warn};

use crate::auth::{IdentityProvider, SupabaseIdentity};
use crate::config::Config;
use crate::service::NeoService;

/// Shared state injected into every Axum handler. Immutable after startup.
pub struct AppState {
    pub service_name: String,
    pub started_at: Instant,
    pub neo: NeoService,
    /// `None` when Supabase is not configured; `/me` then answers 401.
    pub identity: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    pub fn new(
        service_name: impl Into<String>,
        source: Arc<dyn NeoSource>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            started_at: Instant::now(),
            neo: NeoService::new(source),
            identity,
        }
    }

    /// Wire the NeoWs client and the Supabase identity provider from config.
    pub fn from_config(config: Config) -> Result<Self, NeoWatchError> {
        let mut client = SandboxClient::new(config.http_timeout)?;
        client.allow_url_host(&config.neows_base_url)?;

        if config.nasa_api_key.is_none() {
            warn!("NASA_API_KEY is not set; feed, summary and lookup will answer 400");
        }
        let source = NeoWsClient::new(client.clone(), config.neows_base_url, config.nasa_api_key);

        let identity: Option<Arc<dyn IdentityProvider>> =
            match (config.supabase_url, config.supabase_anon_key) {
                (Some(url), Some(anon_key)) => {
                    info!(url = %url, "Supabase auth enabled");
                    Some(Arc::new(SupabaseIdentity::new(client, &url, anon_key)?))
                }
                _ => {
                    warn!("SUPABASE_URL or SUPABASE_ANON_KEY missing; /me is disabled");
                    None
                }
            };

        Ok(Self::new(config.service_name, Arc::new(source), identity))
    }

    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    #[test]
    fn test_from_config_without_supabase() {
        let config = Config::resolve(ConfigFile::default(), |_| None);
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.service_name, "neowatch-api");
        assert!(state.identity.is_none());
        assert!(state.uptime_secs() >= 0.0);
    }

    #[test]
    fn test_from_config_with_supabase() {
        let config = Config::resolve(ConfigFile::default(), |key| match key {
            "SUPABASE_URL" => Some("https://abc.supabase.co".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon".to_string()),
            _ => None,
        });
        let state = AppState::from_config(config).unwrap();
        assert!(state.identity.is_some());
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = Config::resolve(ConfigFile::default(), |key| {
            (key == "NEOWS_BASE_URL").then(|| "not a url".to_string())
        });
        assert!(matches!(AppState::from_config(config), Err(NeoWatchError::Config(_))));
    }
}
