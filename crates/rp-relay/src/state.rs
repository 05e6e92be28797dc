use crate::config::RelayConfig;

/// Shared handler state: the loaded config plus one reqwest client
/// reused across requests. Read-only after construction.
pub struct RelayState {
    pub config: RelayConfig,
    pub http: reqwest::Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Provider status-check URL for one prediction id.
    pub fn status_url(&self, id: &str) -> String {
        format!("{}/{}", self.config.provider_url, id)
    }
}
