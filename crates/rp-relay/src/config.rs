use std::env;

const DEFAULT_PROVIDER_URL: &str = "https://api.replicate.com/v1/predictions";

/// Relay settings, loaded once at startup and passed into the handlers.
///
/// The credential is optional on purpose: the server still starts
/// without one, and each request then fails fast with a configuration
/// error instead of contacting the provider.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub provider_url: String,
    pub api_token: Option<String>,
}

impl RelayConfig {
    pub fn load() -> anyhow::Result<Self> {
        // Same layering as the deployment scripts: .env.local wins over .env.
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a number"))?;

        let provider_url =
            lookup("REPLICATE_API_URL").unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

        // Both naming conventions are in the wild; the VITE_ one is legacy.
        let api_token = lookup("REPLICATE_API_TOKEN")
            .or_else(|| lookup("VITE_REPLICATE_API_TOKEN"))
            .filter(|t| !t.is_empty());

        Ok(Self {
            port,
            provider_url,
            api_token,
        })
    }
}
