use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub dashboard_cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let dashboard_cache_ttl_secs = std::env::var("DASHBOARD_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(crate::dashboard::cache::DEFAULT_TTL_SECS);
        Ok(Self {
            database_url,
            dashboard_cache_ttl_secs,
        })
    }
}
