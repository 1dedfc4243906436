use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub cms_project_id: String,
    pub cms_dataset: String,
    pub cms_api_version: String,
    pub cms_write_token: String,
    pub cms_use_cdn: bool,
    pub cms_timeout_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:3001");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        Ok(Self {
            http_addr,
            cms_project_id: env_or_err("CMS_PROJECT_ID")?,
            cms_dataset: env_or("CMS_DATASET", "production"),
            cms_api_version: env_or("CMS_API_VERSION", "2023-05-03"),
            cms_write_token: env_or_err("CMS_WRITE_TOKEN")?,
            cms_use_cdn: env_or_parse("CMS_USE_CDN", "true")?,
            cms_timeout_seconds: env_or_parse("CMS_TIMEOUT_SECONDS", "10")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_err(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("missing required env var: {}", key))
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
