use anyhow::{Context, Result, bail};
use std::env;

/// Origin used when `PUBLIC_BASE_URL` is absent (CLI runs, tests, local dev).
pub const DEFAULT_BASE_URL: &str = "https://smartqr.link";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub database_name: String,
    pub jwt_secret: String,
    pub base_url: String,
    pub storage_root: String,
    pub storage_public_url: String,
    pub clipboard_enabled: bool,
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Read every setting from the process environment.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .context("PORT not set")?
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "mongo".to_string())
            .to_lowercase()
            .as_str()
        {
            "mongo" | "mongodb" => StoreBackend::Mongo,
            "memory" => StoreBackend::Memory,
            other => bail!("Unknown STORE_BACKEND: {}", other),
        };

        let mongodb_uri = env::var("MONGODB_URI").ok();
        if store_backend == StoreBackend::Mongo && mongodb_uri.is_none() {
            bail!("MONGODB_URI not set");
        }

        let base_url = resolve_base_url(env::var("PUBLIC_BASE_URL").ok());
        let storage_public_url = resolve_storage_public_url(env::var("STORAGE_PUBLIC_URL").ok())?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            store_backend,
            mongodb_uri,
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "smartqr".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            base_url,
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".to_string()),
            storage_public_url,
            clipboard_enabled: env::var("CLIPBOARD_ENABLED")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            cors_origins,
        })
    }
}

/// The deployment origin, without a trailing slash.
pub fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Origin that serves `STORAGE_ROOT`. This service does not serve uploads
/// itself, so there is no fallback.
pub fn resolve_storage_public_url(configured: Option<String>) -> Result<String> {
    configured
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .context("STORAGE_PUBLIC_URL not set; uploaded documents need a public origin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_falls_back_when_unset_or_blank() {
        assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(Some("   ".into())), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(
            resolve_base_url(Some("https://qr.example.org/".into())),
            "https://qr.example.org"
        );
    }

    #[test]
    fn storage_origin_is_required() {
        assert!(resolve_storage_public_url(None).is_err());
        assert!(resolve_storage_public_url(Some(" ".into())).is_err());
        assert_eq!(
            resolve_storage_public_url(Some("https://files.example.org/".into())).unwrap(),
            "https://files.example.org"
        );
    }
}
