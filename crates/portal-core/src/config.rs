//! Configuration module
//!
//! Client-side settings for the seller portal: where the backend lives, how long
//! to wait for it, and the upload ceiling applied to document slots.

use std::env;

/// Upload ceiling observed on every upload field of the portal.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 2;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/";
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Seller portal configuration
#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub api_url: String,
    pub http_timeout_secs: u64,
    pub max_upload_bytes: u64,
    /// Session token handed to the CLI; the library never reads it on its own.
    pub auth_token: Option<String>,
    pub environment: String,
    pub log_json: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            auth_token: None,
            environment: "development".to_string(),
            log_json: false,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_upload_mb = parse_number(
            "PORTAL_MAX_UPLOAD_MB",
            env::var("PORTAL_MAX_UPLOAD_MB").ok(),
            DEFAULT_MAX_UPLOAD_MB,
        )?;

        let config = PortalConfig {
            api_url: env::var("PORTAL_API_URL")
                .or_else(|_| env::var("API_URL"))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            http_timeout_secs: parse_number(
                "PORTAL_HTTP_TIMEOUT_SECS",
                env::var("PORTAL_HTTP_TIMEOUT_SECS").ok(),
                HTTP_TIMEOUT_SECS,
            )?,
            max_upload_bytes: max_upload_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("PORTAL_MAX_UPLOAD_MB is too large"))?,
            auth_token: env::var("PORTAL_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            environment,
            log_json: env::var("PORTAL_LOG_JSON")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "PORTAL_API_URL must be an http:// or https:// URL"
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("PORTAL_MAX_UPLOAD_MB must be positive"));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("PORTAL_HTTP_TIMEOUT_SECS must be positive"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Numeric setting: unset or blank falls back to the default, anything else must parse.
fn parse_number(name: &str, raw: Option<String>, default: u64) -> Result<u64, anyhow::Error> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got {:?}", name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = PortalConfig {
            api_url: "ftp://example.com".to_string(),
            ..PortalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ceiling() {
        let config = PortalConfig {
            max_upload_bytes: 0,
            ..PortalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let config = PortalConfig {
            environment: "Prod".to_string(),
            ..PortalConfig::default()
        };
        assert!(config.is_production());
        assert!(!PortalConfig::default().is_production());
    }

    #[test]
    fn test_parse_number_settings() {
        assert_eq!(parse_number("PORTAL_MAX_UPLOAD_MB", None, 2).unwrap(), 2);
        assert_eq!(parse_number("PORTAL_MAX_UPLOAD_MB", Some(" ".into()), 2).unwrap(), 2);
        assert_eq!(parse_number("PORTAL_MAX_UPLOAD_MB", Some("5".into()), 2).unwrap(), 5);

        let err = parse_number("PORTAL_MAX_UPLOAD_MB", Some("two".into()), 2).unwrap_err();
        assert!(err.to_string().contains("PORTAL_MAX_UPLOAD_MB must be a valid number"));
        let err = parse_number("PORTAL_HTTP_TIMEOUT_SECS", Some("-3".into()), 60).unwrap_err();
        assert!(err.to_string().contains("PORTAL_HTTP_TIMEOUT_SECS"));
    }
}
