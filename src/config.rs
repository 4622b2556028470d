//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is a single
//! file with serde-backed defaults; the handful of deployment secrets (CMS
//! base URL, email API key) can additionally be overridden from the
//! environment so they never need to live in the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! bind = "0.0.0.0:3000"      # Listen address
//!
//! [site]
//! base_url = "https://elan-living.com"
//! name = "ELAN Living"       # Fallback when the CMS global data is down
//!
//! [cms]
//! base_url = "http://localhost:1337"  # env: CARESITE_CMS_URL
//! nav_cache_ttl_secs = 300   # Global-data cache TTL (bounded, per locale)
//!
//! [mail]
//! api_url = "https://api.resend.com/emails"
//! api_key = ""               # env: RESEND_API_KEY
//! to = "team@elan-living.com"
//! from_message = "kontakt@elan-living.com"
//! from_referral = "preporuke@elan-living.com"
//! from_request = "prijava@elan-living.com"
//! from_job = "posao@elan-living.com"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Public-site identity used for metadata fallbacks.
    pub site: SiteIdentity,
    /// Headless CMS connection.
    pub cms: CmsConfig,
    /// Transactional email provider.
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:3000`.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Canonical public base URL (used in alternate-locale links).
    pub base_url: String,
    /// Site name fallback when the CMS global data is unavailable.
    pub name: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            base_url: "https://elan-living.com".to_string(),
            name: "ELAN Living".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    /// CMS REST base URL. Overridable via `CARESITE_CMS_URL`.
    pub base_url: String,
    /// TTL for the per-locale global-data cache, in seconds.
    pub nav_cache_ttl_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1337".to_string(),
            nav_cache_ttl_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailConfig {
    /// Email provider endpoint.
    pub api_url: String,
    /// Provider API key. Overridable via `RESEND_API_KEY`.
    pub api_key: String,
    /// Destination mailbox for every form kind.
    pub to: String,
    pub from_message: String,
    pub from_referral: String,
    pub from_request: String,
    pub from_job: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key: String::new(),
            to: "team@elan-living.com".to_string(),
            from_message: "kontakt@elan-living.com".to_string(),
            from_referral: "preporuke@elan-living.com".to_string(),
            from_request: "prijava@elan-living.com".to_string(),
            from_job: "posao@elan-living.com".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load from a config file if it exists, then apply environment
    /// overrides. A missing file yields the stock defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides for deployment secrets.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("CARESITE_CMS_URL") {
            if !url.is_empty() {
                self.cms.base_url = url;
            }
        }
        if let Ok(key) = std::env::var("RESEND_API_KEY") {
            if !key.is_empty() {
                self.mail.api_key = key;
            }
        }
    }

    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cms.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "cms.base_url must not be empty".into(),
            ));
        }
        if url::Url::parse(&self.cms.base_url).is_err() {
            return Err(ConfigError::Validation(format!(
                "cms.base_url is not a valid URL: {}",
                self.cms.base_url
            )));
        }
        if url::Url::parse(&self.site.base_url).is_err() {
            return Err(ConfigError::Validation(format!(
                "site.base_url is not a valid URL: {}",
                self.site.base_url
            )));
        }
        if self.cms.nav_cache_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cms.nav_cache_ttl_secs must be greater than zero".into(),
            ));
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not a valid socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

/// A documented stock `config.toml` with every option at its default.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    let body = toml::to_string_pretty(&defaults).unwrap_or_default();
    format!(
        "# caresite configuration\n\
         # All options are optional; defaults shown. `cms.base_url` and\n\
         # `mail.api_key` can also come from CARESITE_CMS_URL / RESEND_API_KEY.\n\n{body}"
    )
}
