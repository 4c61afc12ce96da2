//! Site configuration loaded once at start-up via OrthoConfig.
//!
//! Values come from CLI flags, `SITE_*` environment variables or a config
//! file. [`SiteSettings::into_config`] validates them into the immutable
//! [`SiteConfig`] that is passed to every component.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Origin used when none is configured.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:1337";
/// Content request timeout ceiling, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Page cache revalidation interval, in seconds.
pub const DEFAULT_REVALIDATE_SECS: u64 = 86_400;
/// Address the HTTP server binds to.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raw configuration as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITE")]
pub struct SiteSettings {
    /// Origin of the content backend, e.g. `https://cms.example.com`.
    pub api_origin: Option<String>,
    /// Socket address for the HTTP server.
    pub bind_addr: Option<String>,
    /// Content request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// Page cache revalidation interval in seconds.
    #[ortho_config(default = 86_400)]
    pub revalidate_secs: u64,
    /// File holding the bearer token for content requests.
    pub token_file: Option<PathBuf>,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("api origin {value:?} is not a valid URL: {message}")]
    InvalidOrigin { value: String, message: String },
    #[error("api origin {value:?} must use http or https")]
    UnsupportedScheme { value: String },
    #[error("bind address {value:?} is invalid: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Validated, immutable site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    api_origin: Url,
    api_base: Url,
    pub request_timeout: Duration,
    pub revalidate_after: Duration,
    pub bind_addr: SocketAddr,
    pub token_file: Option<PathBuf>,
}

impl SiteSettings {
    /// Validate and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for an unparsable or non-HTTP origin, an
    /// invalid bind address or a zero duration.
    pub fn into_config(self) -> Result<SiteConfig, SettingsError> {
        let origin_raw = self.api_origin.as_deref().unwrap_or(DEFAULT_API_ORIGIN);
        let api_origin = parse_origin(origin_raw)?;
        let api_base = api_origin
            .join("api")
            .map_err(|err| SettingsError::InvalidOrigin {
                value: origin_raw.to_owned(),
                message: err.to_string(),
            })?;
        let bind_raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: bind_raw.to_owned(),
                message: err.to_string(),
            })?;
        Ok(SiteConfig {
            api_origin,
            api_base,
            request_timeout: non_zero_seconds(self.request_timeout_secs, "request timeout")?,
            revalidate_after: non_zero_seconds(self.revalidate_secs, "revalidation interval")?,
            bind_addr,
            token_file: self.token_file,
        })
    }
}

impl SiteConfig {
    /// Origin without a trailing slash, used to resolve media URLs.
    pub fn api_origin(&self) -> &str {
        self.api_origin.as_str().trim_end_matches('/')
    }

    /// Base for collection requests: `{origin}/api`, keeping any origin path.
    ///
    /// # Examples
    /// ```
    /// use site_backend::settings::SiteSettings;
    ///
    /// let config = SiteSettings {
    ///     api_origin: Some("https://cms.example.com/".into()),
    ///     bind_addr: None,
    ///     request_timeout_secs: 10,
    ///     revalidate_secs: 86_400,
    ///     token_file: None,
    /// }
    /// .into_config()
    /// .expect("valid settings");
    /// assert_eq!(config.api_base().as_str(), "https://cms.example.com/api");
    /// ```
    pub fn api_base(&self) -> Url {
        self.api_base.clone()
    }
}

fn parse_origin(raw: &str) -> Result<Url, SettingsError> {
    let mut url = Url::parse(raw.trim()).map_err(|err| SettingsError::InvalidOrigin {
        value: raw.to_owned(),
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme {
            value: raw.to_owned(),
        });
    }
    // A trailing slash makes `join` append below the origin path.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn non_zero_seconds(seconds: u64, field: &'static str) -> Result<Duration, SettingsError> {
    if seconds == 0 {
        Err(SettingsError::ZeroDuration { field })
    } else {
        Ok(Duration::from_secs(seconds))
    }
}
