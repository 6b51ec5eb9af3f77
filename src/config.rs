//! Configuration for the news portal client

use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "NEWS_PORTAL_API_URL";

/// Configuration options for the news portal client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Number of news items shown per page
    pub page_size: usize,

    /// The storage key under which the session token is persisted
    pub token_key: String,

    /// Image shown on cards whose item carries none
    pub fallback_image_url: Option<String>,

    /// `chrono` format string for publication dates
    pub date_format: String,

    /// Value of the `X-Client-Info` header sent with every request
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            page_size: 9,
            token_key: "token".to_string(),
            fallback_image_url: None,
            date_format: "%d/%m/%Y".to_string(),
            client_info: concat!("news-portal-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the page size (minimum 1)
    pub fn with_page_size(mut self, value: usize) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the token storage key
    pub fn with_token_key(mut self, value: &str) -> Self {
        self.token_key = value.to_string();
        self
    }

    /// Set the fallback image used by cards without an image
    pub fn with_fallback_image_url(mut self, value: Option<&str>) -> Self {
        self.fallback_image_url = value.map(str::to_string);
        self
    }

    /// Set the publication date format
    pub fn with_date_format(mut self, value: &str) -> Self {
        self.date_format = value.to_string();
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Where the API lives and how to talk to it
#[derive(Debug, Clone)]
pub struct PortalConfig {
    api_url: String,
    /// Client options
    pub options: ClientOptions,
}

impl PortalConfig {
    /// Creates a configuration, validating the base URL.
    pub fn new(api_url: &str) -> Result<Self, Error> {
        Self::new_with_options(api_url, ClientOptions::default())
    }

    /// Creates a configuration with custom options, validating the base URL.
    pub fn new_with_options(api_url: &str, options: ClientOptions) -> Result<Self, Error> {
        let parsed = Url::parse(api_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", api_url)));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            options,
        })
    }

    /// Reads the base URL from `NEWS_PORTAL_API_URL`, loading `.env` first.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        let api_url = std::env::var(API_URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", API_URL_ENV)))?;
        Self::new(&api_url)
    }

    /// The base URL without a trailing slash
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL of an API path such as `/news`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_portal_layout() {
        let options = ClientOptions::default();
        assert_eq!(options.page_size, 9);
        assert_eq!(options.token_key, "token");
        assert!(options.fallback_image_url.is_none());
        assert!(options.client_info.starts_with("news-portal-client/"));
    }

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(ClientOptions::default().with_page_size(0).page_size, 1);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = PortalConfig::new("http://localhost:3001/api/").unwrap();
        assert_eq!(config.api_url(), "http://localhost:3001/api");
        assert_eq!(config.endpoint("/news"), "http://localhost:3001/api/news");
        assert_eq!(config.endpoint("auth/login"), "http://localhost:3001/api/auth/login");
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(matches!(PortalConfig::new("not a url"), Err(Error::Url(_))));
        assert!(matches!(PortalConfig::new("mailto:me@example.com"), Err(Error::Config(_))));
    }
}
