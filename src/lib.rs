//! News Portal Client Library
//!
//! A Rust client for a paginated news portal: it fetches the news list,
//! paginates it, derives card and header view models, and drives the login
//! and registration forms against a token-based session.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod guard;
pub mod news;
pub mod pagination;
pub mod portal;
pub mod store;
pub mod view;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::Auth;
use crate::config::{ClientOptions, PortalConfig};
use crate::error::Error;
use crate::news::NewsClient;
use crate::portal::Portal;
use crate::store::TokenStore;

/// The main entry point for the news portal client
pub struct NewsPortal {
    config: Arc<PortalConfig>,
    /// HTTP client shared by every API client
    pub http_client: Client,
    auth: Auth,
    news: NewsClient,
}

impl NewsPortal {
    /// Create a new client for the API at `api_url`
    ///
    /// # Example
    ///
    /// ```
    /// use news_portal_client::NewsPortal;
    ///
    /// let client = NewsPortal::new("http://localhost:3001").unwrap();
    /// assert_eq!(client.config().endpoint("/news"), "http://localhost:3001/news");
    /// ```
    pub fn new(api_url: &str) -> Result<Self, Error> {
        Self::new_with_options(api_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use news_portal_client::{NewsPortal, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_page_size(12);
    /// let client = NewsPortal::new_with_options("http://localhost:3001", options).unwrap();
    /// assert_eq!(client.config().options.page_size, 12);
    /// ```
    pub fn new_with_options(api_url: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::from_config(PortalConfig::new_with_options(api_url, options)?)
    }

    /// Create a new client from an already validated configuration
    pub fn from_config(config: PortalConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let config = Arc::new(config);
        let auth = Auth::new(Arc::clone(&config), http_client.clone());
        let news = NewsClient::new(Arc::clone(&config), http_client.clone());

        Ok(Self {
            config,
            http_client,
            auth,
            news,
        })
    }

    /// Create a client for the API named by `NEWS_PORTAL_API_URL`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(PortalConfig::from_env()?)
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Get a reference to the auth client for login and registration
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the news client
    pub fn news(&self) -> &NewsClient {
        &self.news
    }

    /// A new page whose session is restored from `store`
    pub fn portal(&self, store: Arc<dyn TokenStore>) -> Portal {
        Portal::new(self.config.options.clone(), store)
    }

    /// A new page with its news list already loaded
    pub async fn open(&self, store: Arc<dyn TokenStore>) -> Portal {
        let mut portal = self.portal(store);
        portal.load_news(&self.news).await;
        portal
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{resolve_session, AuthApi, SessionContext, SessionIdentity};
    pub use crate::config::{ClientOptions, PortalConfig};
    pub use crate::error::Error;
    pub use crate::forms::{Field, SubmitOutcome};
    pub use crate::pagination::{compute_page, PageState};
    pub use crate::portal::{Modal, Portal};
    pub use crate::store::{FileTokenStore, MemoryTokenStore, TokenStore};
    pub use crate::NewsPortal;
}
