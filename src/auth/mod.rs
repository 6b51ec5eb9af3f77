//! Login, registration and session identity

mod session;
mod types;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::guard::RequestGuard;

pub use session::*;
pub use types::*;

/// The authentication endpoints, as seen by the forms
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, request: &LoginRequest) -> Result<String, Error>;

    /// Create an account; the user logs in separately afterwards
    async fn register(&self, request: &RegisterRequest) -> Result<(), Error>;
}

/// Client for the portal authentication endpoints
pub struct Auth {
    config: Arc<PortalConfig>,
    client: Client,
    login_guard: RequestGuard,
    register_guard: RequestGuard,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(config: Arc<PortalConfig>, client: Client) -> Self {
        Self {
            config,
            client,
            login_guard: RequestGuard::new(),
            register_guard: RequestGuard::new(),
        }
    }

    /// Sign in with email and password, returning the issued token
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, Error> {
        self.login(&LoginRequest::new(email, password)).await
    }

    /// Register a regular account
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<(), Error> {
        self.register(&RegisterRequest::new(username, email, password))
            .await
    }
}

#[async_trait]
impl AuthApi for Auth {
    async fn login(&self, request: &LoginRequest) -> Result<String, Error> {
        let _in_flight = self.login_guard.begin()?;
        let url = self.config.endpoint("/auth/login");
        debug!("Logging in {}", request.email);

        let response = Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.config.options.client_info)
            .json(request)?
            .execute::<LoginResponse>()
            .await?;

        match response.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                info!("Login accepted for {}", request.email);
                Ok(token)
            }
            None => Err(Error::MissingToken {
                message: response.message.filter(|m| !m.is_empty()),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), Error> {
        let _in_flight = self.register_guard.begin()?;
        let url = self.config.endpoint("/auth/register");
        debug!("Registering {}", request.email);

        Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.config.options.client_info)
            .json(request)?
            .execute_empty()
            .await?;

        info!("Registration accepted for {}", request.email);
        Ok(())
    }
}
