//! Request and response bodies of the authentication endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /auth/login`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The account email
    pub email: String,

    /// The account password
    pub password: String,
}

impl LoginRequest {
    /// Build a login body
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `POST /auth/login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The session token; a success without it counts as a rejection
    pub token: Option<String>,

    /// Message the API may attach to the response
    pub message: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// The display name chosen by the user
    pub username: String,

    /// The account email
    pub email: String,

    /// The account password
    pub password: String,

    /// Self-registration never grants admin rights
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl RegisterRequest {
    /// Build a registration body for a regular (non-admin) account
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_admin: false,
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}
