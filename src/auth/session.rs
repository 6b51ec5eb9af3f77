//! Session identity decoded from the persisted token

use jsonwebtoken::{DecodingKey, Validation};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::Error;
use crate::store::TokenStore;

/// Who is logged in, as far as the page can tell.
///
/// Decoded without verifying the token signature, so it is only fit for
/// display. Authorization is always decided by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    /// `username` claim, or `email` when there is no username
    pub display_name: String,

    /// `isAdmin` claim, false when absent
    pub is_admin: bool,

    /// Every claim carried by the token
    pub claims: Map<String, Value>,
}

impl SessionIdentity {
    /// Read a string claim
    pub fn claim_str(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(Value::as_str)
    }
}

/// Decode the claims of a JWT without checking its signature or expiry
pub fn decode_claims(token: &str) -> Result<Map<String, Value>, Error> {
    let header = jsonwebtoken::decode_header(token)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )?;
    Ok(data.claims)
}

/// Turn a raw token into an identity.
///
/// Absent, malformed, or nameless tokens all yield `None`.
///
/// A token that decodes but carries neither a non-empty `username` nor a
/// non-empty `email` claim counts as anonymous: there is nothing to greet the
/// user with, so its other claims, `isAdmin` included, are ignored.
pub fn resolve_session(raw_token: Option<&str>) -> Option<SessionIdentity> {
    let token = raw_token?.trim();
    if token.is_empty() {
        return None;
    }

    let claims = match decode_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Ignoring undecodable session token: {}", e);
            return None;
        }
    };

    let non_empty = |name: &str| {
        claims
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };
    let display_name = non_empty("username").or_else(|| non_empty("email"))?;
    let is_admin = claims.get("isAdmin").and_then(Value::as_bool).unwrap_or(false);

    Some(SessionIdentity {
        display_name,
        is_admin,
        claims,
    })
}

/// The current user, passed explicitly to whatever needs it
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
    token_key: String,
    identity: Option<SessionIdentity>,
}

impl SessionContext {
    /// A context with nobody logged in; the store is not read
    pub fn anonymous(store: Arc<dyn TokenStore>, token_key: &str) -> Self {
        Self {
            store,
            token_key: token_key.to_string(),
            identity: None,
        }
    }

    /// Read the persisted token once and resolve it
    pub fn restore(store: Arc<dyn TokenStore>, token_key: &str) -> Self {
        let mut context = Self::anonymous(store, token_key);
        match context.store.get(&context.token_key) {
            Ok(token) => context.identity = resolve_session(token.as_deref()),
            Err(e) => warn!("Could not read the stored session: {}", e),
        }
        if let Some(identity) = &context.identity {
            info!("Restored session for {}", identity.display_name);
        }
        context
    }

    /// The current identity, if any
    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    /// Whether someone is logged in
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Persist a freshly issued token and resolve the identity it carries
    pub fn establish(&mut self, token: &str) -> Result<Option<&SessionIdentity>, Error> {
        self.store.set(&self.token_key, token)?;
        self.identity = resolve_session(Some(token));
        match &self.identity {
            Some(identity) => info!("Logged in as {}", identity.display_name),
            None => warn!("Issued token carries no displayable identity"),
        }
        Ok(self.identity.as_ref())
    }

    /// Forget the identity and remove the persisted token
    pub fn logout(&mut self) -> Result<(), Error> {
        self.identity = None;
        self.store.remove(&self.token_key)?;
        info!("Logged out");
        Ok(())
    }
}
