//! Login and registration form state
//!
//! Each form moves `Editing -> Validating -> Submitting -> Success | Rejected`,
//! falling back to `Editing` when local validation fails. Local validation
//! never touches the network; a valid submit issues exactly one request.

mod login;
mod register;

use log::warn;
use std::collections::BTreeMap;
use std::fmt;

use crate::auth::SessionIdentity;
use crate::error::Error;

pub use login::LoginForm;
pub use register::RegisterForm;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const NAME_REQUIRED: &str = "Name is required";
pub const CONFIRMATION_REQUIRED: &str = "Please confirm the password";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const CONNECTION_FAILED: &str = "Could not connect to the server.";
pub const SESSION_NOT_SAVED: &str = "Could not save the session.";

/// An input of one of the forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        };
        f.write_str(name)
    }
}

/// Where a form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Success,
    Rejected,
}

/// Per-field messages plus one general message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<Field, String>,
    general: Option<String>,
}

impl FormErrors {
    /// The message attached to `field`
    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The message that is not tied to a field
    pub fn general(&self) -> Option<&str> {
        self.general.as_deref()
    }

    /// Number of fields carrying a message
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether there is no message at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    /// Attach `message` to `field`, replacing any previous one
    pub fn set_field(&mut self, field: Field, message: &str) {
        self.fields.insert(field, message.to_string());
    }

    /// Drop the message of `field`, leaving the others and the general one
    pub fn clear_field(&mut self, field: Field) {
        self.fields.remove(&field);
    }

    pub fn set_general(&mut self, message: &str) {
        self.general = Some(message.to_string());
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.general = None;
    }
}

/// What a submit attempt ended in
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; field errors are set and nothing was sent
    Invalid,
    /// The API refused; the general error is set
    Rejected,
    /// An identical request is still pending; the form is unchanged
    Busy,
    /// Login succeeded; the identity decoded from the new token, if any
    LoggedIn(Option<SessionIdentity>),
    /// Registration succeeded; the user now has to log in
    Registered,
}

/// The general message shown for a failed request
pub(crate) fn rejection_message(error: &Error, fallback: &str) -> String {
    if let Some(message) = error.api_message() {
        return message.to_string();
    }
    if error.is_transport() {
        return CONNECTION_FAILED.to_string();
    }
    warn!("Request failed: {}", error);
    fallback.to_string()
}
