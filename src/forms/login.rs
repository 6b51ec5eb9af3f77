use log::{debug, warn};

use super::{
    rejection_message, Field, FormErrors, FormPhase, SubmitOutcome, EMAIL_REQUIRED,
    PASSWORD_REQUIRED, SESSION_NOT_SAVED,
};
use crate::auth::{AuthApi, LoginRequest, SessionContext};
use crate::error::Error;

const LOGIN_FAILED: &str = "Login failed.";

/// The login modal's form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: String,
    password: String,
    errors: FormErrors,
    phase: FormPhase,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Change a field and clear its error.
    ///
    /// Fields the login form does not have are ignored.
    pub fn edit(&mut self, field: Field, value: &str) {
        match field {
            Field::Email => self.email = value.to_string(),
            Field::Password => self.password = value.to_string(),
            other => {
                debug!("Login form has no {} field", other);
                return;
            }
        }
        self.errors.clear_field(field);
        self.phase = FormPhase::Editing;
    }

    /// Check required fields without touching the network
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        if self.email.is_empty() {
            errors.set_field(Field::Email, EMAIL_REQUIRED);
        }
        if self.password.is_empty() {
            errors.set_field(Field::Password, PASSWORD_REQUIRED);
        }
        errors
    }

    /// Validate, then log in and establish the session on success
    pub async fn submit(
        &mut self,
        api: &dyn AuthApi,
        session: &mut SessionContext,
    ) -> SubmitOutcome {
        self.phase = FormPhase::Validating;
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            self.phase = FormPhase::Editing;
            return SubmitOutcome::Invalid;
        }

        self.phase = FormPhase::Submitting;
        let request = LoginRequest::new(&self.email, &self.password);
        let token = match api.login(&request).await {
            Ok(token) => token,
            Err(Error::RequestInFlight) => {
                self.phase = FormPhase::Editing;
                return SubmitOutcome::Busy;
            }
            Err(e) => return self.reject(&rejection_message(&e, LOGIN_FAILED)),
        };

        match session.establish(&token) {
            Ok(identity) => {
                let identity = identity.cloned();
                self.reset();
                self.phase = FormPhase::Success;
                SubmitOutcome::LoggedIn(identity)
            }
            Err(e) => {
                warn!("Could not persist the session token: {}", e);
                self.reject(SESSION_NOT_SAVED)
            }
        }
    }

    /// Empty every field and message
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn reject(&mut self, message: &str) -> SubmitOutcome {
        self.errors.clear();
        self.errors.set_general(message);
        self.phase = FormPhase::Rejected;
        SubmitOutcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::mock::{MockAuth, Reply};
    use crate::store::{MemoryTokenStore, TokenStore};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::sync::Arc;

    fn session() -> (Arc<MemoryTokenStore>, SessionContext) {
        let store = Arc::new(MemoryTokenStore::new());
        let context = SessionContext::anonymous(store.clone(), "token");
        (store, context)
    }

    #[tokio::test]
    async fn empty_submit_sets_two_errors_and_sends_nothing() {
        let api = MockAuth::new(Reply::Ok);
        let (_store, mut session) = session();
        let mut form = LoginForm::new();

        let outcome = form.submit(&api, &mut session).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(form.errors().field_count(), 2);
        assert_eq!(form.errors().field(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(form.errors().field(Field::Password), Some(PASSWORD_REQUIRED));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn editing_email_clears_only_its_error() {
        let api = MockAuth::new(Reply::Ok);
        let (_store, mut session) = session();
        let mut form = LoginForm::new();
        form.submit(&api, &mut session).await;

        form.edit(Field::Email, "ana@example.com");

        assert_eq!(form.errors().field(Field::Email), None);
        assert_eq!(form.errors().field(Field::Password), Some(PASSWORD_REQUIRED));
    }

    #[tokio::test]
    async fn successful_login_persists_token_and_resets() {
        let token = encode(
            &Header::default(),
            &json!({ "username": "ana", "isAdmin": true }),
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap();
        let api = MockAuth::new(Reply::Token(token.clone()));
        let (store, mut session) = session();
        let mut form = LoginForm::new();
        form.edit(Field::Email, "ana@example.com");
        form.edit(Field::Password, "pw");

        let outcome = form.submit(&api, &mut session).await;

        match outcome {
            SubmitOutcome::LoggedIn(Some(identity)) => {
                assert_eq!(identity.display_name, "ana");
                assert!(identity.is_admin);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(api.calls(), 1);
        assert_eq!(store.get("token").unwrap(), Some(token));
        assert_eq!(form.email(), "");
        assert_eq!(form.phase(), FormPhase::Success);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn api_rejection_sets_general_error() {
        let api = MockAuth::new(Reply::Api(401, Some("Invalid credentials")));
        let (store, mut session) = session();
        let mut form = LoginForm::new();
        form.edit(Field::Email, "ana@example.com");
        form.edit(Field::Password, "wrong");

        assert_eq!(form.submit(&api, &mut session).await, SubmitOutcome::Rejected);
        assert_eq!(form.errors().general(), Some("Invalid credentials"));
        assert_eq!(form.phase(), FormPhase::Rejected);
        assert_eq!(form.email(), "ana@example.com");
        assert_eq!(store.get("token").unwrap(), None);

        form.edit(Field::Password, "right");
        assert_eq!(form.errors().general(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn missing_token_uses_fallback_message() {
        let api = MockAuth::new(Reply::Ok);
        let (_store, mut session) = session();
        let mut form = LoginForm::new();
        form.edit(Field::Email, "ana@example.com");
        form.edit(Field::Password, "pw");

        assert_eq!(form.submit(&api, &mut session).await, SubmitOutcome::Rejected);
        assert_eq!(form.errors().general(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn busy_api_leaves_form_untouched() {
        let api = MockAuth::new(Reply::InFlight);
        let (_store, mut session) = session();
        let mut form = LoginForm::new();
        form.edit(Field::Email, "ana@example.com");
        form.edit(Field::Password, "pw");

        assert_eq!(form.submit(&api, &mut session).await, SubmitOutcome::Busy);
        assert!(form.errors().is_empty());
        assert_eq!(form.email(), "ana@example.com");
    }
}
