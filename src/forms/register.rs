use super::{
    rejection_message, Field, FormErrors, FormPhase, SubmitOutcome, CONFIRMATION_REQUIRED,
    EMAIL_REQUIRED, NAME_REQUIRED, PASSWORDS_DIFFER, PASSWORD_REQUIRED,
};
use crate::auth::{AuthApi, RegisterRequest};
use crate::error::Error;

const REGISTRATION_FAILED: &str = "Registration failed.";

/// The registration modal's form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
    errors: FormErrors,
    phase: FormPhase,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Change a field and clear its error
    pub fn edit(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.to_string();
        self.errors.clear_field(field);
        self.phase = FormPhase::Editing;
    }

    /// Check required fields and the password confirmation
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        if self.username.is_empty() {
            errors.set_field(Field::Username, NAME_REQUIRED);
        }
        if self.email.is_empty() {
            errors.set_field(Field::Email, EMAIL_REQUIRED);
        }
        if self.password.is_empty() {
            errors.set_field(Field::Password, PASSWORD_REQUIRED);
        }
        if self.confirm_password.is_empty() {
            errors.set_field(Field::ConfirmPassword, CONFIRMATION_REQUIRED);
        }
        if self.password != self.confirm_password {
            errors.set_field(Field::ConfirmPassword, PASSWORDS_DIFFER);
        }
        errors
    }

    /// Validate, then create the account.
    ///
    /// Success does not log the user in.
    pub async fn submit(&mut self, api: &dyn AuthApi) -> SubmitOutcome {
        self.phase = FormPhase::Validating;
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            self.phase = FormPhase::Editing;
            return SubmitOutcome::Invalid;
        }

        self.phase = FormPhase::Submitting;
        let request = RegisterRequest::new(&self.username, &self.email, &self.password);
        match api.register(&request).await {
            Ok(()) => {
                self.reset();
                self.phase = FormPhase::Success;
                SubmitOutcome::Registered
            }
            Err(Error::RequestInFlight) => {
                self.phase = FormPhase::Editing;
                SubmitOutcome::Busy
            }
            Err(e) => {
                self.errors.clear();
                self.errors
                    .set_general(&rejection_message(&e, REGISTRATION_FAILED));
                self.phase = FormPhase::Rejected;
                SubmitOutcome::Rejected
            }
        }
    }

    /// Empty every field and message
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
