//! Page-level view state of the portal.
//!
//! [`Portal`] owns everything the page shows and is only mutated through
//! `&mut self`, so at most one event is processed at a time. The session is
//! an explicit [`SessionContext`] handed to the forms, not global state.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::auth::{AuthApi, SessionContext, SessionIdentity};
use crate::config::ClientOptions;
use crate::error::Error;
use crate::forms::{Field, LoginForm, RegisterForm, SubmitOutcome};
use crate::news::{Item, NewsClient};
use crate::pagination::{PageState, Paginator};
use crate::store::TokenStore;
use crate::view::{warning_banner, HeaderView, ItemCard, PaginationBar};

/// Which modal dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Register,
}

/// The portal page
pub struct Portal {
    options: ClientOptions,
    items: Vec<Item>,
    warning: Option<String>,
    loaded: bool,
    paginator: Paginator,
    session: SessionContext,
    modal: Option<Modal>,
    login: LoginForm,
    register: RegisterForm,
}

impl Portal {
    /// A fresh page; the session is restored from `store` once
    pub fn new(options: ClientOptions, store: Arc<dyn TokenStore>) -> Self {
        let session = SessionContext::restore(store, &options.token_key);
        Self::with_session(options, session)
    }

    /// A fresh page around an existing session context
    pub fn with_session(options: ClientOptions, session: SessionContext) -> Self {
        Self {
            paginator: Paginator::new(options.page_size),
            options,
            items: Vec::new(),
            warning: None,
            loaded: false,
            session,
            modal: None,
            login: LoginForm::new(),
            register: RegisterForm::new(),
        }
    }

    /// Fetch the news list and replace the current one.
    ///
    /// Failures never propagate: the list becomes empty and a warning is kept
    /// for the banner. A fetch already pending elsewhere leaves the page as is.
    pub async fn load_news(&mut self, news: &NewsClient) {
        match news.list().await {
            Ok(items) => {
                self.warning = None;
                self.loaded = true;
                self.replace_items(items);
            }
            Err(Error::RequestInFlight) => {
                debug!("News fetch already pending; keeping the current list");
            }
            Err(e) => {
                warn!("Could not load news: {}", e);
                self.warning = Some(e.to_string());
                self.loaded = true;
                self.replace_items(Vec::new());
            }
        }
    }

    /// Whether a fetch has settled, successfully or not.
    ///
    /// `false` means the list is empty because nothing has arrived yet, not
    /// because the portal has no news.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the item list wholesale, keeping the page in range
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.paginator.set_total_items(self.items.len());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Why the last load produced no data
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn warning_banner(&self) -> Option<String> {
        self.warning.as_deref().map(warning_banner)
    }

    pub fn page(&self) -> PageState {
        self.paginator.state()
    }

    /// Items on the current page
    pub fn current_items(&self) -> &[Item] {
        self.page().slice(&self.items)
    }

    pub fn cards(&self) -> Vec<ItemCard> {
        self.current_items()
            .iter()
            .map(|item| ItemCard::from_item(item, &self.options))
            .collect()
    }

    pub fn pagination_bar(&self) -> Option<PaginationBar> {
        PaginationBar::for_page(&self.page())
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.paginator.go_to(page)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.session.identity()
    }

    pub fn header(&self) -> HeaderView {
        HeaderView::for_identity(self.session.identity())
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    /// Close the open modal, discarding both forms
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.login.reset();
        self.register.reset();
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn register_form(&self) -> &RegisterForm {
        &self.register
    }

    /// Type into the form of `modal`
    pub fn edit(&mut self, modal: Modal, field: Field, value: &str) {
        match modal {
            Modal::Login => self.login.edit(field, value),
            Modal::Register => self.register.edit(field, value),
        }
    }

    /// Submit the login form; the modal closes on success
    pub async fn submit_login(&mut self, api: &dyn AuthApi) -> SubmitOutcome {
        let outcome = self.login.submit(api, &mut self.session).await;
        if matches!(outcome, SubmitOutcome::LoggedIn(_)) {
            self.close_modal();
        }
        outcome
    }

    /// Submit the registration form; the modal closes on success
    pub async fn submit_register(&mut self, api: &dyn AuthApi) -> SubmitOutcome {
        let outcome = self.register.submit(api).await;
        if outcome == SubmitOutcome::Registered {
            info!("Account created; waiting for the user to log in");
            self.close_modal();
        }
        outcome
    }

    /// End the session
    pub fn logout(&mut self) -> Result<(), Error> {
        self.session.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::mock::{MockAuth, Reply};
    use crate::store::MemoryTokenStore;
    use serde_json::json;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({ "_id": i.to_string(), "titulo": format!("News {}", i) }))
                    .unwrap()
            })
            .collect()
    }

    fn portal() -> Portal {
        Portal::new(ClientOptions::default(), Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn paginates_replaced_items() {
        let mut portal = portal();
        portal.replace_items(items(20));

        assert_eq!(portal.cards().len(), 9);
        assert!(portal.go_to_page(3));
        let ids: Vec<_> = portal.current_items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["18", "19"]);
        assert!(!portal.next_page());

        portal.replace_items(items(5));
        assert_eq!(portal.page().current_page, 1);
        assert!(portal.pagination_bar().is_none());
    }

    #[tokio::test]
    async fn invalid_login_keeps_modal_open() {
        let api = MockAuth::new(Reply::Ok);
        let mut portal = portal();
        portal.open_modal(Modal::Login);

        assert_eq!(portal.submit_login(&api).await, SubmitOutcome::Invalid);
        assert_eq!(portal.modal(), Some(Modal::Login));
        assert_eq!(portal.login_form().errors().field_count(), 2);

        portal.close_modal();
        assert!(portal.login_form().errors().is_empty());
        assert_eq!(portal.modal(), None);
    }

    #[tokio::test]
    async fn registration_closes_modal_without_logging_in() {
        let api = MockAuth::new(Reply::Ok);
        let mut portal = portal();
        portal.open_modal(Modal::Register);
        portal.edit(Modal::Register, Field::Username, "Ana");
        portal.edit(Modal::Register, Field::Email, "ana@example.com");
        portal.edit(Modal::Register, Field::Password, "pw");
        portal.edit(Modal::Register, Field::ConfirmPassword, "pw");

        assert_eq!(portal.submit_register(&api).await, SubmitOutcome::Registered);
        assert_eq!(portal.modal(), None);
        assert!(portal.identity().is_none());
        assert!(portal.header().show_login);
    }
}
