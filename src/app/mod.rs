//! Application controller. `App` owns the session, the current page, the
//! flash subsystem and the field errors of the active form, and exposes one
//! async method per user action. Each action validates its form, issues at
//! most one request per step, and moves the page according to the result.
//!
//! Flow overview: a stored token is checked once through `/user`; login
//! stores the token and enters the dashboard; password recovery walks
//! forgot-password, verify-otp and reset-password before returning to login
//! without a session; a password change from profile settings ends the
//! session.

mod profile;
mod recovery;

use crate::{
    api::{ApiClient, ApiError, User},
    config::AppConfig,
    dashboard::Dashboard,
    error::Result,
    flash::Flash,
    page::{destination_for, Page},
    session::{Session, TokenStore},
    validation::{FieldErrors, LoginForm, PasswordPolicy},
};
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const UNRECOGNIZED_ROLE: &str =
    "Your account role is not recognized. Please contact an administrator.";
pub const LOGGED_OUT: &str = "You have been logged out.";

/// Outcome of a submitted form.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Local validation failed; no request was sent.
    Invalid,
    /// The request was sent and the API reported an error.
    Failed(ApiError),
    Done,
}

impl Submission {
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

pub struct App {
    api: ApiClient,
    session: Session,
    page: Page,
    flash: Flash,
    field_errors: FieldErrors,
    password_policy: PasswordPolicy,
    loading: watch::Sender<bool>,
    initialized: bool,
}

impl App {
    /// Builds the controller and restores the stored token. The page stays
    /// [`Page::Loading`] until [`App::initialize`] runs.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the token store
    /// cannot be read.
    pub fn new(config: &AppConfig, store: Box<dyn TokenStore>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            session: Session::restore(store)?,
            page: Page::Loading,
            flash: Flash::new(config.flash_timeout),
            field_errors: FieldErrors::new(),
            password_policy: config.password_policy,
            loading: watch::channel(false).0,
            initialized: false,
        })
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// True while a request issued by an action is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver that observes the loading flag while an action holds the
    /// controller.
    #[must_use]
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    #[must_use]
    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Dashboard content for the signed-in user while on the dashboard page.
    #[must_use]
    pub fn dashboard(&self) -> Option<Dashboard> {
        if self.page != Page::Dashboard {
            return None;
        }
        self.session.user().and_then(Dashboard::for_user)
    }

    /// Resolves the initial page. With a stored token the user is fetched
    /// from `/user`; a rejected token is cleared. Runs at most once per `App`,
    /// later calls return without touching the network.
    ///
    /// # Errors
    /// Returns an error if a rejected token cannot be removed from storage.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            debug!("session check already performed");
            return Ok(());
        }
        self.initialized = true;

        let Some(token) = self.session.token().cloned() else {
            self.set_page(Page::Login);
            return Ok(());
        };

        self.loading.send_replace(true);
        let result = self.api.fetch_user(&token).await;
        self.loading.send_replace(false);

        match result {
            Ok(user) => self.enter(user),
            Err(error) => {
                info!("stored token rejected: {}", error.message);
                self.session.clear()?;
                self.set_page(Page::Login);
                self.flash.info(SESSION_EXPIRED);
                Ok(())
            }
        }
    }

    /// Moves to `page` and discards the field errors of the previous form.
    /// Pages behind the session fall back to login when nobody is signed in.
    pub fn navigate(&mut self, page: Page) {
        self.field_errors.clear();
        if page.requires_session() && !self.session.is_authenticated() {
            self.set_page(Page::Login);
        } else {
            self.set_page(page);
        }
    }

    /// Goes to the page before the current one, dropping any handoff data.
    pub fn back(&mut self) {
        if let Some(page) = self.page.back() {
            self.navigate(page);
        }
    }

    pub fn open_forgot_password(&mut self) {
        self.navigate(Page::ForgotPassword);
    }

    /// Opens profile settings, or the login page when nobody is signed in.
    pub fn open_profile_settings(&mut self) {
        self.navigate(Page::ProfileSettings);
    }

    /// # Errors
    /// Returns an error if the token cannot be stored.
    #[instrument(skip_all)]
    pub async fn login(&mut self, form: &LoginForm) -> Result<Submission> {
        self.field_errors.clear();
        if let Err(errors) = form.validate() {
            return Ok(self.reject(errors));
        }

        self.loading.send_replace(true);
        let result = self.api.login(&form.request()).await;
        self.loading.send_replace(false);

        let response = match result {
            Ok(response) => response,
            Err(error) => return Ok(self.fail(error)),
        };

        if destination_for(response.user.role.as_deref()) != Page::Dashboard {
            warn!("login for user with unrecognized role {:?}", response.user.role);
            return Ok(self.fail(ApiError::new(UNRECOGNIZED_ROLE).with_code("UNRECOGNIZED_ROLE")));
        }

        self.session
            .establish(SecretString::from(response.access_token), response.user)?;
        self.set_page(Page::Dashboard);
        self.flash.success(LOGIN_SUCCESS);
        Ok(Submission::Done)
    }

    /// Ends the session locally and returns to the login page.
    ///
    /// # Errors
    /// Returns an error if the stored token cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.session.clear()?;
        self.navigate(Page::Login);
        self.flash.info(LOGGED_OUT);
        Ok(())
    }

    fn enter(&mut self, user: User) -> Result<()> {
        if destination_for(user.role.as_deref()) == Page::Dashboard && self.session.attach_user(user)
        {
            self.set_page(Page::Dashboard);
            return Ok(());
        }

        self.session.clear()?;
        self.set_page(Page::Login);
        self.flash.error(UNRECOGNIZED_ROLE);
        Ok(())
    }

    fn set_page(&mut self, page: Page) {
        debug!("page {} -> {}", self.page, page);
        self.page = page;
    }

    fn reject(&mut self, errors: FieldErrors) -> Submission {
        debug!("form rejected with {} field error(s)", errors.len());
        self.field_errors = errors;
        Submission::Invalid
    }

    fn fail(&mut self, error: ApiError) -> Submission {
        warn!("request failed ({:?}): {}", error.code, error.message);
        if error.is_validation() {
            if let Some(details) = &error.details {
                self.field_errors = FieldErrors::from_details(details);
            }
        }
        self.flash.error(error.message.clone());
        Submission::Failed(error)
    }
}
