use super::{App, Submission, SESSION_EXPIRED};
use crate::{error::Result, page::Page, validation::ChangePasswordForm};
use tracing::instrument;

pub const PASSWORD_CHANGED: &str = "Password changed successfully. Please log in again.";

impl App {
    /// Changes the signed-in user's password. Success ends the session so the
    /// user has to log in again with the new password.
    ///
    /// # Errors
    /// Returns an error if the stored token cannot be removed.
    #[instrument(skip_all)]
    pub async fn change_password(&mut self, form: &ChangePasswordForm) -> Result<Submission> {
        self.field_errors.clear();

        let Some(token) = self.session.token().cloned() else {
            self.session.clear()?;
            self.navigate(Page::Login);
            self.flash.info(SESSION_EXPIRED);
            return Ok(Submission::Invalid);
        };

        if let Err(errors) = form.validate(&self.password_policy) {
            return Ok(self.reject(errors));
        }

        self.loading.send_replace(true);
        let result = self.api.change_password(&form.request(), &token).await;
        self.loading.send_replace(false);

        match result {
            Ok(response) => {
                self.session.clear()?;
                self.navigate(Page::Login);
                self.flash
                    .success(response.message.unwrap_or_else(|| PASSWORD_CHANGED.to_string()));
                Ok(Submission::Done)
            }
            Err(error) => Ok(self.fail(error)),
        }
    }
}
