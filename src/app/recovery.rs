//! Password recovery: request a one-time code, verify it, then set a new
//! password. The email and code travel between steps inside the page state.

use super::{App, Submission};
use crate::{
    error::Result,
    page::Page,
    validation::{FieldErrors, ForgotPasswordForm, ResetPasswordForm, VerifyOtpForm},
};
use tracing::instrument;

pub const OTP_SENT: &str = "A one-time code has been sent to your email.";
pub const OTP_VERIFIED: &str = "Code verified. Please choose a new password.";
pub const PASSWORD_RESET: &str = "Your password has been reset. Please log in.";
pub const MISSING_EMAIL: &str = "Email address is missing. Please restart password recovery.";

impl App {
    /// Requests a code for the form's email and moves to the verify page.
    ///
    /// # Errors
    /// Never fails locally; the `Result` matches the other actions.
    #[instrument(skip_all)]
    pub async fn request_otp(&mut self, form: &ForgotPasswordForm) -> Result<Submission> {
        self.field_errors.clear();
        if let Err(errors) = form.validate() {
            return Ok(self.reject(errors));
        }

        let request = form.request();
        self.loading.send_replace(true);
        let result = self.api.forgot_password(&request).await;
        self.loading.send_replace(false);

        match result {
            Ok(response) => {
                self.set_page(Page::VerifyOtp {
                    email: request.email,
                });
                self.flash
                    .success(response.message.unwrap_or_else(|| OTP_SENT.to_string()));
                Ok(Submission::Done)
            }
            Err(error) => Ok(self.fail(error)),
        }
    }

    /// Verifies the code for the email carried by the verify page.
    ///
    /// # Errors
    /// Never fails locally; the `Result` matches the other actions.
    #[instrument(skip_all)]
    pub async fn verify_otp(&mut self, form: &VerifyOtpForm) -> Result<Submission> {
        self.field_errors.clear();
        let email = self.page.email().to_string();
        if email.trim().is_empty() {
            return Ok(self.missing_email());
        }
        if let Err(errors) = form.validate() {
            return Ok(self.reject(errors));
        }

        let request = form.request(&email);
        self.loading.send_replace(true);
        let result = self.api.verify_otp(&request).await;
        self.loading.send_replace(false);

        match result {
            Ok(response) => {
                self.set_page(Page::ResetPassword {
                    email: request.email,
                    otp: request.otp,
                });
                self.flash
                    .success(response.message.unwrap_or_else(|| OTP_VERIFIED.to_string()));
                Ok(Submission::Done)
            }
            Err(error) => Ok(self.fail(error)),
        }
    }

    /// Sets the new password and returns to login. No session is created;
    /// the user has to log in with the new password.
    ///
    /// # Errors
    /// Never fails locally; the `Result` matches the other actions.
    #[instrument(skip_all)]
    pub async fn reset_password(&mut self, form: &ResetPasswordForm) -> Result<Submission> {
        self.field_errors.clear();
        let Page::ResetPassword { email, otp } = &self.page else {
            return Ok(self.missing_email());
        };
        if email.trim().is_empty() {
            return Ok(self.missing_email());
        }
        let request = form.request(email, otp);

        if let Err(errors) = form.validate(&self.password_policy) {
            return Ok(self.reject(errors));
        }

        self.loading.send_replace(true);
        let result = self.api.reset_password(&request).await;
        self.loading.send_replace(false);

        match result {
            Ok(response) => {
                self.set_page(Page::Login);
                self.flash
                    .success(response.message.unwrap_or_else(|| PASSWORD_RESET.to_string()));
                Ok(Submission::Done)
            }
            Err(error) => Ok(self.fail(error)),
        }
    }

    fn missing_email(&mut self) -> Submission {
        self.flash.error(MISSING_EMAIL);
        self.reject(FieldErrors::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::tests::{app, can_bind_localhost, flash_text, stored},
        session::MemoryTokenStore,
    };
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn full_recovery_flow_returns_to_login_without_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/forgot-password"))
            .and(body_json(json!({"email": "ada@school.test"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "OTP sent to email."})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .and(body_json(json!({"email": "ada@school.test", "otp": "123456"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "OTP verified."})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .and(body_json(json!({
                "email": "ada@school.test",
                "otp": "123456",
                "password": "NewSecret1!",
                "password_confirmation": "NewSecret1!"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"message": "Password reset successfully."}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::default();
        let mut app = app(&server, &store)?;
        app.initialize().await?;
        app.open_forgot_password();

        let outcome = app
            .request_otp(&ForgotPasswordForm::new(" ada@school.test "))
            .await?;
        assert!(outcome.is_done());
        assert_eq!(
            app.page(),
            &Page::VerifyOtp {
                email: "ada@school.test".to_string()
            }
        );
        assert_eq!(flash_text(&app), Some("OTP sent to email.".to_string()));

        let outcome = app.verify_otp(&VerifyOtpForm::new("123456")).await?;
        assert!(outcome.is_done());
        assert_eq!(
            app.page(),
            &Page::ResetPassword {
                email: "ada@school.test".to_string(),
                otp: "123456".to_string()
            }
        );

        let outcome = app
            .reset_password(&ResetPasswordForm::new("NewSecret1!", "NewSecret1!"))
            .await?;
        assert!(outcome.is_done());
        assert_eq!(app.page(), &Page::Login);
        assert_eq!(flash_text(&app), Some("Password reset successfully.".to_string()));
        assert!(!app.session().is_authenticated());
        assert_eq!(stored(&store), None);
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_otp_is_rejected_locally() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::default();
        let mut app = app(&server, &store)?;
        app.navigate(Page::VerifyOtp {
            email: "ada@school.test".to_string(),
        });

        let outcome = app.verify_otp(&VerifyOtpForm::new("12a456")).await?;
        assert_eq!(outcome, Submission::Invalid);
        assert_eq!(
            app.field_errors().get("otp"),
            Some("OTP must be exactly 6 digits.")
        );
        assert_eq!(
            app.page(),
            &Page::VerifyOtp {
                email: "ada@school.test".to_string()
            }
        );
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn expired_otp_keeps_verify_page() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": {"message": "The OTP has expired.", "code": "OTP_EXPIRED"}
            })))
            .mount(&server)
            .await;

        let store = MemoryTokenStore::default();
        let mut app = app(&server, &store)?;
        app.navigate(Page::VerifyOtp {
            email: "ada@school.test".to_string(),
        });

        let outcome = app.verify_otp(&VerifyOtpForm::new("123456")).await?;
        assert!(matches!(outcome, Submission::Failed(_)));
        assert_eq!(flash_text(&app), Some("The OTP has expired.".to_string()));
        assert_eq!(app.page().name(), "verify-otp");
        Ok(())
    }

    #[tokio::test]
    async fn verify_without_email_degrades_gracefully() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let store = MemoryTokenStore::default();
        let mut app = app(&server, &store)?;
        app.navigate(Page::VerifyOtp {
            email: String::new(),
        });

        let outcome = app.verify_otp(&VerifyOtpForm::new("123456")).await?;
        assert_eq!(outcome, Submission::Invalid);
        assert_eq!(flash_text(&app), Some(MISSING_EMAIL.to_string()));

        app.navigate(Page::Login);
        let outcome = app
            .reset_password(&ResetPasswordForm::new("NewSecret1!", "NewSecret1!"))
            .await?;
        assert_eq!(outcome, Submission::Invalid);
        Ok(())
    }

    #[tokio::test]
    async fn weak_password_is_rejected_before_reset() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = MemoryTokenStore::default();
        let mut app = app(&server, &store)?;
        app.navigate(Page::ResetPassword {
            email: "ada@school.test".to_string(),
            otp: "123456".to_string(),
        });

        let outcome = app
            .reset_password(&ResetPasswordForm::new("password1!", "password1!"))
            .await?;
        assert_eq!(outcome, Submission::Invalid);
        assert_eq!(
            app.field_errors().get("password"),
            Some("Password must contain at least an uppercase letter.")
        );
        server.verify().await;
        Ok(())
    }
}
