use super::{open, output};
use crate::{
    app::Submission,
    cli::globals::GlobalArgs,
    page::Page,
    validation::{ChangePasswordForm, ForgotPasswordForm, ResetPasswordForm, VerifyOtpForm},
};
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct ForgotArgs {
    pub globals: GlobalArgs,
    pub email: String,
}

#[derive(Debug)]
pub struct ResetArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub otp: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
}

#[derive(Debug)]
pub struct ChangeArgs {
    pub globals: GlobalArgs,
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub new_password_confirmation: SecretString,
}

/// # Errors
/// Returns an error if the email is invalid or the request is rejected.
pub async fn forgot(args: ForgotArgs) -> Result<()> {
    let mut app = open(&args.globals)?;
    app.open_forgot_password();

    let outcome = app.request_otp(&ForgotPasswordForm::new(args.email)).await?;
    output::finish(&app, outcome)
}

/// Verifies the code, then sets the new password. Both passwords are checked
/// before the code is sent, and the reset request only follows an accepted
/// code.
///
/// # Errors
/// Returns an error if the input is invalid or either step does not complete.
pub async fn reset(args: ResetArgs) -> Result<()> {
    let mut app = open(&args.globals)?;

    let form = ResetPasswordForm::new(
        args.password.expose_secret(),
        args.password_confirmation.expose_secret(),
    );
    if let Err(errors) = form.validate(app.password_policy()) {
        return output::rejected(&errors);
    }

    app.navigate(Page::VerifyOtp {
        email: args.email.trim().to_string(),
    });

    let outcome = app.verify_otp(&VerifyOtpForm::new(args.otp)).await?;
    if outcome != Submission::Done {
        return output::finish(&app, outcome);
    }

    let outcome = app.reset_password(&form).await?;
    output::finish(&app, outcome)
}

/// Changes the password of the signed-in user; the stored token is removed
/// on success.
///
/// # Errors
/// Returns an error when nobody is signed in or the change is rejected.
pub async fn change(args: ChangeArgs) -> Result<()> {
    let mut app = open(&args.globals)?;
    app.initialize().await?;
    app.open_profile_settings();
    if app.page() != &Page::ProfileSettings {
        output::notice(&app);
        bail!("not logged in");
    }

    let form = ChangePasswordForm::new(
        args.current_password.expose_secret(),
        args.new_password.expose_secret(),
        args.new_password_confirmation.expose_secret(),
    );
    let outcome = app.change_password(&form).await?;
    output::finish(&app, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::{fs, net::TcpListener, path::Path, time::Duration};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn globals(server: &MockServer, token_file: &Path) -> GlobalArgs {
        GlobalArgs {
            api_url: server.uri(),
            token_file: Some(token_file.to_path_buf()),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn forgot_password_rejects_invalid_email_locally() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;

        Mock::given(method("POST"))
            .and(path("/forgot-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = forgot(ForgotArgs {
            globals: globals(&server, &dir.path().join("auth_token")),
            email: "not-an-email".to_string(),
        })
        .await;

        assert!(result.is_err());
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn reset_stops_when_code_is_rejected() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .and(body_json(json!({"email": "ada@school.tld", "otp": "123456"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": {"message": "Invalid OTP.", "code": "INVALID_OTP"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = reset(ResetArgs {
            globals: globals(&server, &dir.path().join("auth_token")),
            email: "ada@school.tld".to_string(),
            otp: "123456".to_string(),
            password: SecretString::from("NewSecret1!"),
            password_confirmation: SecretString::from("NewSecret1!"),
        })
        .await;

        assert_eq!(
            result.map_err(|e| e.to_string()).err(),
            Some("Invalid OTP.".to_string())
        );
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn reset_rejects_weak_password_before_verifying_code() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = reset(ResetArgs {
            globals: globals(&server, &dir.path().join("auth_token")),
            email: "ada@school.tld".to_string(),
            otp: "123456".to_string(),
            password: SecretString::from("weak"),
            password_confirmation: SecretString::from("weak"),
        })
        .await;

        assert_eq!(
            result.map_err(|e| e.to_string()).err(),
            Some("invalid input".to_string())
        );
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn reset_sends_both_steps() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "OTP verified."})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .and(body_json(json!({
                "email": "ada@school.tld",
                "otp": "123456",
                "password": "NewSecret1!",
                "password_confirmation": "NewSecret1!"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Password reset."})))
            .expect(1)
            .mount(&server)
            .await;

        reset(ResetArgs {
            globals: globals(&server, &dir.path().join("auth_token")),
            email: "ada@school.tld".to_string(),
            otp: "123456".to_string(),
            password: SecretString::from("NewSecret1!"),
            password_confirmation: SecretString::from("NewSecret1!"),
        })
        .await?;

        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn change_password_removes_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;
        let token_file = dir.path().join("auth_token");
        fs::write(&token_file, "tok-123")?;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "name": "Ada", "email": "ada@school.tld", "role": "student"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/profile/reset-password"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        change(ChangeArgs {
            globals: globals(&server, &token_file),
            current_password: SecretString::from("OldSecret1!"),
            new_password: SecretString::from("NewSecret1!"),
            new_password_confirmation: SecretString::from("NewSecret1!"),
        })
        .await?;

        assert!(!token_file.exists());
        server.verify().await;
        Ok(())
    }

    #[tokio::test]
    async fn change_password_requires_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        let dir = tempfile::tempdir()?;

        Mock::given(method("POST"))
            .and(path("/profile/reset-password"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = change(ChangeArgs {
            globals: globals(&server, &dir.path().join("auth_token")),
            current_password: SecretString::from("OldSecret1!"),
            new_password: SecretString::from("NewSecret1!"),
            new_password_confirmation: SecretString::from("NewSecret1!"),
        })
        .await;

        assert!(result.is_err());
        server.verify().await;
        Ok(())
    }
}
