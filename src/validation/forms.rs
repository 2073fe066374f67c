//! Form state for each page and the field chains that guard submission.
//! Password fields are plain strings only for the duration of a submission;
//! the forms do not implement `Debug`.

use super::{FieldErrors, PasswordPolicy, Rule, OTP_LENGTH};
use crate::api::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};

#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    /// Returns the first failure of each invalid field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        FieldErrors::new()
            .check("email", "Email", &self.email, &[Rule::Required, Rule::Email])
            .check("password", "Password", &self.password, &[Rule::Required])
            .into_result()
    }

    #[must_use]
    pub fn request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// # Errors
    /// Returns the failure of the email field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        FieldErrors::new()
            .check("email", "Email", &self.email, &[Rule::Required, Rule::Email])
            .into_result()
    }

    #[must_use]
    pub fn request(&self) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct VerifyOtpForm {
    pub otp: String,
}

impl VerifyOtpForm {
    #[must_use]
    pub fn new(otp: impl Into<String>) -> Self {
        Self { otp: otp.into() }
    }

    /// # Errors
    /// Returns the failure of the OTP field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        FieldErrors::new()
            .check(
                "otp",
                "OTP",
                self.otp.trim(),
                &[Rule::Required, Rule::NumericLength(OTP_LENGTH)],
            )
            .into_result()
    }

    #[must_use]
    pub fn request(&self, email: &str) -> VerifyOtpRequest {
        VerifyOtpRequest {
            email: email.to_string(),
            otp: self.otp.trim().to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub password_confirmation: String,
}

impl ResetPasswordForm {
    #[must_use]
    pub fn new(password: impl Into<String>, password_confirmation: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }

    /// # Errors
    /// Returns the first failure of each invalid field.
    pub fn validate(&self, policy: &PasswordPolicy) -> Result<(), FieldErrors> {
        FieldErrors::new()
            .check("password", "Password", &self.password, &policy.rules())
            .check(
                "password_confirmation",
                "Password confirmation",
                &self.password_confirmation,
                &[Rule::Required, Rule::Matching(&self.password)],
            )
            .into_result()
    }

    #[must_use]
    pub fn request(&self, email: &str, otp: &str) -> ResetPasswordRequest {
        ResetPasswordRequest {
            email: email.to_string(),
            otp: otp.to_string(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl ChangePasswordForm {
    #[must_use]
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        new_password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            new_password_confirmation: new_password_confirmation.into(),
        }
    }

    /// # Errors
    /// Returns the first failure of each invalid field.
    pub fn validate(&self, policy: &PasswordPolicy) -> Result<(), FieldErrors> {
        let mut new_password_rules = policy.rules();
        new_password_rules.push(Rule::NotSameAs(&self.current_password));

        FieldErrors::new()
            .check(
                "current_password",
                "Current password",
                &self.current_password,
                &[Rule::Required],
            )
            .check(
                "new_password",
                "New password",
                &self.new_password,
                &new_password_rules,
            )
            .check(
                "new_password_confirmation",
                "Password confirmation",
                &self.new_password_confirmation,
                &[Rule::Required, Rule::Matching(&self.new_password)],
            )
            .into_result()
    }

    #[must_use]
    pub fn request(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            new_password_confirmation: self.new_password_confirmation.clone(),
        }
    }
}
