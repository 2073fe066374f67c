//! Typed wrappers for the portal endpoints. Request bodies carry passwords and
//! one-time codes; none of them are logged here.

use super::{
    decode,
    types::{
        ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
        MessageResponse, ResetPasswordRequest, User, VerifyOtpRequest,
    },
    ApiClient, ApiResult,
};
use secrecy::SecretString;
use tracing::instrument;

impl ApiClient {
    /// Exchanges credentials for a bearer token and the user profile.
    #[instrument(skip_all)]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let payload = self.post("/login", request, None).await?;
        decode(payload)
    }

    /// Fetches the user behind `token`; this is the session check.
    #[instrument(skip_all)]
    pub async fn fetch_user(&self, token: &SecretString) -> ApiResult<User> {
        let payload = self.get("/user", Some(token)).await?;
        decode(payload)
    }

    /// Asks the backend to email a one-time code.
    #[instrument(skip_all)]
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> ApiResult<MessageResponse> {
        let payload = self.post("/forgot-password", request, None).await?;
        Ok(MessageResponse::from_value(&payload))
    }

    #[instrument(skip_all)]
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> ApiResult<MessageResponse> {
        let payload = self.post("/verify-otp", request, None).await?;
        Ok(MessageResponse::from_value(&payload))
    }

    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> ApiResult<MessageResponse> {
        let payload = self.post("/reset-password", request, None).await?;
        Ok(MessageResponse::from_value(&payload))
    }

    /// Changes the password of the authenticated user.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
        token: &SecretString,
    ) -> ApiResult<MessageResponse> {
        let payload = self
            .post("/profile/reset-password", request, Some(token))
            .await?;
        Ok(MessageResponse::from_value(&payload))
    }
}
