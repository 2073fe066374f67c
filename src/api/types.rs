//! Request and response types for the portal API. Request payloads carry
//! passwords and one-time codes, so they deliberately do not implement `Debug`
//! and must never be logged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Result of every API call once the response body has been normalized.
pub type ApiResult<T = Value> = Result<T, ApiError>;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error or server unreachable.";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "An unexpected API response format was received.";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed.";

/// Machine-readable error classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    Validation,
    Network,
    UnexpectedResponse,
    Http,
    /// Any code supplied by the backend, passed through untouched.
    Other(String),
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::UnexpectedResponse => "UNEXPECTED_RESPONSE",
            Self::Http => "HTTP_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "VALIDATION_ERROR" => Self::Validation,
            "NETWORK_ERROR" => Self::Network,
            "UNEXPECTED_RESPONSE" => Self::UnexpectedResponse,
            "HTTP_ERROR" => Self::Http,
            _ => Self::Other(code),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::from(code.to_string())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error half of an [`ApiResult`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Transport failure: unreachable host, timeout or an unreadable body.
    #[must_use]
    pub fn network() -> Self {
        Self::new(NETWORK_ERROR_MESSAGE).with_code(ErrorCode::Network)
    }

    /// Body that matches none of the known response shapes. The raw body is
    /// kept in `details` for diagnostics.
    #[must_use]
    pub fn unexpected(raw: Value) -> Self {
        let message = message_of(&raw).unwrap_or(UNEXPECTED_RESPONSE_MESSAGE);
        Self::new(message)
            .with_code(ErrorCode::UnexpectedResponse)
            .with_details(raw)
    }

    /// Non-2xx response whose body carried no error envelope.
    #[must_use]
    pub fn http_status(status: u16, body: Value) -> Self {
        let message = message_of(&body).map_or_else(
            || format!("Request failed with status {status}."),
            ToString::to_string,
        );
        Self::new(message).with_code(ErrorCode::Http).with_details(body)
    }

    /// Converts the backend's `error` member into an `ApiError`, keeping
    /// whatever `message`, `code` and `details` it supplied.
    #[must_use]
    pub fn from_backend(error: Option<&Value>) -> Self {
        match error {
            Some(Value::Object(map)) => Self {
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(REQUEST_FAILED_MESSAGE)
                    .to_string(),
                code: map
                    .get("code")
                    .and_then(Value::as_str)
                    .map(ErrorCode::from),
                details: map.get("details").filter(|value| !value.is_null()).cloned(),
            },
            Some(Value::String(message)) if !message.trim().is_empty() => Self::new(message.clone()),
            _ => Self::new(REQUEST_FAILED_MESSAGE),
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.code == Some(ErrorCode::Validation)
    }
}

fn message_of(value: &Value) -> Option<&str> {
    value.get("message").and_then(Value::as_str)
}

/// Authenticated user as returned by `/login` and `/user`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Acknowledgement payload of the password endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Reads the optional `message` member; any other payload shape is an
    /// acknowledgement without text.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: message_of(value)
                .filter(|message| !message.trim().is_empty())
                .map(ToString::to_string),
        }
    }
}
