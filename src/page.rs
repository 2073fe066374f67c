//! Page state. Each variant carries exactly the handoff data its page needs,
//! so the recovery pages cannot be reached without an email to show.

use crate::role::Role;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Page {
    /// Initial gate while the stored token is being checked.
    #[default]
    Loading,
    Login,
    ForgotPassword,
    VerifyOtp {
        email: String,
    },
    ResetPassword {
        email: String,
        otp: String,
    },
    Dashboard,
    ProfileSettings,
}

impl Page {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Login => "login",
            Self::ForgotPassword => "forgot-password",
            Self::VerifyOtp { .. } => "verify-otp",
            Self::ResetPassword { .. } => "reset-password",
            Self::Dashboard => "dashboard",
            Self::ProfileSettings => "profile-settings",
        }
    }

    /// Email carried by the recovery pages, or an empty string.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::VerifyOtp { email } | Self::ResetPassword { email, .. } => email,
            _ => "",
        }
    }

    /// Target of the "back" action, without any payload carried over.
    #[must_use]
    pub fn back(&self) -> Option<Self> {
        match self {
            Self::ForgotPassword => Some(Self::Login),
            Self::VerifyOtp { .. } | Self::ResetPassword { .. } => Some(Self::ForgotPassword),
            Self::ProfileSettings => Some(Self::Dashboard),
            Self::Loading | Self::Login | Self::Dashboard => None,
        }
    }

    #[must_use]
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard | Self::ProfileSettings)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Where a user with the given role tag lands after authentication.
#[must_use]
pub fn destination_for(role: Option<&str>) -> Page {
    match Role::parse(role) {
        Some(_) => Page::Dashboard,
        None => Page::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_role_lands_on_dashboard() {
        for role in Role::ALL {
            assert_eq!(destination_for(Some(role.as_str())), Page::Dashboard);
        }
        assert_eq!(destination_for(Some("parent")), Page::Login);
        assert_eq!(destination_for(None), Page::Login);
    }

    #[test]
    fn back_drops_payload() {
        let page = Page::ResetPassword {
            email: "ada@school.test".to_string(),
            otp: "123456".to_string(),
        };
        assert_eq!(page.back(), Some(Page::ForgotPassword));
        assert_eq!(
            Page::VerifyOtp {
                email: "ada@school.test".to_string()
            }
            .back(),
            Some(Page::ForgotPassword)
        );
        assert_eq!(Page::ForgotPassword.back(), Some(Page::Login));
        assert_eq!(Page::ProfileSettings.back(), Some(Page::Dashboard));
        assert_eq!(Page::Login.back(), None);
    }

    #[test]
    fn email_degrades_to_empty_string() {
        assert_eq!(Page::Login.email(), "");
        assert_eq!(Page::VerifyOtp { email: String::new() }.email(), "");
        assert_eq!(
            Page::VerifyOtp {
                email: "ada@school.test".to_string()
            }
            .email(),
            "ada@school.test"
        );
    }

    #[test]
    fn names_match_page_identifiers() {
        assert_eq!(Page::default().name(), "loading");
        assert_eq!(Page::ForgotPassword.to_string(), "forgot-password");
        assert_eq!(Page::ProfileSettings.to_string(), "profile-settings");
    }
}
