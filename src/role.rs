use std::{fmt, str::FromStr};

/// Roles recognized by the portal. Every role lands on the same dashboard
/// page; the dashboard picks its content from the role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    SchoolAdmin,
    Hod,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::SuperAdmin,
        Self::SchoolAdmin,
        Self::Hod,
        Self::Teacher,
        Self::Student,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::SchoolAdmin => "school_admin",
            Self::Hod => "hod",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Human-readable name for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::SchoolAdmin => "School Admin",
            Self::Hod => "Head of Department",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        }
    }

    /// Parses an optional role tag; missing or unknown tags yield `None`.
    #[must_use]
    pub fn parse(tag: Option<&str>) -> Option<Self> {
        tag.and_then(|tag| tag.parse().ok())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == tag.trim())
            .ok_or_else(|| UnknownRole(tag.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_or_missing_roles_are_none() {
        assert_eq!(Role::parse(Some("janitor")), None);
        assert_eq!(Role::parse(Some("")), None);
        assert_eq!(Role::parse(None), None);
        assert_eq!(Role::parse(Some("TEACHER")), None);
        assert_eq!(Role::parse(Some("hod")), Some(Role::Hod));
    }

    #[test]
    fn unknown_role_error_names_the_tag() {
        let error = "parent".parse::<Role>().err();
        assert_eq!(error, Some(UnknownRole("parent".to_string())));
        assert_eq!(
            error.map(|error| error.to_string()),
            Some("unknown role: parent".to_string())
        );
    }
}
