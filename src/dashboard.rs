//! Role-specific dashboard content. All roles share the dashboard page; the
//! role only changes what it shows.

use crate::{api::User, role::Role};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dashboard {
    pub role: Role,
    pub greeting: String,
    pub sections: &'static [&'static str],
}

impl Dashboard {
    /// Content for `user`, or `None` when the role is missing or unknown.
    #[must_use]
    pub fn for_user(user: &User) -> Option<Self> {
        let role = Role::parse(user.role.as_deref())?;
        let name = if user.name.trim().is_empty() {
            user.email.as_str()
        } else {
            user.name.as_str()
        };

        Some(Self {
            role,
            greeting: format!("Welcome, {name} ({})", role.label()),
            sections: sections(role),
        })
    }
}

fn sections(role: Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin => &["Schools", "School administrators", "Platform settings"],
        Role::SchoolAdmin => &["Staff", "Students", "Classes", "Departments"],
        Role::Hod => &["Department overview", "Teachers", "Course plans"],
        Role::Teacher => &["My classes", "Attendance", "Grading"],
        Role::Student => &["My courses", "Timetable", "Grades"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: Option<&str>) -> User {
        User {
            name: name.to_string(),
            email: "ada@school.test".to_string(),
            role: role.map(ToString::to_string),
            ..User::default()
        }
    }

    #[test]
    fn content_branches_on_role() {
        let teacher = Dashboard::for_user(&user("Ada", Some("teacher")));
        let student = Dashboard::for_user(&user("Ada", Some("student")));
        assert_eq!(teacher.as_ref().map(|d| d.sections[0]), Some("My classes"));
        assert_eq!(student.as_ref().map(|d| d.sections[0]), Some("My courses"));
        assert_eq!(
            teacher.map(|d| d.greeting),
            Some("Welcome, Ada (Teacher)".to_string())
        );
    }

    #[test]
    fn greeting_falls_back_to_email() {
        let dashboard = Dashboard::for_user(&user(" ", Some("hod")));
        assert_eq!(
            dashboard.map(|d| d.greeting),
            Some("Welcome, ada@school.test (Head of Department)".to_string())
        );
    }

    #[test]
    fn unknown_role_has_no_dashboard() {
        assert_eq!(Dashboard::for_user(&user("Ada", Some("parent"))), None);
        assert_eq!(Dashboard::for_user(&user("Ada", None)), None);
    }
}
