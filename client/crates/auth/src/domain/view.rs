//! Views and Navigation
//!
//! The screens of the client, the paths they are reached by, and the
//! capability each one requires.

use crate::domain::policy::{Action, Resource};

/// Client screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Students,
    Courses,
    Grades,
}

impl View {
    /// Screens that appear in the navigation bar, in display order
    pub const NAVIGABLE: [View; 4] = [View::Dashboard, View::Students, View::Courses, View::Grades];

    /// Canonical path
    pub const fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/",
            View::Students => "/students",
            View::Courses => "/courses",
            View::Grades => "/grades",
        }
    }

    /// Resolve a path; unknown paths yield `None`
    ///
    /// Query strings and trailing slashes are ignored, and `/dashboard` is
    /// accepted as an alias of `/`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/dashboard" => Some(View::Dashboard),
            "/login" => Some(View::Login),
            "/register" => Some(View::Register),
            "/students" => Some(View::Students),
            "/courses" => Some(View::Courses),
            "/grades" => Some(View::Grades),
            _ => None,
        }
    }

    /// Reachable without a session
    pub const fn is_public(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    /// Capabilities that admit this view; holding any one is enough.
    /// Empty for public views.
    pub const fn required_any(&self) -> &'static [(Resource, Action)] {
        match self {
            View::Login | View::Register => &[],
            View::Dashboard => &[(Resource::Dashboard, Action::Read)],
            View::Students => &[(Resource::Students, Action::Read)],
            View::Courses => &[(Resource::Courses, Action::Read)],
            View::Grades => &[
                (Resource::Grades, Action::Read),
                (Resource::OwnGrades, Action::Read),
            ],
        }
    }
}

/// Navigation boundary
///
/// Implementations move the UI to a view. Used for the forced transition to
/// [`View::Login`] on logout or a rejected credential.
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(View::from_path("/"), Some(View::Dashboard));
        assert_eq!(View::from_path("/dashboard"), Some(View::Dashboard));
        assert_eq!(View::from_path("/grades/"), Some(View::Grades));
        assert_eq!(View::from_path("/students?skip=0"), Some(View::Students));
        assert_eq!(View::from_path("/login"), Some(View::Login));
        assert_eq!(View::from_path("/teachers"), None);
    }

    #[test]
    fn test_path_roundtrip() {
        for view in [
            View::Login,
            View::Register,
            View::Dashboard,
            View::Students,
            View::Courses,
            View::Grades,
        ] {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }

    #[test]
    fn test_public_views_require_nothing() {
        assert!(View::Login.is_public());
        assert!(View::Register.is_public());
        assert!(View::Login.required_any().is_empty());
        assert!(!View::Dashboard.is_public());
        assert!(!View::Grades.required_any().is_empty());
    }
}
