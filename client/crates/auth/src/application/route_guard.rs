//! Route Guard
//!
//! Decides whether a navigation target may be shown for the current session.
//! Token authenticity is not checked here; the server does that on the next
//! request and the gateway reacts to a 401.

use crate::domain::entity::session::Session;
use crate::domain::view::View;

/// Outcome of a navigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view
    Admit,
    /// No session; show the login view
    RedirectToLogin,
    /// Session still hydrating; show a loading indicator
    Pending,
    /// Signed in but the role lacks the capability
    Forbidden { fallback: View },
}

impl GuardDecision {
    /// View to render for this decision, `None` while pending
    pub fn target(&self, requested: View) -> Option<View> {
        match self {
            GuardDecision::Admit => Some(requested),
            GuardDecision::RedirectToLogin => Some(View::Login),
            GuardDecision::Pending => None,
            GuardDecision::Forbidden { fallback } => Some(*fallback),
        }
    }
}

/// Route guard
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, session: &Session, view: View) -> GuardDecision {
        if view.is_public() {
            return GuardDecision::Admit;
        }
        if session.is_loading() {
            return GuardDecision::Pending;
        }
        if !session.is_authenticated() {
            return GuardDecision::RedirectToLogin;
        }

        if session.capabilities().can_visit(view) {
            GuardDecision::Admit
        } else {
            tracing::debug!(
                view = %view,
                role = ?session.role(),
                "Navigation denied by access policy"
            );
            GuardDecision::Forbidden {
                fallback: View::Dashboard,
            }
        }
    }

    /// Check a raw path; unknown paths yield `None`
    pub fn check_path(&self, session: &Session, path: &str) -> Option<(View, GuardDecision)> {
        let view = View::from_path(path)?;
        Some((view, self.check(session, view)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::Identity;
    use crate::domain::value_object::{access_token::AccessToken, user_role::UserRole};
    use kernel::id::UserId;

    fn session(role: UserRole) -> Session {
        Session::authenticated(
            AccessToken::new("t").unwrap(),
            Identity::new(UserId::new(1), "u@example.edu", "User", role),
        )
    }

    #[test]
    fn test_anonymous_is_redirected() {
        let guard = RouteGuard::new();
        let anonymous = Session::anonymous();
        assert_eq!(guard.check(&anonymous, View::Dashboard), GuardDecision::RedirectToLogin);
        assert_eq!(guard.check(&anonymous, View::Login), GuardDecision::Admit);
        assert_eq!(guard.check(&anonymous, View::Register), GuardDecision::Admit);
    }

    #[test]
    fn test_hydrating_is_pending() {
        let guard = RouteGuard::new();
        let decision = guard.check(&Session::hydrating(), View::Courses);
        assert_eq!(decision, GuardDecision::Pending);
        assert_eq!(decision.target(View::Courses), None);
    }

    #[test]
    fn test_student_paths() {
        let guard = RouteGuard::new();
        let student = session(UserRole::Student);

        assert_eq!(
            guard.check_path(&student, "/dashboard"),
            Some((View::Dashboard, GuardDecision::Admit))
        );
        assert_eq!(
            guard.check_path(&student, "/grades"),
            Some((View::Grades, GuardDecision::Admit))
        );
        let (_, denied) = guard.check_path(&student, "/students").unwrap();
        assert_eq!(
            denied,
            GuardDecision::Forbidden {
                fallback: View::Dashboard
            }
        );
        assert_eq!(denied.target(View::Students), Some(View::Dashboard));
    }

    #[test]
    fn test_staff_admitted_everywhere() {
        let guard = RouteGuard::new();
        for role in [UserRole::Admin, UserRole::Teacher] {
            let staff = session(role);
            for view in View::NAVIGABLE {
                assert_eq!(guard.check(&staff, view), GuardDecision::Admit);
            }
        }
    }

    #[test]
    fn test_unknown_path() {
        let guard = RouteGuard::new();
        assert_eq!(guard.check_path(&session(UserRole::Admin), "/teachers"), None);
    }
}
