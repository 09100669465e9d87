//! Access Policy
//!
//! The one place where roles are mapped to permissions. Screens, the route
//! guard, and the navigation bar all ask this module instead of comparing
//! roles themselves. Absent or unknown roles get nothing.

use std::collections::BTreeSet;

use crate::domain::value_object::user_role::UserRole;
use crate::domain::view::View;

/// Something a role may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Resource {
    Dashboard,
    DashboardStats,
    Students,
    OwnStudentRecord,
    Teachers,
    Courses,
    Enrollments,
    OwnEnrollments,
    Grades,
    OwnGrades,
}

/// What may be done to a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Action {
    Read,
    Create,
}

/// Navigation bar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub view: View,
    pub label: &'static str,
}

/// Permissions and navigation derived from a role
///
/// Never persisted; recompute it whenever the role may have changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    permissions: BTreeSet<(Resource, Action)>,
    navigation: Vec<NavEntry>,
}

impl CapabilitySet {
    /// Default-deny set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.permissions.contains(&(resource, action))
    }

    pub fn can_read(&self, resource: Resource) -> bool {
        self.allows(resource, Action::Read)
    }

    pub fn can_create(&self, resource: Resource) -> bool {
        self.allows(resource, Action::Create)
    }

    /// Whether any capability admitting `view` is held
    pub fn can_visit(&self, view: View) -> bool {
        let required = view.required_any();
        required.is_empty()
            || required
                .iter()
                .any(|(resource, action)| self.allows(*resource, *action))
    }

    /// Ordered navigation entries
    pub fn navigation(&self) -> &[NavEntry] {
        &self.navigation
    }

    pub fn permissions(&self) -> impl Iterator<Item = (Resource, Action)> + '_ {
        self.permissions.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.navigation.is_empty()
    }
}

use Action::{Create, Read};
use Resource::*;

const ADMIN: &[(Resource, Action)] = &[
    (Dashboard, Read),
    (DashboardStats, Read),
    (Students, Read),
    (Teachers, Read),
    (Courses, Read),
    (Courses, Create),
    (Enrollments, Create),
    (Grades, Read),
    (Grades, Create),
];

const TEACHER: &[(Resource, Action)] = &[
    (Dashboard, Read),
    (Students, Read),
    (Courses, Read),
    (Courses, Create),
    (Enrollments, Create),
    (Grades, Read),
    (Grades, Create),
];

const STUDENT: &[(Resource, Action)] = &[
    (Dashboard, Read),
    (OwnStudentRecord, Read),
    (Courses, Read),
    (Enrollments, Create),
    (OwnEnrollments, Read),
    (OwnGrades, Read),
];

fn label(role: UserRole, view: View) -> &'static str {
    match (role, view) {
        (UserRole::Student, View::Grades) => "My Grades",
        (_, View::Grades) => "Grades",
        (_, View::Dashboard) => "Dashboard",
        (_, View::Students) => "Students",
        (_, View::Courses) => "Courses",
        (_, View::Login) => "Login",
        (_, View::Register) => "Register",
    }
}

/// Capabilities for a role
///
/// Deterministic and total: `None` maps to the empty set.
pub fn capabilities(role: Option<UserRole>) -> CapabilitySet {
    let Some(role) = role else {
        return CapabilitySet::empty();
    };

    let table = match role {
        UserRole::Admin => ADMIN,
        UserRole::Teacher => TEACHER,
        UserRole::Student => STUDENT,
    };

    let mut set = CapabilitySet {
        permissions: table.iter().copied().collect(),
        navigation: Vec::new(),
    };
    set.navigation = View::NAVIGABLE
        .into_iter()
        .filter(|view| set.can_visit(*view))
        .map(|view| NavEntry {
            view,
            label: label(role, view),
        })
        .collect();
    set
}

/// Capabilities for a raw role code; unknown codes map to the empty set
pub fn capabilities_for_code(code: &str) -> CapabilitySet {
    capabilities(UserRole::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_views(set: &CapabilitySet) -> Vec<View> {
        set.navigation().iter().map(|entry| entry.view).collect()
    }

    #[test]
    fn test_policy_is_deterministic() {
        for role in UserRole::ALL {
            assert_eq!(capabilities(Some(role)), capabilities(Some(role)));
        }
    }

    #[test]
    fn test_unknown_or_absent_role_is_empty() {
        assert!(capabilities(None).is_empty());
        assert!(capabilities_for_code("janitor").is_empty());
        assert!(capabilities_for_code("").is_empty());
        assert!(!capabilities(None).can_visit(View::Dashboard));
        // Public views never need a capability
        assert!(capabilities(None).can_visit(View::Login));
    }

    #[test]
    fn test_admin_capabilities() {
        let set = capabilities(Some(UserRole::Admin));
        assert!(set.can_read(Resource::DashboardStats));
        assert!(set.can_read(Resource::Teachers));
        assert!(set.can_create(Resource::Grades));
        assert!(!set.can_read(Resource::OwnGrades));
        assert_eq!(
            nav_views(&set),
            vec![View::Dashboard, View::Students, View::Courses, View::Grades]
        );
    }

    #[test]
    fn test_teacher_capabilities() {
        let set = capabilities(Some(UserRole::Teacher));
        assert!(set.can_read(Resource::Students));
        assert!(set.can_create(Resource::Courses));
        assert!(!set.can_read(Resource::DashboardStats));
        assert!(!set.can_read(Resource::Teachers));
        assert!(set.can_visit(View::Students));
    }

    #[test]
    fn test_student_capabilities() {
        let set = capabilities(Some(UserRole::Student));
        assert!(set.can_visit(View::Dashboard));
        assert!(set.can_visit(View::Grades));
        assert!(!set.can_visit(View::Students));
        assert!(!set.can_create(Resource::Grades));
        assert!(set.can_read(Resource::OwnGrades));
        assert_eq!(
            nav_views(&set),
            vec![View::Dashboard, View::Courses, View::Grades]
        );
        let grades = set.navigation().last().unwrap();
        assert_eq!(grades.label, "My Grades");
    }

    #[test]
    fn test_code_and_enum_agree() {
        for role in UserRole::ALL {
            assert_eq!(capabilities_for_code(role.code()), capabilities(Some(role)));
        }
    }
}
