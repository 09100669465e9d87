use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of roles the records server assigns
///
/// Serialized as the server's lowercase codes (`"admin"`, `"teacher"`,
/// `"student"`). An unrecognized code fails to decode; callers that must
/// tolerate it go through [`UserRole::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Teacher, UserRole::Student];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Teacher => "teacher",
            Student => "student",
        }
    }

    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Teacher)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse a role code; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code.trim() {
            "admin" => Some(Admin),
            "teacher" => Some(Teacher),
            "student" => Some(Student),
            other => {
                tracing::debug!(code = %other, "Unknown user role code");
                None
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("teacher"), Some(UserRole::Teacher));
        assert_eq!(UserRole::from_code("student"), Some(UserRole::Student));
        assert_eq!(UserRole::from_code("super_admin"), None);
        assert_eq!(UserRole::from_code(""), None);
    }

    #[test]
    fn test_user_role_serde_uses_codes() {
        for role in UserRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.code()));
            assert_eq!(serde_json::from_str::<UserRole>(&json).unwrap(), role);
        }
        assert!(serde_json::from_str::<UserRole>("\"Admin\"").is_err());
    }

    #[test]
    fn test_user_role_checks() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Teacher.is_staff());
        assert!(!UserRole::Student.is_staff());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Teacher.is_admin());
    }
}
