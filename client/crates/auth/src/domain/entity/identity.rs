//! Identity Entity
//!
//! The authenticated user's profile as returned by the server at login.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Authenticated user profile
///
/// Unknown fields sent by the server (e.g. `created_at`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: full_name.into(),
            role,
        }
    }

    /// Greeting shown in the header bar
    pub fn greeting(&self) -> String {
        format!("Welcome, {} ({})", self.full_name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_user_payload() {
        let json = r#"{
            "id": 3,
            "email": "ana@example.edu",
            "full_name": "Ana Lima",
            "role": "student",
            "created_at": "2024-09-01T10:00:00"
        }"#;

        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, UserId::new(3));
        assert_eq!(identity.role, UserRole::Student);
        assert_eq!(identity.greeting(), "Welcome, Ana Lima (student)");
    }

    #[test]
    fn test_decode_rejects_unknown_role() {
        let json = r#"{"id":1,"email":"a@b.c","full_name":"A","role":"janitor"}"#;
        assert!(serde_json::from_str::<Identity>(json).is_err());
    }
}
