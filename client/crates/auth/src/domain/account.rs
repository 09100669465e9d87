//! Account Port
//!
//! Sign-in and registration calls against the records server. The
//! implementation in `presentation::api` goes through the Request Gateway.

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthResult;

/// Credential and identity issued by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: AccessToken,
    pub identity: Identity,
}

/// Email and password as typed by the user
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Student self-registration form
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct StudentRegistration {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub student_id: String,
    pub date_of_birth: String,
    pub enrollment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Teacher self-registration form
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct TeacherRegistration {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub teacher_id: String,
    pub department: String,
    pub hire_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Registration for either account type
#[derive(Clone)]
pub enum Registration {
    Student(StudentRegistration),
    Teacher(TeacherRegistration),
}

impl Registration {
    pub fn email(&self) -> &str {
        match self {
            Registration::Student(r) => &r.email,
            Registration::Teacher(r) => &r.email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            Registration::Student(r) => &r.password,
            Registration::Teacher(r) => &r.password,
        }
    }

    /// Lowercase account kind, as used in the registration path
    pub fn kind(&self) -> &'static str {
        match self {
            Registration::Student(_) => "student",
            Registration::Teacher(_) => "teacher",
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("kind", &self.kind())
            .field("email", &self.email())
            .finish_non_exhaustive()
    }
}

/// Account endpoints
#[trait_variant::make(AccountService: Send)]
pub trait LocalAccountService {
    /// Exchange credentials for a token and identity
    async fn login(&self, credentials: &LoginCredentials) -> AuthResult<LoginGrant>;

    /// Create an account; does not sign in
    async fn register(&self, registration: &Registration) -> AuthResult<()>;
}
