//! Typed Endpoints
//!
//! Thin wrappers over the Request Gateway, one method per server endpoint.
//! No validation happens here; the server is authoritative.

use std::sync::Arc;

use crate::application::verify_session::{SessionVerifier, Verification};
use crate::domain::account::{AccountService, LoginCredentials, LoginGrant, Registration};
use crate::domain::transport::{ApiRequest, Transport};
use crate::domain::value_object::access_token::AccessToken;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CourseRecord, DashboardStats, EnrollmentRecord, GradeRecord, IdentityPayload, LoginResponse,
    NewCourse, NewEnrollment, NewGrade, StudentRecord, TeacherRecord,
};
use crate::presentation::gateway::RequestGateway;

/// Server detail when a valid token names a deleted account
const ACCOUNT_MISSING: &str = "User not found";

/// Login and registration endpoints
pub struct AuthApi<T>
where
    T: Transport,
{
    gateway: Arc<RequestGateway<T>>,
}

impl<T> AuthApi<T>
where
    T: Transport + Sync,
{
    pub fn new(gateway: Arc<RequestGateway<T>>) -> Self {
        Self { gateway }
    }
}

impl<T> AccountService for AuthApi<T>
where
    T: Transport + Sync,
{
    async fn login(&self, credentials: &LoginCredentials) -> AuthResult<LoginGrant> {
        let response: LoginResponse = self.gateway.post_json("/login", credentials).await?;
        if !response.token_type.eq_ignore_ascii_case("bearer") {
            tracing::warn!(token_type = %response.token_type, "Unexpected token type");
        }

        Ok(LoginGrant {
            token: AccessToken::new(response.access_token)?,
            identity: response.user,
        })
    }

    async fn register(&self, registration: &Registration) -> AuthResult<()> {
        let path = format!("/register/{}", registration.kind());
        let _: serde_json::Value = match registration {
            Registration::Student(form) => self.gateway.post_json(&path, form).await?,
            Registration::Teacher(form) => self.gateway.post_json(&path, form).await?,
        };
        Ok(())
    }
}

/// Record endpoints
pub struct AcademicApi<T>
where
    T: Transport,
{
    gateway: Arc<RequestGateway<T>>,
    page_size: u32,
    verify_path: String,
}

impl<T> AcademicApi<T>
where
    T: Transport + Sync,
{
    pub fn new(gateway: Arc<RequestGateway<T>>, page_size: u32, verify_path: impl Into<String>) -> Self {
        Self {
            gateway,
            page_size,
            verify_path: verify_path.into(),
        }
    }

    fn page(&self, path: &str, skip: u32) -> ApiRequest {
        ApiRequest::get(path)
            .with_query("skip", skip)
            .with_query("limit", self.page_size)
    }

    pub async fn students(&self, skip: u32) -> AuthResult<Vec<StudentRecord>> {
        self.gateway.fetch(self.page("/students", skip)).await
    }

    pub async fn my_student_record(&self) -> AuthResult<StudentRecord> {
        self.gateway.get_json("/students/me").await
    }

    /// Admin only
    pub async fn teachers(&self, skip: u32) -> AuthResult<Vec<TeacherRecord>> {
        self.gateway.fetch(self.page("/teachers", skip)).await
    }

    pub async fn courses(&self, skip: u32) -> AuthResult<Vec<CourseRecord>> {
        self.gateway.fetch(self.page("/courses", skip)).await
    }

    pub async fn create_course(&self, course: &NewCourse) -> AuthResult<CourseRecord> {
        self.gateway.post_json("/courses", course).await
    }

    pub async fn create_enrollment(&self, enrollment: &NewEnrollment) -> AuthResult<EnrollmentRecord> {
        self.gateway.post_json("/enrollments", enrollment).await
    }

    pub async fn my_enrollments(&self) -> AuthResult<Vec<EnrollmentRecord>> {
        self.gateway.get_json("/enrollments/me").await
    }

    pub async fn create_grade(&self, grade: &NewGrade) -> AuthResult<GradeRecord> {
        self.gateway.post_json("/grades", grade).await
    }

    pub async fn my_grades(&self) -> AuthResult<Vec<GradeRecord>> {
        self.gateway.get_json("/grades/me").await
    }

    pub async fn dashboard_stats(&self) -> AuthResult<DashboardStats> {
        self.gateway.get_json("/dashboard/stats").await
    }

    /// Server liveness; falls back to the root endpoint when `/health` is missing
    pub async fn health(&self) -> AuthResult<serde_json::Value> {
        match self.gateway.get_json("/health").await {
            Err(AuthError::Rejected { status: 404, .. }) => self.gateway.get_json("/").await,
            other => other,
        }
    }
}

impl<T> SessionVerifier for AcademicApi<T>
where
    T: Transport + Sync,
{
    /// Ask an authenticated endpoint about the attached credential
    ///
    /// Any answer past the server's credential check counts as acceptance:
    /// a body carrying the user refreshes the identity, other bodies and
    /// role refusals (403) only confirm the token. `404 User not found`
    /// means the account behind the token is gone.
    async fn verify(&self) -> Verification {
        let response = match self.gateway.send(ApiRequest::get(&self.verify_path)).await {
            Ok(response) => response,
            Err(AuthError::Unauthorized) => return Verification::Rejected,
            Err(AuthError::Forbidden { .. }) => return Verification::Accepted,
            Err(AuthError::Rejected {
                status: 404,
                detail,
            }) => {
                if detail.as_deref() == Some(ACCOUNT_MISSING) {
                    return Verification::Rejected;
                }
                tracing::warn!(
                    path = %self.verify_path,
                    "Verification endpoint not served, check ACADEMIC_VERIFY_PATH"
                );
                return Verification::Unavailable;
            }
            Err(e) => {
                tracing::debug!(error = %e, path = %self.verify_path, "Session verification inconclusive");
                return Verification::Unavailable;
            }
        };

        match serde_json::from_slice::<IdentityPayload>(&response.body) {
            Ok(payload) => Verification::Confirmed(payload.into_identity()),
            Err(_) => Verification::Accepted,
        }
    }
}
