//! Data Transfer Objects
//!
//! Wire shapes of the records server. Field names follow the server's
//! snake_case JSON.

use kernel::id::{CourseId, StudentId, TeacherId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::Identity;

// ============================================================================
// Auth
// ============================================================================

/// `POST /login` response
#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Identity,
}

/// Body of identity-bearing responses
///
/// Accepts a bare user object or a record that nests it under `user`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdentityPayload {
    Nested { user: Identity },
    Bare(Identity),
}

impl IdentityPayload {
    pub fn into_identity(self) -> Identity {
        match self {
            IdentityPayload::Nested { user } | IdentityPayload::Bare(user) => user,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub user_id: UserId,
    pub student_id: String,
    pub date_of_birth: String,
    pub enrollment_date: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub user: Identity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub id: TeacherId,
    pub user_id: UserId,
    pub teacher_id: String,
    pub department: String,
    pub hire_date: String,
    #[serde(default)]
    pub specialization: Option<String>,
    pub user: Identity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub credits: i32,
    pub teacher_id: TeacherId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub credits: i32,
    pub teacher_id: TeacherId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: String,
}

impl NewEnrollment {
    /// Active enrollment, the server's default status
    pub fn active(student_id: StudentId, course_id: CourseId) -> Self {
        Self {
            student_id,
            course_id,
            status: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub status: String,
    pub enrollment_date: String,
    pub student: StudentRecord,
    pub course: CourseRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGrade {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub grade: f64,
    pub semester: String,
    pub academic_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub grade: f64,
    pub semester: String,
    pub academic_year: String,
    pub student: StudentRecord,
    pub course: CourseRecord,
}

/// `GET /dashboard/stats` response (admin only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    #[serde(default)]
    pub recent_activity: Vec<serde_json::Value>,
}
