//! Student domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_STUDENT, STUDENT_ID_PREFIX};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Platform roles. Only `Student` may be created through this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    #[default]
    Student,
    Admin,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Student => ROLE_STUDENT,
            RoleType::Admin => ROLE_ADMIN,
        }
    }
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enrollment state derived from a student's tuition reference.
///
/// `Unenrolled -> Enrolled(id) -> Unenrolled`; switching tuition directly is
/// not a valid transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrollment {
    Unenrolled,
    Enrolled(String),
}

/// Student domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub auth_user_id: String,
    /// At most one active tuition
    pub tuition_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new, unenrolled student with a freshly generated id.
    pub fn new(username: String, password: Password, auth_user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            username,
            password_hash: password.into_string(),
            auth_user_id,
            tuition_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a globally unique student id (`sid-<uuid>`).
    pub fn generate_id() -> String {
        format!("{}{}", STUDENT_ID_PREFIX, Uuid::new_v4())
    }

    pub fn enrollment(&self) -> Enrollment {
        match &self.tuition_id {
            Some(id) => Enrollment::Enrolled(id.clone()),
            None => Enrollment::Unenrolled,
        }
    }

    /// Attach a tuition. Callers guard against overwriting an existing one.
    pub fn enroll(&mut self, tuition_id: impl Into<String>) {
        self.tuition_id = Some(tuition_id.into());
        self.updated_at = Utc::now();
    }

    /// Detach the current tuition
    pub fn unenroll(&mut self) {
        self.tuition_id = None;
        self.updated_at = Utc::now();
    }
}

/// Student creation input, after transport-level decoding.
#[derive(Debug, Clone)]
pub struct CreateStudent {
    pub username: String,
    pub password: String,
    pub role: RoleType,
}

impl CreateStudent {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: RoleType::Student,
        }
    }

    /// Require a non-blank username and password and the student role.
    pub fn check_required(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if self.password.trim().is_empty() {
            return Err(DomainError::validation("Password is required"));
        }
        if self.role != RoleType::Student {
            return Err(DomainError::validation(format!(
                "Role {} cannot be assigned to a student",
                self.role
            )));
        }
        Ok(())
    }
}

/// Student response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Unique student identifier
    pub id: String,
    pub username: String,
    /// Identifier of the linked auth-service account
    pub auth_user_id: String,
    /// Current tuition, if enrolled
    pub tuition_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            username: student.username,
            auth_user_id: student.auth_user_id,
            tuition_id: student.tuition_id,
            created_at: student.created_at,
        }
    }
}

/// All students, in store order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

impl From<Vec<Student>> for StudentListResponse {
    fn from(students: Vec<Student>) -> Self {
        Self {
            students: students.into_iter().map(StudentResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new(
            "alice".to_string(),
            Password::from_hash("hash".to_string()),
            "auth-1".to_string(),
        )
    }

    #[test]
    fn test_new_student_is_unenrolled_with_prefixed_id() {
        let student = student();

        assert!(student.id.starts_with(STUDENT_ID_PREFIX));
        assert_eq!(student.enrollment(), Enrollment::Unenrolled);
        assert_eq!(student.password_hash, "hash");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Student::generate_id(), Student::generate_id());
    }

    #[test]
    fn test_enroll_then_unenroll() {
        let mut student = student();

        student.enroll("tid-1");
        assert_eq!(student.enrollment(), Enrollment::Enrolled("tid-1".to_string()));
        assert_eq!(student.tuition_id.as_deref(), Some("tid-1"));

        student.unenroll();
        assert_eq!(student.enrollment(), Enrollment::Unenrolled);
        assert_eq!(student.tuition_id, None);
    }

    #[test]
    fn test_check_required() {
        assert!(CreateStudent::new("alice", "p1").check_required().is_ok());
        assert!(CreateStudent::new("", "p1").check_required().is_err());
        assert!(CreateStudent::new("alice", "  ").check_required().is_err());

        let mut admin = CreateStudent::new("alice", "p1");
        admin.role = RoleType::Admin;
        assert!(matches!(admin.check_required(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&RoleType::Student).unwrap(), "\"STUDENT\"");
        let role: RoleType = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, RoleType::Admin);
    }

    #[test]
    fn test_response_hides_password_and_keeps_null_tuition() {
        let json = serde_json::to_value(StudentResponse::from(student())).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["authUserId"], "auth-1");
        assert!(json["tuitionId"].is_null());
        assert!(json.get("passwordHash").is_none());
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn test_response_schemas_derive() {
        use utoipa::ToSchema;

        let (name, _) = <StudentResponse as ToSchema>::schema();
        assert_eq!(name, "StudentResponse");
        let (name, _) = <StudentListResponse as ToSchema>::schema();
        assert_eq!(name, "StudentListResponse");
    }
}
