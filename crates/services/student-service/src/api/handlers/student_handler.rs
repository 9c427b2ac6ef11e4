//! Student handlers.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use tracing::{debug, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::{AppError, AppResult, ApiResponse, Created, SuccessCode};
use domain::{CreateStudent, Enrollment, RoleType, StudentListResponse, StudentResponse};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::clients::AuthToken;

/// Student creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    #[schema(example = "p1")]
    pub password: String,
    /// Defaults to STUDENT; any other role is rejected
    pub role_type: Option<RoleType>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl From<CreateStudentRequest> for CreateStudent {
    fn from(request: CreateStudentRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
            role: request.role_type.unwrap_or_default(),
        }
    }
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student))
        .route("/get/all", get(get_all_students))
        .route("/get/:student_id", get(get_student))
        .route("/auth/get/:auth_user_id", get(get_student_by_auth_user_id))
        .route("/delete/:student_id", delete(delete_student))
        .route("/add/student/:student_id/tuition/:tuition_id", post(add_tuition))
        .route(
            "/remove/student/:student_id/tuition/:tuition_id",
            post(remove_tuition),
        )
}

/// Create a student and register it with the auth service
#[utoipa::path(
    post,
    path = "/api/v1/student",
    tag = "Students",
    security(("auth_header" = [])),
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Missing required fields or student already exists"),
        (status = 500, description = "Auth service failure")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    token: AuthToken,
    ValidatedJson(payload): ValidatedJson<CreateStudentRequest>,
) -> AppResult<Created<StudentResponse>> {
    let student = state
        .student_service
        .create_student(payload.into(), &token)
        .await?;

    Ok(Created(ApiResponse::success(
        SuccessCode::CreateStudent,
        StudentResponse::from(student),
    )))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/v1/student/get/{student_id}",
    tag = "Students",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 400, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<ApiResponse<StudentResponse>> {
    let student = state.student_service.find_by_id(&student_id).await?;

    debug!(%student_id, "Retrieved student");
    Ok(ApiResponse::success(
        SuccessCode::GetStudent,
        StudentResponse::from(student),
    ))
}

/// Get a student by linked auth user id
#[utoipa::path(
    get,
    path = "/api/v1/student/auth/get/{auth_user_id}",
    tag = "Students",
    params(("auth_user_id" = String, Path, description = "Auth service user ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 400, description = "Student not found")
    )
)]
pub async fn get_student_by_auth_user_id(
    State(state): State<AppState>,
    Path(auth_user_id): Path<String>,
) -> AppResult<ApiResponse<StudentResponse>> {
    let student = state
        .student_service
        .find_by_auth_user_id(&auth_user_id)
        .await?;

    debug!(%auth_user_id, "Retrieved student by auth id");
    Ok(ApiResponse::success(
        SuccessCode::GetStudent,
        StudentResponse::from(student),
    ))
}

/// Delete a student from the payment, tuition and auth services, then locally
#[utoipa::path(
    delete,
    path = "/api/v1/student/delete/{student_id}",
    tag = "Students",
    security(("auth_header" = [])),
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 400, description = "Student not found"),
        (status = 500, description = "Payment, tuition or auth service failure")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    token: AuthToken,
    Path(student_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let student = state.student_service.find_by_id(&student_id).await?;
    state.student_service.delete_student(student, &token).await?;

    Ok(ApiResponse::empty(SuccessCode::DeleteStudent))
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/v1/student/get/all",
    tag = "Students",
    responses(
        (status = 200, description = "All students", body = StudentListResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StudentListResponse>> {
    let students = state.student_service.get_all().await?;

    debug!(count = students.len(), "Returned all students");
    Ok(ApiResponse::success(
        SuccessCode::ReturnedAllStudents,
        StudentListResponse::from(students),
    ))
}

/// Enroll a student in a tuition
#[utoipa::path(
    post,
    path = "/api/v1/student/add/student/{student_id}/tuition/{tuition_id}",
    tag = "Students",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ("tuition_id" = String, Path, description = "Tuition ID")
    ),
    responses(
        (status = 200, description = "Tuition added"),
        (status = 400, description = "Student not found or already enrolled")
    )
)]
pub async fn add_tuition(
    State(state): State<AppState>,
    Path((student_id, tuition_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    let student = state.student_service.find_by_id(&student_id).await?;
    if let Enrollment::Enrolled(current) = student.enrollment() {
        warn!(%student_id, current_tuition = %current, "Student is already enrolled in a tuition");
        return Err(AppError::AlreadyEnrolled);
    }

    state
        .student_service
        .add_tuition(student, &tuition_id)
        .await?;

    debug!(%student_id, %tuition_id, "Added tuition to student");
    Ok(ApiResponse::empty(SuccessCode::AddTuitionToStudent))
}

/// Remove a student's tuition
#[utoipa::path(
    post,
    path = "/api/v1/student/remove/student/{student_id}/tuition/{tuition_id}",
    tag = "Students",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ("tuition_id" = String, Path, description = "Tuition ID")
    ),
    responses(
        (status = 200, description = "Tuition removed"),
        (status = 400, description = "Student not found or not enrolled in this tuition")
    )
)]
pub async fn remove_tuition(
    State(state): State<AppState>,
    Path((student_id, tuition_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    let student = state.student_service.find_by_id(&student_id).await?;
    match student.enrollment() {
        Enrollment::Enrolled(current) if current == tuition_id => {}
        _ => {
            warn!(%student_id, %tuition_id, "Student is not enrolled in the tuition");
            return Err(AppError::NotEnrolled);
        }
    }

    state.student_service.remove_tuition(student).await?;

    debug!(%student_id, %tuition_id, "Removed tuition from student");
    Ok(ApiResponse::empty(SuccessCode::RemoveTuitionFromStudent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_student_role() {
        let request: CreateStudentRequest =
            serde_json::from_str(r#"{"username":"alice","password":"p1"}"#).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(CreateStudent::from(request).role, RoleType::Student);
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let request: CreateStudentRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
