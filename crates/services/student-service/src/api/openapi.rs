//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::student_handler::CreateStudentRequest;
use domain::{RoleType, StudentListResponse, StudentResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::student_handler::create_student,
        crate::api::handlers::student_handler::get_student,
        crate::api::handlers::student_handler::get_student_by_auth_user_id,
        crate::api::handlers::student_handler::delete_student,
        crate::api::handlers::student_handler::get_all_students,
        crate::api::handlers::student_handler::add_tuition,
        crate::api::handlers::student_handler::remove_tuition,
    ),
    components(schemas(CreateStudentRequest, RoleType, StudentResponse, StudentListResponse)),
    modifiers(&SecurityAddon),
    tags((name = "Students", description = "Student management endpoints"))
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "auth_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(domain::AUTH_HEADER))),
            );
        }
    }
}
