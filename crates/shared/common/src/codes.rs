//! Application response codes.
//!
//! Numeric codes are part of the platform contract; clients switch on them.

/// Error codes returned in the `errorCode` field of error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingRequiredFields,
    StudentAlreadyExists,
    StudentNotFound,
    StudentNotEnrolledInTuition,
    StudentAlreadyEnrolledInATuition,
    InternalServerError,
    AuthInternalServerError,
    TuitionInternalServerError,
    PaymentInternalServerError,
}

impl ErrorCode {
    pub const fn code(self) -> u16 {
        match self {
            ErrorCode::MissingRequiredFields => 4001,
            ErrorCode::StudentAlreadyExists => 4003,
            ErrorCode::StudentNotFound => 4005,
            ErrorCode::StudentNotEnrolledInTuition => 4006,
            ErrorCode::StudentAlreadyEnrolledInATuition => 4007,
            ErrorCode::InternalServerError => 5000,
            ErrorCode::AuthInternalServerError => 5001,
            ErrorCode::TuitionInternalServerError => 5002,
            ErrorCode::PaymentInternalServerError => 5003,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredFields => "Missing required fields",
            ErrorCode::StudentAlreadyExists => "Student already exists with given username",
            ErrorCode::StudentNotFound => "Student not found",
            ErrorCode::StudentNotEnrolledInTuition => "Student not enrolled in tuition",
            ErrorCode::StudentAlreadyEnrolledInATuition => "Student already enrolled in a tuition",
            ErrorCode::InternalServerError => "Internal Server Error",
            ErrorCode::AuthInternalServerError => "Auth Service - Internal Server Error",
            ErrorCode::TuitionInternalServerError => "Tuition Service - Internal Server Error",
            ErrorCode::PaymentInternalServerError => "Payment Service - Internal Server Error",
        }
    }
}

/// Messages carried by success envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessCode {
    CreateStudent,
    GetStudent,
    DeleteStudent,
    ReturnedAllStudents,
    AddTuitionToStudent,
    RemoveTuitionFromStudent,
}

impl SuccessCode {
    pub const fn message(self) -> &'static str {
        match self {
            SuccessCode::CreateStudent => "Successfully created the student",
            SuccessCode::GetStudent => "Successfully returned the student",
            SuccessCode::DeleteStudent => "Successfully deleted the student",
            SuccessCode::ReturnedAllStudents => "Successfully returned all students",
            SuccessCode::AddTuitionToStudent => "Successfully added the tuition to the student",
            SuccessCode::RemoveTuitionFromStudent => {
                "Successfully removed the tuition from the student"
            }
        }
    }
}
