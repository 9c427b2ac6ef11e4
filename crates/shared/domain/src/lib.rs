//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared by the student service and anything that talks to it.

pub mod constants;
pub mod error;
pub mod password;
pub mod student;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use student::{
    CreateStudent, Enrollment, RoleType, Student, StudentListResponse, StudentResponse,
};
