//! Service layer - student orchestration.

mod student_service;

pub use student_service::{StudentManager, StudentService};
