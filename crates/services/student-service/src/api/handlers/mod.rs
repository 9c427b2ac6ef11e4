//! HTTP handlers.

pub mod health_handler;
pub mod student_handler;

pub use health_handler::health_routes;
pub use student_handler::student_routes;
