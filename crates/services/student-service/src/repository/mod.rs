//! Repository layer for data access.

pub mod entities;
mod student_repository;

pub use student_repository::{StudentRepository, StudentStore};

#[cfg(test)]
pub use student_repository::MockStudentRepository;
