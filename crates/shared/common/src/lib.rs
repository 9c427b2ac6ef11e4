//! Common utilities shared across the platform's services.
//!
//! This crate provides:
//! - Unified error handling with HTTP response conversion
//! - The numeric error/success code tables
//! - The response envelope
//! - Configuration structures

pub mod codes;
pub mod config;
pub mod error;
pub mod response;

pub use codes::{ErrorCode, SuccessCode};
pub use config::*;
pub use error::{AppError, AppResult, DownstreamService, OptionExt};
pub use response::{ApiResponse, Created, ResponseStatus};
