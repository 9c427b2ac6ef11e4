//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role every student account is registered with
pub const ROLE_STUDENT: &str = "STUDENT";

/// Administrator role; never assignable through student creation
pub const ROLE_ADMIN: &str = "ADMIN";

// =============================================================================
// Identifiers
// =============================================================================

/// Prefix of system-generated student ids
pub const STUDENT_ID_PREFIX: &str = "sid-";

// =============================================================================
// Authentication
// =============================================================================

/// Request header carrying the caller's token, forwarded to the auth service
pub const AUTH_HEADER: &str = "Authorization";
