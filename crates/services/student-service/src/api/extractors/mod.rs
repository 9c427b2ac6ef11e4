//! Custom request extractors.

mod auth_token;
mod validated_json;

pub use validated_json::ValidatedJson;
