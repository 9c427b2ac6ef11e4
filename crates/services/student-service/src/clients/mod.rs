//! HTTP clients for the auth, tuition and payment services.

mod auth_client;
mod http;
mod payment_client;
mod tuition_client;

pub use auth_client::{AuthClient, AuthServiceClient, AuthToken};
pub use payment_client::{PaymentClient, PaymentServiceClient};
pub use tuition_client::{TuitionClient, TuitionServiceClient};

#[cfg(test)]
pub use auth_client::MockAuthServiceClient;
#[cfg(test)]
pub use payment_client::MockPaymentServiceClient;
#[cfg(test)]
pub use tuition_client::MockTuitionServiceClient;
