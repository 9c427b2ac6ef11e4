//! Student Service Library
//!
//! REST microservice that manages student records and keeps the auth,
//! tuition and payment services in step with them.

pub mod api;
pub mod clients;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::clients::{AuthClient, PaymentClient, TuitionClient};
use crate::config::StudentServiceConfig;
use crate::infra::Database;
use crate::repository::StudentStore;
use crate::service::StudentManager;

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &StudentServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Wire the store, the downstream clients and the router, then serve HTTP.
pub async fn run_server(config: StudentServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let student_repo = Arc::new(StudentStore::new(db.get_connection()));
    let auth_client = Arc::new(AuthClient::new(&config.auth_service_url, &config.http_client)?);
    let tuition_client = Arc::new(TuitionClient::new(
        &config.tuition_service_url,
        &config.http_client,
    )?);
    let payment_client = Arc::new(PaymentClient::new(
        &config.payment_service_url,
        &config.http_client,
    )?);

    let student_service = Arc::new(StudentManager::new(
        student_repo,
        auth_client,
        tuition_client,
        payment_client,
    ));

    let state = AppState::new(student_service, Some(db));
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.bind_addr().parse()?;
    info!("{} listening on {}", config.service.service_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
