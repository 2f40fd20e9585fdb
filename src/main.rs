//! `homefix` binary entrypoint.
//!
//! Loads configuration from the environment, seeds the in-memory catalog and
//! partner directory, and serves the HTTP API.

use std::sync::Arc;

use secrecy::ExposeSecret;
use uuid::Uuid;

use homefix::adapters::auth::JwtSessionValidator;
use homefix::adapters::http::{app_router, AppState, RouterOptions};
use homefix::adapters::memory::{InMemoryCatalog, InMemoryPartnerDirectory};
use homefix::config::AppConfig;
use homefix::domain::catalog::ServiceSummary;
use homefix::domain::foundation::{CategoryId, DomainError, PartnerId, ServiceId, UserId};
use homefix::domain::partner::Partner;
use homefix::domain::payment::WebhookVerifier;
use homefix::observability::{init_logging, LogFormat};

/// Fixed ids so local clients can book without discovering the catalog.
fn demo_catalog() -> Result<InMemoryCatalog, DomainError> {
    let plumbing = CategoryId::from_uuid(Uuid::from_u128(0x1));
    let electrical = CategoryId::from_uuid(Uuid::from_u128(0x2));

    InMemoryCatalog::new()
        .with_service(ServiceSummary::new(
            ServiceId::from_uuid(Uuid::from_u128(0x101)),
            plumbing,
            "Leak repair",
        ))?
        .with_service(ServiceSummary::new(
            ServiceId::from_uuid(Uuid::from_u128(0x102)),
            plumbing,
            "Boiler service",
        ))?
        .with_service(ServiceSummary::new(
            ServiceId::from_uuid(Uuid::from_u128(0x201)),
            electrical,
            "Socket installation",
        ))
}

fn demo_partners() -> Result<InMemoryPartnerDirectory, Box<dyn std::error::Error>> {
    let directory = InMemoryPartnerDirectory::new();
    directory.register(Partner::new(
        PartnerId::from_uuid(Uuid::from_u128(0x9001)),
        UserId::new("partner-demo")?,
        "Demo Plumbing Ltd",
        "plumbing",
        true,
    ))?;
    Ok(directory)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(
        LogFormat::for_environment(&config.server.environment),
        &config.server.log_level,
    );

    let state = AppState::in_memory(
        Arc::new(demo_catalog()?),
        Arc::new(demo_partners()?),
        config.payment.currency.clone(),
    );
    let auth = Arc::new(JwtSessionValidator::new(
        config.auth.jwt_secret.expose_secret().as_bytes(),
        config.auth.issuer.clone(),
    ));
    let verifier = Arc::new(
        WebhookVerifier::new(config.payment.webhook_secret.expose_secret().clone())
            .with_tolerance(config.payment.webhook_tolerance_secs),
    );

    let router = app_router(
        state,
        auth,
        verifier,
        RouterOptions {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        currency = %config.payment.currency,
        "homefix listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
