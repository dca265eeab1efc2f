//! CourseCat Catalog Server
//!
//! Production server for the catalog REST APIs:
//! - People API: create/read/list/update with marketing site publishing
//! - Health APIs: liveness and readiness probes
//!
//! ## Configuration
//!
//! Loaded from `config.toml` / `coursecat.toml` (see cc-config for search
//! paths) with `COURSECAT_*` environment variable overrides:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COURSECAT_HTTP_PORT` | `8080` | HTTP API port |
//! | `COURSECAT_MONGODB_URI` | `mongodb://localhost:27017` | MongoDB connection URI |
//! | `COURSECAT_MONGODB_DATABASE` | `coursecat` | MongoDB database name |
//! | `COURSECAT_AUTH_SECRET_KEY` | - | HMAC secret for JWT validation |
//! | `COURSECAT_FLAGS_ENABLED` | - | Comma-separated switch names |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;
use axum::Router;
use utoipa_axum::router::OpenApiRouter;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use anyhow::Result;
use tracing::info;
use tokio::{signal, net::TcpListener};
use utoipa_swagger_ui::SwaggerUi;

use cc_config::ConfigLoader;
use cc_catalog::{
    AuditLogRepository, AuditService, AuthService, AuthorizationService,
    GroupRepository, InMemoryFlags, MarketingSitePeople, OrganizationRepository,
    PartnerRepository, PersonRepository,
};
use cc_catalog::auth::auth_service::AuthConfig;
use cc_catalog::api::{AppState, AuthLayer, HealthState, PeopleState, health_router, people_router};
use cc_catalog::person::operations::CreatePerson;
use cc_catalog::seed::DevDataSeeder;

#[tokio::main]
async fn main() -> Result<()> {
    cc_common::logging::init_logging("cc-catalog-server");

    info!("Starting CourseCat Catalog Server");

    let config = ConfigLoader::new().load()?;

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", config.mongodb.uri, config.mongodb.database);
    let mongo_client = mongodb::Client::with_uri_str(&config.mongodb.uri).await?;
    let db = mongo_client.database(&config.mongodb.database);

    // Seed development data if in dev mode
    if config.dev_mode {
        let seeder = DevDataSeeder::new(db.clone());
        if let Err(e) = seeder.seed().await {
            tracing::warn!("Dev data seeding skipped (data may already exist): {}", e);
        }
    }

    // Initialize repositories
    let person_repo = Arc::new(PersonRepository::new(&db));
    let organization_repo = Arc::new(OrganizationRepository::new(&db));
    let partner_repo = Arc::new(PartnerRepository::new(&db));
    let group_repo = Arc::new(GroupRepository::new(&db));
    let audit_log_repo = Arc::new(AuditLogRepository::new(&db));

    person_repo.ensure_indexes().await?;

    // Initialize services
    let auth_service = Arc::new(AuthService::new(AuthConfig {
        secret_key: config.auth.secret_key.clone(),
        issuer: config.auth.issuer.clone(),
        audience: config.auth.audience.clone(),
        token_expiry_secs: config.auth.token_expiry_secs,
    }));
    let authz_service = Arc::new(AuthorizationService::new(group_repo.clone()));
    let audit_service = Arc::new(AuditService::new(audit_log_repo));

    // Feature flags seeded from config
    let flags = Arc::new(InMemoryFlags::from_names(config.flags.enabled.iter().cloned()));

    // Marketing site client
    let publisher = Arc::new(MarketingSitePeople::new(
        config.marketing.timeout_secs,
        &config.marketing.user_agent,
    )?);

    // Create person operation (publish-then-persist)
    let create_person = Arc::new(CreatePerson::new(
        person_repo.clone(),
        organization_repo.clone(),
        publisher,
        flags,
    ));

    let app_state = AppState {
        auth_service,
        authz_service,
    };

    let people_state = PeopleState {
        person_repo,
        organization_repo,
        partner_repo,
        create_person,
        audit_service: Some(audit_service),
    };

    // Build API router using OpenApiRouter for auto-collected OpenAPI paths
    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/api/people", people_router(people_state))
        .split_for_parts();

    openapi.info.title = "CourseCat Catalog API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description = Some("REST APIs for catalog people management".to_string());

    let app = Router::new()
        .merge(router)
        .merge(health_router(HealthState::new(Some(db))))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        // Auth middleware
        .layer(AuthLayer::new(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    // Start API server
    let addr = format!("{}:{}", config.http.host, config.http.port);
    info!("API server listening on http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    let api_task = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    info!("CourseCat Catalog Server started");
    info!("Press Ctrl+C to shutdown");

    // Wait for shutdown
    shutdown_signal().await;
    info!("Shutdown signal received...");

    api_task.abort();

    info!("CourseCat Catalog Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
