//! HTTP API Layer
//!
//! This crate provides the REST API for the contact directory core using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: user-facing claim routes, contact-scoped routes, and the
//!   administrative surface
//! - **Middleware**: bearer authentication, admin/ownership access guards,
//!   audit logging
//! - **DTOs**: typed request/response bodies validated at the boundary
//! - **Error Handling**: machine-readable error codes on every failure
//!
//! The ledger, registry, and workflow coordinator are constructed once at
//! startup and injected through [`AppState`]; there are no process-wide
//! singletons.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimLedger, ClaimWorkflow};
use domain_ownership::OwnershipRegistry;
use infra_store::SnapshotStore;

use crate::config::ApiConfig;
use crate::handlers::{admin, claims, contacts, health};
use crate::middleware::{
    audit_middleware, auth_middleware, require_admin, require_contact_access,
};

/// Snapshot file holding the claim request collection
pub const CLAIM_REQUESTS_FILE: &str = "claim_requests.json";
/// Snapshot file holding the ownership collection
pub const CONTACT_OWNERSHIP_FILE: &str = "contact_ownership.json";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<ClaimLedger>,
    pub registry: Arc<OwnershipRegistry>,
    pub workflow: Arc<ClaimWorkflow>,
    pub config: ApiConfig,
}

impl AppState {
    /// Opens both collections from the configured data directory and wires
    /// up the workflow coordinator
    pub async fn initialize(config: ApiConfig) -> anyhow::Result<Self> {
        let claim_store = SnapshotStore::new(&config.data_dir, CLAIM_REQUESTS_FILE);
        let ownership_store = SnapshotStore::new(&config.data_dir, CONTACT_OWNERSHIP_FILE);

        let ledger = Arc::new(ClaimLedger::open(claim_store).await?);
        let registry = Arc::new(OwnershipRegistry::open(ownership_store).await?);
        let workflow = Arc::new(ClaimWorkflow::new(ledger.clone(), registry.clone()));

        Ok(Self {
            ledger,
            registry,
            workflow,
            config,
        })
    }
}

/// Creates the main API router
///
/// # Routes
///
/// - `/health`, `/health/ready` — public
/// - `/api/v1/claims`, `/api/v1/me`, `/api/v1/contacts` — authenticated users
/// - `/api/v1/contacts/:contact_id/ownership` — owner or admin only
/// - `/api/v1/admin/*` — admin role only
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claim routes for the authenticated user
    let claim_routes = Router::new()
        .route("/", post(claims::submit_claim).get(claims::list_my_claims))
        .route("/:id", delete(claims::revoke_claim));

    // Current-user routes
    let me_routes = Router::new()
        .route("/contacts", get(claims::my_contacts))
        .route("/stats", get(claims::my_stats));

    // Contact routes; the ownership lookup requires owning the contact
    let contact_routes = Router::new()
        .route("/unclaimed", post(contacts::unclaimed_contacts))
        .merge(
            Router::new()
                .route("/:contact_id/ownership", get(contacts::contact_ownership))
                .route_layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    require_contact_access,
                )),
        );

    // Administrative surface
    let admin_routes = Router::new()
        .route("/claims", get(admin::list_claims))
        .route("/claims/pending", get(admin::pending_claims))
        .route("/claims/:id/approve", put(admin::approve_claim))
        .route("/claims/:id/reject", put(admin::reject_claim))
        .route("/claims/batch", post(admin::batch_review))
        .route("/ownerships", post(admin::assign_ownership))
        .route("/ownerships/batch", post(admin::batch_assign))
        .route("/ownerships/:contact_id/transfer", post(admin::transfer_ownership))
        .route("/ownerships/:contact_id", delete(admin::unassign_ownership))
        .route("/stats", get(admin::admin_stats))
        .route_layer(axum_middleware::from_fn(require_admin));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claim_routes)
        .nest("/me", me_routes)
        .nest("/contacts", contact_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
