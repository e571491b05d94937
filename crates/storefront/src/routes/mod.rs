//! HTTP route handlers for the store.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page
//! GET  /store            - Product catalog
//! GET  /payment          - Payment methods
//! GET  /about            - About page
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (database)
//!
//! # Live updates (SSE)
//! GET  /live/home        - Home hero refreshes
//! GET  /live/about       - About copy refreshes
//! GET  /live/store       - Catalog refreshes
//!
//! # Admin
//! /admin/...             - See [`admin`]
//!
//! *                      - 404 page
//! ```

pub mod admin;
pub mod health;
pub mod live;
pub mod pages;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the live stream routes router.
pub fn live_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(live::home))
        .route("/about", get(live::about))
        .route("/store", get(live::store))
}

/// Create all routes for the store.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(pages::home))
        .route("/store", get(pages::store))
        .route("/payment", get(pages::payment))
        .route("/about", get(pages::about))
        // Health checks
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Live updates
        .nest("/live", live_routes())
        // Admin panel
        .nest("/admin", admin::admin_routes())
        .fallback(pages::not_found)
}
