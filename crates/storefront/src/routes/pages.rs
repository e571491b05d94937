//! Public page route handlers.
//!
//! Every page renders its current data server-side. Pages that show shared
//! data also open a live stream (see [`super::live`]) so admin edits show up
//! without a reload.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::services::catalog::{CONTACT_LINKS, ContactLink};
use crate::services::{AboutCopy, CatalogLoader, HomeCopy, SettingsLoader};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub active: &'static str,
    pub copy: HomeCopy,
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/store.html")]
pub struct StoreTemplate {
    pub active: &'static str,
    pub catalog: CatalogLoader,
    pub contacts: &'static [ContactLink],
}

/// Payment methods page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/payment.html")]
pub struct PaymentTemplate {
    pub active: &'static str,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub active: &'static str,
    pub copy: AboutCopy,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub active: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the home page.
///
/// Falls back to the default copy if settings cannot be read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let mut loader = SettingsLoader::<HomeCopy>::new();
    loader.reload(state.pool()).await;

    HomeTemplate {
        active: "/",
        copy: loader.view().clone(),
    }
}

/// Display the store page.
///
/// Shows the empty state if the catalog cannot be read.
#[instrument(skip(state))]
pub async fn store(State(state): State<AppState>) -> impl IntoResponse {
    let mut catalog = CatalogLoader::new();
    catalog.reload(state.pool()).await;

    StoreTemplate {
        active: "/store",
        catalog,
        contacts: &CONTACT_LINKS,
    }
}

/// Display the payment methods page.
#[instrument]
pub async fn payment() -> impl IntoResponse {
    PaymentTemplate { active: "/payment" }
}

/// Display the about page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> impl IntoResponse {
    let mut loader = SettingsLoader::<AboutCopy>::new();
    loader.reload(state.pool()).await;

    AboutTemplate {
        active: "/about",
        copy: loader.view().clone(),
    }
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { active: "" })
}
