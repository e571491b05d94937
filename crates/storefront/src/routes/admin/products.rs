//! Admin product mutations (HTMX).

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use tracing::instrument;

use super::mutation_response;
use crate::middleware::RequireAdmin;
use crate::services::AdminWorkflow;
use crate::services::admin::ProductForm;
use crate::state::AppState;

/// Create a product.
#[instrument(skip_all)]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let outcome = AdminWorkflow::new(state.pool()).create_product(&form).await;
    mutation_response(outcome)
}

/// Replace a product's editable fields.
#[instrument(skip(_admin, state, form))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let outcome = AdminWorkflow::new(state.pool())
        .update_product(&id, &form)
        .await;
    mutation_response(outcome)
}

/// Flip a product's hidden flag.
#[instrument(skip(_admin, state))]
pub async fn toggle_visibility(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let outcome = AdminWorkflow::new(state.pool()).toggle_visibility(&id).await;
    mutation_response(outcome)
}

/// Delete a product.
#[instrument(skip(_admin, state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let outcome = AdminWorkflow::new(state.pool()).delete_product(&id).await;
    mutation_response(outcome)
}
