//! Admin settings mutation (HTMX).

use axum::{Form, extract::State, response::Response};
use tracing::instrument;

use super::mutation_response;
use crate::middleware::RequireAdmin;
use crate::services::AdminWorkflow;
use crate::services::admin::SettingsForm;
use crate::state::AppState;

/// Replace the text fields of the settings row.
#[instrument(skip_all)]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let outcome = AdminWorkflow::new(state.pool())
        .update_settings(&form)
        .await;
    mutation_response(outcome)
}
