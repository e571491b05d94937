//! Admin login and logout.
//!
//! The login is a gate, not an identity: one configured username/password
//! pair unlocks the dashboard for the rest of the browser session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{auth::LOGIN_PATH, clear_admin_flag, is_admin, set_admin_flag};
use crate::services::Toast;
use crate::services::admin::LOGIN_REJECTED;
use crate::state::AppState;

/// Where a successful login lands. The dashboard shows the success toast.
pub const LOGIN_REDIRECT: &str = "/admin/dashboard?welcome=1";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub active: &'static str,
    pub toasts: Vec<Toast>,
}

/// Display the login page.
///
/// An admin who is already logged in goes straight to the dashboard.
pub async fn login_page(session: Session) -> Response {
    if is_admin(&session).await {
        return Redirect::to("/admin/dashboard").into_response();
    }

    LoginTemplate {
        active: "",
        toasts: Vec::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.config().admin.matches(&form.username, &form.password) {
        tracing::warn!("Admin login rejected");
        return LoginTemplate {
            active: "",
            toasts: vec![Toast::error(LOGIN_REJECTED)],
        }
        .into_response();
    }

    if let Err(e) = set_admin_flag(&session).await {
        tracing::error!("Failed to set session: {e}");
        return LoginTemplate {
            active: "",
            toasts: vec![Toast::error(LOGIN_REJECTED)],
        }
        .into_response();
    }

    tracing::info!("Admin logged in");
    Redirect::to(LOGIN_REDIRECT).into_response()
}

/// Handle logout.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_admin_flag(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    Redirect::to(LOGIN_PATH)
}
