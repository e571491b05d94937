//! Admin authentication extractor.
//!
//! The admin panel is guarded by a single boolean in the session. Handlers
//! behind the guard take [`RequireAdmin`]; anything else is sent back to the
//! login page.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Path of the admin login page.
pub const LOGIN_PATH: &str = "/admin";

/// Extractor that requires the admin flag.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(_admin: RequireAdmin) -> impl IntoResponse {
///     "welcome back"
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when the admin flag is missing.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminRejection {
    /// Redirect to the login page (plain navigation).
    RedirectToLogin,
    /// Tell htmx to navigate to the login page instead of swapping.
    HtmxRedirect,
    /// Session layer is missing.
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::HtmxRedirect => {
                let mut response = StatusCode::OK.into_response();
                response
                    .headers_mut()
                    .insert("HX-Redirect", HeaderValue::from_static(LOGIN_PATH));
                response
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthorized)?;

        if is_admin(session).await {
            return Ok(Self);
        }

        if is_htmx_request(parts) {
            Err(AdminRejection::HtmxRedirect)
        } else {
            Err(AdminRejection::RedirectToLogin)
        }
    }
}

/// Whether the session carries the admin flag.
///
/// Unreadable session data counts as logged out.
pub async fn is_admin(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::ADMIN_AUTH)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Helper to set the admin flag after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_flag(session: &Session) -> Result<(), tower_sessions::session::Error> {
    // Fresh id on privilege change.
    session.cycle_id().await?;
    session.insert(session_keys::ADMIN_AUTH, true).await
}

/// Helper to clear the admin flag (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin_flag(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

fn is_htmx_request(parts: &Parts) -> bool {
    parts
        .headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use tower_sessions::MemoryStore;

    use super::*;

    fn parts(htmx: bool) -> Parts {
        let mut builder = Request::builder().uri("/admin/dashboard");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_missing_flag_redirects_navigation() {
        let mut parts = parts(false);
        parts.extensions.insert(session());

        let rejection = RequireAdmin::from_request_parts(&mut parts, &()).await.err();
        assert_eq!(rejection, Some(AdminRejection::RedirectToLogin));
    }

    #[tokio::test]
    async fn test_missing_flag_redirects_htmx_via_header() {
        let mut parts = parts(true);
        parts.extensions.insert(session());

        let rejection = RequireAdmin::from_request_parts(&mut parts, &()).await.err();
        assert_eq!(rejection, Some(AdminRejection::HtmxRedirect));

        let response = AdminRejection::HtmxRedirect.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["HX-Redirect"], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_flag_round_trip() {
        let session = session();
        assert!(!is_admin(&session).await);

        set_admin_flag(&session).await.unwrap();
        assert!(is_admin(&session).await);

        let mut parts = parts(false);
        parts.extensions.insert(session.clone());
        assert!(RequireAdmin::from_request_parts(&mut parts, &()).await.is_ok());

        clear_admin_flag(&session).await.unwrap();
        assert!(!is_admin(&session).await);
    }

    #[tokio::test]
    async fn test_without_session_layer_is_unauthorized() {
        let mut parts = parts(false);
        let rejection = RequireAdmin::from_request_parts(&mut parts, &()).await.err();
        assert_eq!(rejection, Some(AdminRejection::Unauthorized));
    }
}
