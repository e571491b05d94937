//! Session middleware configuration.
//!
//! Sessions are kept in process memory and the cookie expires with the
//! browser session, so the admin flag never outlives the browser tab group
//! that earned it. Restarting the server logs every admin out.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StoreConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tta_session";

/// Create the session layer with an in-memory store.
///
/// # Arguments
///
/// * `config` - Store configuration (decides the `Secure` attribute)
#[must_use]
pub fn create_session_layer(config: &StoreConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
