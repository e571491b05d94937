//! Session-related types.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the admin flag set by a successful login.
    pub const ADMIN_AUTH: &str = "adminAuth";
}
