//! The store settings singleton.
//!
//! `store_settings` is expected to hold exactly one row. It is provisioned
//! ahead of time and only its text fields are edited at runtime.

use serde::{Deserialize, Serialize};

use super::id::SettingsId;

/// Store-wide copy and imagery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub id: SettingsId,
    pub store_name: String,
    pub store_description: String,
    pub cta_text: String,
    pub about_description: String,
    pub payment_description: String,
    pub hero_image_url: Option<String>,
    pub store_logo_url: Option<String>,
    pub payment_logo_url: Option<String>,
}

/// Text fields replaced by the admin settings form.
///
/// Image references are deliberately absent: they are not editable from the
/// form and an update never touches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub store_name: String,
    pub store_description: String,
    pub cta_text: String,
    pub about_description: String,
    pub payment_description: String,
}
