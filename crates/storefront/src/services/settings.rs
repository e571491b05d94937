//! Settings-driven page copy.
//!
//! Pages never show the settings row directly. Each one keeps a small view
//! of the fields it needs, seeded with defaults, and merges every fetched row
//! into that view: blank text keeps the value already shown.

use sqlx::PgPool;
use tracing::instrument;

use tehtehair_core::StoreSettings;

use crate::db::{RepositoryError, SettingsRepository};

/// Hero image used when the settings row has none.
pub const DEFAULT_HERO_IMAGE: &str = "/static/images/hero-banner.svg";

/// A page's projection of the settings row.
pub trait SettingsView: Clone + Default {
    /// The view after taking in a freshly fetched row.
    #[must_use]
    fn merged(&self, settings: &StoreSettings) -> Self;
}

/// Copy for the home page hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeCopy {
    pub store_name: String,
    pub cta_text: String,
    pub hero_image_url: Option<String>,
}

impl Default for HomeCopy {
    fn default() -> Self {
        Self {
            store_name: "TehTehAir Store".to_owned(),
            cta_text: "Explore Store".to_owned(),
            hero_image_url: None,
        }
    }
}

impl HomeCopy {
    /// Hero background, falling back to the bundled banner.
    #[must_use]
    pub fn hero_image(&self) -> &str {
        self.hero_image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_HERO_IMAGE)
    }
}

impl SettingsView for HomeCopy {
    fn merged(&self, settings: &StoreSettings) -> Self {
        Self {
            store_name: keep_if_blank(&settings.store_name, &self.store_name),
            cta_text: keep_if_blank(&settings.cta_text, &self.cta_text),
            // The image always follows the row; a missing one means the banner.
            hero_image_url: settings.hero_image_url.clone(),
        }
    }
}

/// Copy for the about page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutCopy {
    pub about_description: String,
}

impl Default for AboutCopy {
    fn default() -> Self {
        Self {
            about_description: "We deliver fast and safe. Your satisfaction is our priority."
                .to_owned(),
        }
    }
}

impl SettingsView for AboutCopy {
    fn merged(&self, settings: &StoreSettings) -> Self {
        Self {
            about_description: keep_if_blank(
                &settings.about_description,
                &self.about_description,
            ),
        }
    }
}

fn keep_if_blank(fetched: &str, current: &str) -> String {
    if fetched.is_empty() {
        current.to_owned()
    } else {
        fetched.to_owned()
    }
}

/// Holds the last successfully merged view.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader<V> {
    view: V,
}

impl<V: SettingsView> SettingsLoader<V> {
    /// Start from the view's defaults.
    #[must_use]
    pub fn new() -> Self {
        Self { view: V::default() }
    }

    /// The copy currently on display.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Fold a fetch result into the view.
    ///
    /// Returns `true` when the view was updated. Failures, including a table
    /// that does not hold exactly one row, are logged and ignored.
    pub fn apply(&mut self, result: Result<StoreSettings, RepositoryError>) -> bool {
        match result {
            Ok(settings) => {
                self.view = self.view.merged(&settings);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load store settings");
                false
            }
        }
    }

    /// Re-read the settings row.
    #[instrument(skip_all)]
    pub async fn reload(&mut self, pool: &PgPool) -> bool {
        let result = SettingsRepository::new(pool).fetch_singleton().await;
        self.apply(result)
    }
}
