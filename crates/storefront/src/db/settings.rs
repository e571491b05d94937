//! Store settings repository.
//!
//! `store_settings` is a singleton table. Reads use fetch-exactly-one
//! semantics: zero rows or more than one row is an error, never a guess.

use sqlx::PgPool;

use tehtehair_core::{SettingsId, SettingsUpdate, StoreSettings};

use super::RepositoryError;

const SETTINGS_COLUMNS: &str = "id, store_name, store_description, cta_text, about_description, \
                                payment_description, hero_image_url, store_logo_url, \
                                payment_logo_url";

/// Raw `store_settings` row.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    id: SettingsId,
    store_name: String,
    store_description: String,
    cta_text: String,
    about_description: String,
    payment_description: String,
    hero_image_url: Option<String>,
    store_logo_url: Option<String>,
    payment_logo_url: Option<String>,
}

impl From<SettingsRow> for StoreSettings {
    fn from(row: SettingsRow) -> Self {
        Self {
            id: row.id,
            store_name: row.store_name,
            store_description: row.store_description,
            cta_text: row.cta_text,
            about_description: row.about_description,
            payment_description: row.payment_description,
            hero_image_url: row.hero_image_url,
            store_logo_url: row.store_logo_url,
            payment_logo_url: row.payment_logo_url,
        }
    }
}

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the one settings row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotSingleRow` if the table holds zero or
    /// several rows.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_singleton(&self) -> Result<StoreSettings, RepositoryError> {
        // Two rows are enough to tell "one" from "many".
        let mut rows: Vec<SettingsRow> = sqlx::query_as(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM store_settings LIMIT 2"
        ))
        .fetch_all(self.pool)
        .await?;

        match rows.len() {
            1 => rows.pop().map(StoreSettings::from).ok_or(RepositoryError::NotSingleRow(0)),
            n => Err(RepositoryError::NotSingleRow(n)),
        }
    }

    /// Number of rows in the table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_settings")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Replace the text fields of the row with this id.
    ///
    /// Image references are never written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: SettingsId,
        update: &SettingsUpdate,
    ) -> Result<StoreSettings, RepositoryError> {
        let row: Option<SettingsRow> = sqlx::query_as(&format!(
            "UPDATE store_settings \
             SET store_name = $2, store_description = $3, cta_text = $4, \
                 about_description = $5, payment_description = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SETTINGS_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.store_name)
        .bind(&update.store_description)
        .bind(&update.cta_text)
        .bind(&update.about_description)
        .bind(&update.payment_description)
        .fetch_optional(self.pool)
        .await?;

        row.map(StoreSettings::from).ok_or(RepositoryError::NotFound)
    }

    /// Insert a settings row.
    ///
    /// Only provisioning tools call this; the web application never creates
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, values: &SettingsUpdate) -> Result<StoreSettings, RepositoryError> {
        let row: SettingsRow = sqlx::query_as(&format!(
            "INSERT INTO store_settings \
                 (store_name, store_description, cta_text, about_description, payment_description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SETTINGS_COLUMNS}"
        ))
        .bind(&values.store_name)
        .bind(&values.store_description)
        .bind(&values.cta_text)
        .bind(&values.about_description)
        .bind(&values.payment_description)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
