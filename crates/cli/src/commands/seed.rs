//! Provisioning commands.
//!
//! # Usage
//!
//! ```bash
//! # Insert the settings row when the table is empty
//! tehtehair-cli seed settings
//!
//! # Insert products from a YAML list
//! tehtehair-cli seed products --file crates/cli/seed/products.yaml
//! ```
//!
//! The product file is a list of entries. Prices are quoted strings so they
//! keep their exact decimal form:
//!
//! ```yaml
//! - name: Netflix Premium
//!   description: 1 month, 4K, 4 screens
//!   original_price: "20.00"
//!   discount_price: "15.00"
//!   image_url: https://example.com/netflix.png
//!   hidden: false
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use tehtehair_core::{DraftError, ProductDraft, SettingsUpdate};
use tehtehair_storefront::db::{ProductRepository, SettingsRepository};

use super::{CommandError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The settings table already holds more than one row.
    #[error("store_settings holds {0} rows; remove the extras by hand before seeding")]
    TooManySettingsRows(i64),

    /// The seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The seed file is not a valid product list.
    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Entries failed validation; nothing was inserted.
    #[error("{0} invalid product entries")]
    Invalid(usize),
}

impl From<tehtehair_storefront::db::RepositoryError> for SeedError {
    fn from(e: tehtehair_storefront::db::RepositoryError) -> Self {
        Self::Command(e.into())
    }
}

/// Copy written into a freshly provisioned settings row.
fn default_settings() -> SettingsUpdate {
    SettingsUpdate {
        store_name: "TehTehAir Store".to_owned(),
        store_description: "Premium digital products at unbeatable prices.".to_owned(),
        cta_text: "Explore Store".to_owned(),
        about_description: "We deliver fast and safe. Your satisfaction is our priority."
            .to_owned(),
        payment_description: "Pay with ABA or KHQR - Cambodian payment methods".to_owned(),
    }
}

/// Insert the settings singleton if the table is empty.
///
/// An existing row is left alone. More than one row is refused, since the
/// storefront cannot read settings until the extras are removed.
pub async fn settings() -> Result<(), SeedError> {
    let pool = connect().await?;
    let repo = SettingsRepository::new(&pool);

    match repo.count().await? {
        0 => {
            let row = repo.insert(&default_settings()).await?;
            info!(id = %row.id, "Settings row created");
        }
        1 => info!("Settings row already present, nothing to do"),
        n => return Err(SeedError::TooManySettingsRows(n)),
    }

    Ok(())
}

/// One product entry in a seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    #[serde(default)]
    description: String,
    original_price: String,
    discount_price: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    hidden: bool,
}

impl SeedProduct {
    fn to_draft(&self) -> Result<ProductDraft, DraftError> {
        ProductDraft::from_form(
            &self.name,
            &self.description,
            &self.original_price,
            &self.discount_price,
            &self.image_url,
        )
    }
}

/// Parse and validate a seed file.
///
/// Every entry is checked before anything is written; the returned pairs are
/// the draft and whether the product starts hidden.
fn parse_products(content: &str) -> Result<Vec<(ProductDraft, bool)>, SeedError> {
    let entries: Vec<SeedProduct> = serde_yaml::from_str(content)?;

    let mut drafts = Vec::with_capacity(entries.len());
    let mut invalid = 0;
    for (index, entry) in entries.iter().enumerate() {
        match entry.to_draft() {
            Ok(draft) => drafts.push((draft, entry.hidden)),
            Err(e) => {
                error!(entry = index, name = %entry.name, "  - {e}");
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        return Err(SeedError::Invalid(invalid));
    }
    Ok(drafts)
}

/// Insert every product listed in a YAML file.
pub async fn products(path: &Path) -> Result<(), SeedError> {
    info!(path = %path.display(), "Loading products from file");

    // Read and validate before connecting to the database
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let drafts = parse_products(&content)?;
    info!(products = drafts.len(), "Seed file validated");

    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    let mut hidden = 0;
    for (draft, starts_hidden) in &drafts {
        let product = repo.create(draft).await?;
        if *starts_hidden {
            repo.toggle_hidden(product.id).await?;
            hidden += 1;
        }
        info!(id = %product.id, "Inserted {}", product.name);
    }

    info!("Seeding complete!");
    info!("  Products inserted: {}", drafts.len());
    info!("  Hidden: {hidden}");
    Ok(())
}
