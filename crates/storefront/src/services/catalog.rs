//! Public product catalog.
//!
//! The store page and its live stream each own a [`CatalogLoader`]. A reload
//! replaces the whole list on success and leaves it untouched on failure.

use sqlx::PgPool;
use tracing::instrument;

use tehtehair_core::Product;

use crate::db::{ProductRepository, RepositoryError};

/// Text shown in place of the grid when nothing is listed.
pub const EMPTY_CATALOG_MESSAGE: &str = "No products available at the moment";

/// A chat contact offered by the "Buy Now" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Where buyers are sent to complete a purchase.
pub const CONTACT_LINKS: [ContactLink; 2] = [
    ContactLink {
        label: "Telegram @tephh",
        href: "https://t.me/tephh",
    },
    ContactLink {
        label: "Messenger @putephh",
        href: "https://m.me/putephh",
    },
];

/// Product display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Discounted price, e.g. `$15.00`.
    pub price: String,
    /// Original price, shown struck through.
    pub compare_at_price: String,
    /// Badge such as `-25%`; absent when the original price is not positive.
    pub discount_label: Option<String>,
    pub image_url: Option<String>,
}

impl ProductCardView {
    /// Price line as plain text, e.g. `$15.00 / $20.00`.
    #[must_use]
    pub fn price_summary(&self) -> String {
        format!("{} / {}", self.price, self.compare_at_price)
    }
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.discount_price.display(),
            compare_at_price: product.original_price.display(),
            discount_label: product.discount_label(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Holds the last successfully loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    products: Vec<ProductCardView>,
}

impl CatalogLoader {
    /// Create a loader that has not loaded anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Cards currently on display.
    #[must_use]
    pub fn products(&self) -> &[ProductCardView] {
        &self.products
    }

    /// Whether the empty state should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Text for the empty state.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        EMPTY_CATALOG_MESSAGE
    }

    /// Fold a fetch result into the display state.
    ///
    /// Returns `true` when the state was replaced. Hidden rows are dropped
    /// even if the query returned them.
    pub fn apply(&mut self, result: Result<Vec<Product>, RepositoryError>) -> bool {
        match result {
            Ok(products) => {
                self.products = products
                    .iter()
                    .filter(|product| product.is_listed())
                    .map(ProductCardView::from)
                    .collect();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                false
            }
        }
    }

    /// Re-read the visible catalog.
    #[instrument(skip_all)]
    pub async fn reload(&mut self, pool: &PgPool) -> bool {
        let result = ProductRepository::new(pool).list_visible().await;
        self.apply(result)
    }
}
