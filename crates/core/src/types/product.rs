//! Catalog products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{Price, PriceError, discount_percent};

/// A product row.
///
/// The discount price is expected not to exceed the original price, but
/// nothing enforces it; a larger discount price simply yields a negative
/// discount percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub original_price: Price,
    pub discount_price: Price,
    pub image_url: Option<String>,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whole-number percentage saved, if the original price is positive.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        discount_percent(self.original_price, self.discount_price)
    }

    /// Badge text such as `-25%`.
    #[must_use]
    pub fn discount_label(&self) -> Option<String> {
        self.discount_percent().map(|pct| format!("-{pct}%"))
    }

    /// Whether the public catalog may list this product.
    #[must_use]
    pub const fn is_listed(&self) -> bool {
        !self.is_hidden
    }
}

/// Errors that can occur when building a [`ProductDraft`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The product name is blank.
    #[error("product name cannot be empty")]
    MissingName,
    /// The original price field is missing or invalid.
    #[error("original price: {0}")]
    OriginalPrice(PriceError),
    /// The discount price field is missing or invalid.
    #[error("discount price: {0}")]
    DiscountPrice(PriceError),
}

/// The editable fields of a product, as submitted by the admin forms.
///
/// Used for both insert and full-replace update. Visibility is not part of
/// the draft; it only changes through the visibility toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub original_price: Price,
    pub discount_price: Price,
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Validate raw form fields.
    ///
    /// Blank description and image URL become `None`. Both prices are
    /// required.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the name is blank or a price is missing or
    /// not a number.
    pub fn from_form(
        name: &str,
        description: &str,
        original_price: &str,
        discount_price: &str,
        image_url: &str,
    ) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        Ok(Self {
            name: name.to_owned(),
            description: non_blank(description),
            original_price: Price::parse(original_price).map_err(DraftError::OriginalPrice)?,
            discount_price: Price::parse(discount_price).map_err(DraftError::DiscountPrice)?,
            image_url: non_blank(image_url),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
