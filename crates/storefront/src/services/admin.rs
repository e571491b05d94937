//! Admin mutation workflow.
//!
//! Every dashboard mutation follows the same path: run one write, report the
//! result as a toast, and on success reload products and settings together.
//! A failed write skips the reload so the dashboard keeps showing what it
//! had. Nothing is retried or rolled back.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use tehtehair_core::{
    DraftError, Product, ProductDraft, ProductId, SettingsId, SettingsUpdate, StoreSettings,
};

use crate::db::{ProductRepository, RepositoryError, SettingsRepository};

/// Toast shown after a correct login.
pub const LOGIN_SUCCEEDED: &str = "LOG IN SUCCESS";

/// Toast shown after a rejected login.
pub const LOGIN_REJECTED: &str = "YOU'RE NOT AN ADMIN";

/// Toast shown when the dashboard data could not be read.
pub const LOAD_FAILED: &str = "Failed to load data";

// =============================================================================
// Toasts
// =============================================================================

/// Toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, ToastKind::Success)
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Product add/edit form as posted by the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub original_price: String,
    #[serde(default)]
    pub discount_price: String,
    #[serde(default)]
    pub image_url: String,
}

impl ProductForm {
    /// Validate into a draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] for a blank name or a missing/invalid price.
    pub fn to_draft(&self) -> Result<ProductDraft, DraftError> {
        ProductDraft::from_form(
            &self.name,
            &self.description,
            &self.original_price,
            &self.discount_price,
            &self.image_url,
        )
    }
}

/// Settings form as posted by the dashboard.
///
/// The hidden `id` field scopes the update to the row that was loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_description: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub about_description: String,
    #[serde(default)]
    pub payment_description: String,
}

impl SettingsForm {
    /// The row id the form was rendered for.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidId`] if the hidden field is not a UUID.
    pub fn settings_id(&self) -> Result<SettingsId, FormError> {
        parse_id(&self.id)
    }

    /// The text fields, stored as submitted.
    #[must_use]
    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            store_name: self.store_name.clone(),
            store_description: self.store_description.clone(),
            cta_text: self.cta_text.clone(),
            about_description: self.about_description.clone(),
            payment_description: self.payment_description.clone(),
        }
    }
}

/// Errors in submitted form data.
#[derive(Debug, Error)]
pub enum FormError {
    /// Product fields failed validation.
    #[error("invalid product: {0}")]
    Draft(#[from] DraftError),

    /// A row id was not a UUID.
    #[error("invalid id: {0}")]
    InvalidId(String),
}

fn parse_id<T>(raw: &str) -> Result<T, FormError>
where
    T: std::str::FromStr,
{
    raw.trim()
        .parse()
        .map_err(|_| FormError::InvalidId(raw.to_owned()))
}

// =============================================================================
// Mutations
// =============================================================================

/// The five dashboard mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateProduct,
    UpdateProduct,
    ToggleVisibility,
    DeleteProduct,
    UpdateSettings,
}

impl MutationKind {
    /// Toast text when the write fails.
    #[must_use]
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::CreateProduct => "Failed to add product",
            Self::UpdateProduct => "Failed to update product",
            Self::ToggleVisibility => "Failed to update visibility",
            Self::DeleteProduct => "Failed to delete product",
            Self::UpdateSettings => "Failed to update settings",
        }
    }

    /// Whether the mutation is sent from the settings tab rather than the
    /// products tab.
    #[must_use]
    pub const fn is_settings(&self) -> bool {
        matches!(self, Self::UpdateSettings)
    }
}

/// A write that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    ProductCreated(Product),
    ProductUpdated(Product),
    VisibilityChanged { hidden: bool },
    ProductDeleted,
    SettingsUpdated(StoreSettings),
}

impl Applied {
    /// Toast text for the write.
    #[must_use]
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::ProductCreated(_) => "Product added successfully",
            Self::ProductUpdated(_) => "Product updated successfully",
            Self::VisibilityChanged { hidden: true } => "Product hidden",
            Self::VisibilityChanged { hidden: false } => "Product shown",
            Self::ProductDeleted => "Product deleted successfully",
            Self::SettingsUpdated(_) => "Settings updated successfully",
        }
    }
}

/// Why a mutation did not apply.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<DraftError> for MutationError {
    fn from(err: DraftError) -> Self {
        Self::Form(FormError::Draft(err))
    }
}

/// The toast a mutation result produces.
#[must_use]
pub fn settle(kind: MutationKind, result: &Result<Applied, MutationError>) -> Toast {
    match result {
        Ok(applied) => Toast::success(applied.success_message()),
        Err(_) => Toast::error(kind.failure_message()),
    }
}

// =============================================================================
// Dashboard data
// =============================================================================

/// Everything the dashboard renders, read in one go.
///
/// A side that failed to load is `None`; the caller keeps whatever it was
/// showing for that side.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub products: Option<Vec<Product>>,
    pub settings: Option<StoreSettings>,
}

impl DashboardData {
    /// Fetch all products and the settings row concurrently.
    #[instrument(skip_all)]
    pub async fn load(pool: &PgPool) -> Self {
        let products_repo = ProductRepository::new(pool);
        let settings_repo = SettingsRepository::new(pool);
        let (products, settings) =
            tokio::join!(products_repo.list_all(), settings_repo.fetch_singleton());

        Self {
            products: products
                .inspect_err(|e| tracing::error!(error = %e, "Failed to load products"))
                .ok(),
            settings: settings
                .inspect_err(|e| tracing::error!(error = %e, "Failed to load store settings"))
                .ok(),
        }
    }

    /// Whether both sides loaded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.products.is_some() && self.settings.is_some()
    }

    /// `Failed to load data` if either side is missing.
    #[must_use]
    pub fn load_toast(&self) -> Option<Toast> {
        (!self.is_complete()).then(|| Toast::error(LOAD_FAILED))
    }
}

/// Result of one dashboard mutation.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub toasts: Vec<Toast>,
    /// Freshly reloaded data; `None` when the write failed and nothing was
    /// reloaded.
    pub refreshed: Option<DashboardData>,
}

impl MutationOutcome {
    /// Whether the write itself succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.toasts.first().is_some_and(Toast::is_success)
    }
}

/// Runs dashboard mutations against the database.
pub struct AdminWorkflow<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminWorkflow<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new visible product.
    #[instrument(skip_all)]
    pub async fn create_product(&self, form: &ProductForm) -> MutationOutcome {
        let result = self.try_create_product(form).await;
        self.finish(MutationKind::CreateProduct, result).await
    }

    /// Replace the editable fields of a product.
    #[instrument(skip(self, form))]
    pub async fn update_product(&self, id: &str, form: &ProductForm) -> MutationOutcome {
        let result = self.try_update_product(id, form).await;
        self.finish(MutationKind::UpdateProduct, result).await
    }

    /// Flip a product's hidden flag.
    #[instrument(skip(self))]
    pub async fn toggle_visibility(&self, id: &str) -> MutationOutcome {
        let result = self.try_toggle_visibility(id).await;
        self.finish(MutationKind::ToggleVisibility, result).await
    }

    /// Permanently remove a product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> MutationOutcome {
        let result = self.try_delete_product(id).await;
        self.finish(MutationKind::DeleteProduct, result).await
    }

    /// Replace the text fields of the settings row.
    #[instrument(skip_all)]
    pub async fn update_settings(&self, form: &SettingsForm) -> MutationOutcome {
        let result = self.try_update_settings(form).await;
        self.finish(MutationKind::UpdateSettings, result).await
    }

    async fn try_create_product(&self, form: &ProductForm) -> Result<Applied, MutationError> {
        let draft = form.to_draft()?;
        let product = ProductRepository::new(self.pool).create(&draft).await?;
        Ok(Applied::ProductCreated(product))
    }

    async fn try_update_product(
        &self,
        id: &str,
        form: &ProductForm,
    ) -> Result<Applied, MutationError> {
        let id: ProductId = parse_id(id)?;
        let draft = form.to_draft()?;
        let product = ProductRepository::new(self.pool).update(id, &draft).await?;
        Ok(Applied::ProductUpdated(product))
    }

    async fn try_toggle_visibility(&self, id: &str) -> Result<Applied, MutationError> {
        let id: ProductId = parse_id(id)?;
        let hidden = ProductRepository::new(self.pool).toggle_hidden(id).await?;
        Ok(Applied::VisibilityChanged { hidden })
    }

    async fn try_delete_product(&self, id: &str) -> Result<Applied, MutationError> {
        let id: ProductId = parse_id(id)?;
        ProductRepository::new(self.pool).delete(id).await?;
        Ok(Applied::ProductDeleted)
    }

    async fn try_update_settings(&self, form: &SettingsForm) -> Result<Applied, MutationError> {
        let id = form.settings_id()?;
        let settings = SettingsRepository::new(self.pool)
            .update(id, &form.to_update())
            .await?;
        Ok(Applied::SettingsUpdated(settings))
    }

    async fn finish(
        &self,
        kind: MutationKind,
        result: Result<Applied, MutationError>,
    ) -> MutationOutcome {
        let toast = settle(kind, &result);

        if let Err(e) = &result {
            tracing::error!(error = %e, mutation = ?kind, "Admin mutation failed");
            return MutationOutcome {
                kind,
                toasts: vec![toast],
                refreshed: None,
            };
        }

        tracing::info!(mutation = ?kind, "Admin mutation applied");
        let data = DashboardData::load(self.pool).await;
        let mut toasts = vec![toast];
        toasts.extend(data.load_toast());

        MutationOutcome {
            kind,
            toasts,
            refreshed: Some(data),
        }
    }
}
