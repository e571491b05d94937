//! Admin panel routes.
//!
//! ```text
//! GET    /admin                          - Login page
//! POST   /admin                          - Login action
//! POST   /admin/logout                   - Logout action
//! GET    /admin/dashboard?tab=           - Dashboard (products | settings)
//! POST   /admin/products                 - Create product
//! POST   /admin/products/{id}            - Update product
//! DELETE /admin/products/{id}            - Delete product
//! POST   /admin/products/{id}/visibility - Toggle hidden flag
//! POST   /admin/settings                 - Update settings text
//! ```
//!
//! Everything except the login page requires the admin session flag.
//! Mutations are HTMX requests answered with out-of-band fragments.

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod settings;

use askama::Template;
use axum::{
    Router,
    response::{AppendHeaders, Html, IntoResponse, Response},
    routing::{get, post},
};

use tehtehair_core::{Product, StoreSettings};

use crate::services::{MutationOutcome, Toast};
use crate::state::AppState;

/// Client event fired after a write succeeded.
pub const MUTATION_SUCCEEDED_EVENT: &str = "mutationSucceeded";

/// Product row display data for the dashboard.
#[derive(Debug, Clone)]
pub struct AdminProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Plain amount for the edit form, e.g. `20.00`.
    pub original_price: String,
    pub discount_price: String,
    pub image_url: Option<String>,
    pub is_hidden: bool,
    pub price_summary: String,
    pub discount_label: Option<String>,
}

impl AdminProductRow {
    /// Value for the image input.
    #[must_use]
    pub fn image_url_value(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }
}

impl From<&Product> for AdminProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            original_price: format!("{:.2}", product.original_price.amount()),
            discount_price: format!("{:.2}", product.discount_price.amount()),
            image_url: product.image_url.clone(),
            is_hidden: product.is_hidden,
            price_summary: format!("{} / {}", product.discount_price, product.original_price),
            discount_label: product.discount_label(),
        }
    }
}

/// Rows for a product list.
#[must_use]
pub fn product_rows(products: &[Product]) -> Vec<AdminProductRow> {
    products.iter().map(AdminProductRow::from).collect()
}

/// Out-of-band response to a dashboard mutation.
#[derive(Template)]
#[template(path = "admin/partials/mutation.html")]
pub struct MutationTemplate {
    pub toasts: Vec<Toast>,
    pub products: Option<Vec<AdminProductRow>>,
    pub settings: Option<StoreSettings>,
}

/// Both sides are reloaded after every write, but only the tab the request
/// came from has a container to swap into.
impl From<MutationOutcome> for MutationTemplate {
    fn from(outcome: MutationOutcome) -> Self {
        let (products, settings) = outcome
            .refreshed
            .map(|data| (data.products, data.settings))
            .unwrap_or_default();
        let from_settings = outcome.kind.is_settings();

        Self {
            toasts: outcome.toasts,
            products: products
                .filter(|_| !from_settings)
                .as_deref()
                .map(product_rows),
            settings: settings.filter(|_| from_settings),
        }
    }
}

/// Turn a mutation outcome into the HTMX response.
///
/// Always 200 so HTMX processes the out-of-band swaps; failures carry only
/// the toast. Successful writes also trigger [`MUTATION_SUCCEEDED_EVENT`].
pub fn mutation_response(outcome: MutationOutcome) -> Response {
    let succeeded = outcome.succeeded();
    let body = match MutationTemplate::from(outcome).render() {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, "Failed to render mutation response");
            return crate::error::AppError::from(e).into_response();
        }
    };

    if succeeded {
        (
            AppendHeaders([("HX-Trigger", MUTATION_SUCCEEDED_EVENT)]),
            Html(body),
        )
            .into_response()
    } else {
        Html(body).into_response()
    }
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::show))
        .route("/products", post(products::create))
        .route(
            "/products/{id}",
            post(products::update).delete(products::delete),
        )
        .route("/products/{id}/visibility", post(products::toggle_visibility))
        .route("/settings", post(settings::update))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use tehtehair_core::{Price, ProductId, SettingsId};

    use super::*;
    use crate::services::DashboardData;
    use crate::services::admin::MutationKind;

    fn product() -> Product {
        Product {
            id: ProductId::generate(),
            name: "Canva Pro".to_owned(),
            description: None,
            original_price: Price::from_cents(2000),
            discount_price: Price::from_cents(1500),
            image_url: None,
            is_hidden: true,
            created_at: Utc::now(),
        }
    }

    fn settings() -> StoreSettings {
        StoreSettings {
            id: SettingsId::new(uuid::Uuid::nil()),
            store_name: "TehTehAir Store".to_owned(),
            store_description: String::new(),
            cta_text: "Explore Store".to_owned(),
            about_description: String::new(),
            payment_description: String::new(),
            hero_image_url: None,
            store_logo_url: None,
            payment_logo_url: None,
        }
    }

    #[test]
    fn test_row_formats_prices() {
        let row = AdminProductRow::from(&product());
        assert_eq!(row.original_price, "20.00");
        assert_eq!(row.discount_price, "15.00");
        assert_eq!(row.price_summary, "$15.00 / $20.00");
        assert_eq!(row.discount_label.as_deref(), Some("-25%"));
        assert_eq!(row.image_url_value(), "");
        assert!(row.is_hidden);
    }

    #[test]
    fn test_failed_mutation_only_swaps_toast() {
        let outcome = MutationOutcome {
            kind: MutationKind::DeleteProduct,
            toasts: vec![Toast::error("Failed to delete product")],
            refreshed: None,
        };
        let response = mutation_response(outcome);

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("HX-Trigger").is_none());

        let html = MutationTemplate {
            toasts: vec![Toast::error("Failed to delete product")],
            products: None,
            settings: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("Failed to delete product"));
        assert!(!html.contains("products-list"));
        assert!(!html.contains("settings-form-body"));
    }

    #[test]
    fn test_successful_mutation_swaps_lists() {
        let outcome = MutationOutcome {
            kind: MutationKind::ToggleVisibility,
            toasts: vec![Toast::success("Product hidden")],
            refreshed: Some(DashboardData {
                products: Some(vec![product()]),
                settings: Some(settings()),
            }),
        };
        let response = mutation_response(outcome.clone());
        assert_eq!(response.headers()["HX-Trigger"], MUTATION_SUCCEEDED_EVENT);

        let html = MutationTemplate::from(outcome).render().unwrap();
        assert!(html.contains("Product hidden"));
        assert!(html.contains(r#"id="products-list" hx-swap-oob="innerHTML""#));
        assert!(html.contains("Canva Pro"));
        assert!(!html.contains("settings-form-body"));
    }

    #[test]
    fn test_settings_mutation_swaps_only_settings_form() {
        let outcome = MutationOutcome {
            kind: MutationKind::UpdateSettings,
            toasts: vec![Toast::success("Settings updated successfully")],
            refreshed: Some(DashboardData {
                products: Some(vec![product()]),
                settings: Some(settings()),
            }),
        };

        let html = MutationTemplate::from(outcome).render().unwrap();
        assert!(html.contains(r#"id="settings-form-body" hx-swap-oob="innerHTML""#));
        assert!(html.contains(r#"name="store_name" value="TehTehAir Store" required"#));
        assert!(!html.contains("products-list"));
        assert!(!html.contains("Canva Pro"));
    }
}
