//! Admin dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use tehtehair_core::StoreSettings;

use super::{AdminProductRow, product_rows};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::services::admin::LOGIN_SUCCEEDED;
use crate::services::{DashboardData, Toast};
use crate::state::AppState;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Products,
    Settings,
}

impl DashboardTab {
    /// Parse the `tab` query value; anything unknown is the products tab.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("settings") => Self::Settings,
            _ => Self::Products,
        }
    }

    #[must_use]
    pub const fn is_products(&self) -> bool {
        matches!(self, Self::Products)
    }
}

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    /// Set by the login redirect.
    pub welcome: Option<String>,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub active: &'static str,
    pub tab: DashboardTab,
    pub products: Vec<AdminProductRow>,
    pub settings: Option<StoreSettings>,
    pub toasts: Vec<Toast>,
}

/// Display the dashboard.
///
/// Products and settings load concurrently. If either fails the page still
/// renders with what loaded plus a `Failed to load data` toast.
#[instrument(skip(state, _admin))]
pub async fn show(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let data = DashboardData::load(state.pool()).await;

    let mut toasts = Vec::new();
    if query.welcome.is_some() {
        toasts.push(Toast::success(LOGIN_SUCCEEDED));
    }
    toasts.extend(data.load_toast());

    DashboardTemplate {
        active: "",
        tab: DashboardTab::from_query(query.tab.as_deref()),
        products: data.products.as_deref().map(product_rows).unwrap_or_default(),
        settings: data.settings,
        toasts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_query() {
        assert_eq!(DashboardTab::from_query(None), DashboardTab::Products);
        assert_eq!(DashboardTab::from_query(Some("products")), DashboardTab::Products);
        assert_eq!(DashboardTab::from_query(Some("settings")), DashboardTab::Settings);
        assert_eq!(DashboardTab::from_query(Some("orders")), DashboardTab::Products);
    }
}
