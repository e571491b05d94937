//! Business logic services for the store.
//!
//! # Services
//!
//! - `catalog` - Public product catalog loader and card views
//! - `settings` - Settings loader feeding the home and about copy
//! - `admin` - Admin mutation workflow and notifications

pub mod admin;
pub mod catalog;
pub mod settings;

pub use admin::{AdminWorkflow, DashboardData, MutationOutcome, Toast, ToastKind};
pub use catalog::{CatalogLoader, ProductCardView};
pub use settings::{AboutCopy, HomeCopy, SettingsLoader, SettingsView};
