//! Core types for the TehTehAir store.

pub mod change;
pub mod id;
pub mod price;
pub mod product;
pub mod settings;

pub use change::{ChangeEvent, ChangeKind, ParseTableError, Table};
pub use id::*;
pub use price::{Price, PriceError, discount_percent};
pub use product::{DraftError, Product, ProductDraft};
pub use settings::{SettingsUpdate, StoreSettings};
