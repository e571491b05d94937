//! TehTehAir Core - Shared domain types.
//!
//! This crate provides the types used across the store components:
//! - `storefront` - Public site and hidden admin panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Database encodings for ids are behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices and discounts, products, store settings, change events

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
