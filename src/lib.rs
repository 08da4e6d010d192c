//! Storefront catalog library
//!
//! Persistent schema and services for a product catalog: categories,
//! seasonal events, products, product lines and product images.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod migrator;
pub mod services;

pub use config::{AppConfig, AppConfigError};
pub use db::DbPool;
pub use errors::ServiceError;
pub use migrator::Migrator;
pub use services::CatalogServices;
