//! Bestseller API modules: HTTP client and data models.

pub mod client;
pub mod models;

pub use client::{ApiClient, BestsellerApi};
pub use models::{ApiPage, ExportRecord, Listing};
