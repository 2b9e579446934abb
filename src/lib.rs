//! amz-bestsellers - Amazon bestseller listings extractor.
//!
//! Fetches paginated bestseller listings across every country segment the data
//! API exposes, cleans and deduplicates the records, and writes one flat CSV
//! file for downstream analysis.

pub mod api;
pub mod commands;
pub mod config;
pub mod discover;
pub mod extract;
pub mod output;
pub mod transform;

pub use api::client::{ApiClient, BestsellerApi};
pub use api::models::{ApiPage, ExportRecord, Listing};
pub use config::{Config, DedupMode};
