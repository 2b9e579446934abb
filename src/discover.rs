//! Country discovery via one unfiltered API call.

use crate::api::BestsellerApi;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info};

/// Returns the distinct country codes present in the unfiltered listing, in
/// first-appearance order.
///
/// Downstream extraction iterates countries in exactly this order, so the
/// output file is deterministic for a given API response. Errors are fatal for
/// the run: every later stage depends on the discovered set.
pub async fn countries(client: &impl BestsellerApi) -> Result<Vec<String>> {
    let listings = client.discover().await.context("Country discovery call failed")?;

    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for listing in &listings {
        if listing.country.is_empty() {
            debug!("Skipping listing {} with empty country code", listing.asin);
            continue;
        }
        if seen.insert(listing.country.clone()) {
            codes.push(listing.country.clone());
        }
    }

    info!("Discovered {} country segments from {} listings", codes.len(), listings.len());
    Ok(codes)
}
