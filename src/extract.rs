//! Paginated extraction across country segments.

use crate::api::{BestsellerApi, Listing};
use tracing::{debug, info, warn};

/// Returns true when a page response carries no listings.
///
/// The API signals the end of a country's listing with an empty `data` array;
/// this is a contract assumption, not something derived from status codes.
pub fn is_empty_page(listings: &[Listing]) -> bool {
    listings.is_empty()
}

/// Extracts every page of one country's listing.
///
/// Pages are requested in order starting at 1 until the first empty or failed
/// page. A failed page ends this country's extraction, never the run; pages
/// collected before the failure are kept. Each listing is tagged with the page
/// it came from.
pub async fn extract_country(client: &impl BestsellerApi, country: &str) -> Vec<Listing> {
    let mut collected = Vec::new();
    let mut page = 1u32;

    loop {
        match client.page(country, page).await {
            Ok(listings) => {
                if is_empty_page(&listings) {
                    debug!("{}: page {} is empty, segment exhausted", country, page);
                    break;
                }

                debug!("{}: page {} returned {} listings", country, page, listings.len());
                collected.extend(listings.into_iter().map(|mut listing| {
                    listing.page = page;
                    listing
                }));
                page += 1;
            }
            Err(err) => {
                warn!("{}: page {} failed, skipping rest of segment: {:#}", country, page, err);
                break;
            }
        }
    }

    info!("{}: collected {} listings across {} pages", country, collected.len(), page - 1);
    collected
}

/// Extracts all countries in the given order, concatenating each country's own
/// sequence.
///
/// The result is country-major, then page-major: exactly the order fetched.
pub async fn extract_all(client: &impl BestsellerApi, countries: &[String]) -> Vec<Listing> {
    let mut all = Vec::new();

    for country in countries {
        all.extend(extract_country(client, country).await);
    }

    info!("Extracted {} raw listings across {} countries", all.len(), countries.len());
    all
}
