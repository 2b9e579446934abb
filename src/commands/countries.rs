//! Country listing command: discovery only, no extraction.

use crate::api::{ApiClient, BestsellerApi};
use crate::config::Config;
use crate::discover;
use anyhow::{Context, Result};

/// Lists the country segments currently present in the API.
pub struct CountriesCommand {
    config: Config,
}

impl CountriesCommand {
    /// Creates a new countries command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs discovery and returns the formatted listing.
    pub async fn execute(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Runs discovery with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl BestsellerApi) -> Result<String> {
        let countries = discover::countries(client).await?;

        if countries.is_empty() {
            return Ok("No country segments discovered.".to_string());
        }

        let mut lines =
            vec![format!("Discovered {} country segments:", countries.len()), String::new()];
        lines.extend(countries);

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Listing;
    use async_trait::async_trait;

    struct MockApi {
        discovery: Vec<Listing>,
    }

    #[async_trait]
    impl BestsellerApi for MockApi {
        async fn discover(&self) -> Result<Vec<Listing>> {
            Ok(self.discovery.clone())
        }

        async fn page(&self, _country: &str, _page: u32) -> Result<Vec<Listing>> {
            Ok(Vec::new())
        }
    }

    fn make_listing(asin: &str, country: &str) -> Listing {
        Listing {
            rank: 1,
            asin: asin.to_string(),
            product_title: format!("Product {}", asin),
            product_price: None,
            product_star_rating: None,
            product_num_ratings: None,
            product_url: format!("https://www.amazon.com/dp/{}", asin),
            product_photo: format!("https://m.media-amazon.com/images/I/{}.jpg", asin),
            country: country.to_string(),
            page: 0,
        }
    }

    #[tokio::test]
    async fn test_countries_listing() {
        let client = MockApi {
            discovery: vec![
                make_listing("B001", "US"),
                make_listing("B002", "IN"),
                make_listing("B003", "US"),
            ],
        };

        let output =
            CountriesCommand::new(Config::default()).execute_with_client(&client).await.unwrap();

        assert!(output.contains("Discovered 2 country segments:"));
        assert!(output.contains("IN"));
        assert!(output.contains("US"));
    }

    #[tokio::test]
    async fn test_countries_empty() {
        let client = MockApi { discovery: Vec::new() };

        let output =
            CountriesCommand::new(Config::default()).execute_with_client(&client).await.unwrap();

        assert_eq!(output, "No country segments discovered.");
    }
}
