//! Full pipeline command: discover, extract, transform, load.

use crate::api::{ApiClient, BestsellerApi};
use crate::config::Config;
use crate::{discover, extract, output, transform};
use anyhow::{Context, Result};
use tracing::info;

/// Executes the whole extraction pipeline.
pub struct RunCommand {
    config: Config,
}

impl RunCommand {
    /// Creates a new run command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the pipeline and returns a one-line summary.
    pub async fn execute(&self) -> Result<String> {
        let client = ApiClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the pipeline with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl BestsellerApi) -> Result<String> {
        let countries = discover::countries(client).await?;
        let raw = extract::extract_all(client, &countries).await;

        let rows = transform::clean(raw);
        let raw_count = rows.len();
        let rows = transform::dedup(rows, self.config.dedup);

        output::write_csv(&self.config.output, &rows)?;

        info!("Pipeline finished");
        Ok(format!(
            "Extracted {} listings from {} countries; wrote {} rows to {}",
            raw_count,
            countries.len(),
            rows.len(),
            self.config.output.display()
        ))
    }
}
