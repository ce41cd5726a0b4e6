pub mod builder;
pub mod classify;
pub mod collector;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod store;

use std::path::Path;

pub use builder::EnricherBuilder;
pub use classify::{classify, component_type, CategoryRule, ClassificationRules};
pub use collector::BatchCollector;
pub use config::EnrichConfig;
pub use error::EnrichError;
pub use merge::{merge_into, plan_inserts, MergeOutcome};
pub use model::{Category, ComponentType, Ingredient, RecipeComponent};
pub use normalize::normalize_name;
pub use pipeline::{Enricher, EnrichmentReport};
pub use store::Store;

/// Run one enrichment pass against the upstream API using `config`
///
/// # Example
/// ```no_run
/// # use dishcraft_enrich::{enrich_from_config, EnrichConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EnrichConfig::load()?;
/// let report = enrich_from_config(&config).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub async fn enrich_from_config(config: &EnrichConfig) -> Result<EnrichmentReport, EnrichError> {
    Enricher::builder().config(config.clone()).run().await
}

/// Run the same pipeline over a local seed file instead of the API
pub async fn seed_from_file(
    path: impl AsRef<Path>,
    config: &EnrichConfig,
) -> Result<EnrichmentReport, EnrichError> {
    Enricher::builder()
        .config(config.clone())
        .seed_file(path.as_ref())
        .run()
        .await
}

/// `(ingredients, components)` counts of the configured store.
/// Read-only: a missing store directory counts as empty and is not created.
pub async fn store_stats(config: &EnrichConfig) -> Result<(usize, usize), EnrichError> {
    Store::open_existing(&config.store.dir).counts().await
}
