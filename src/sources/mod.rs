mod file;
mod spoonacular;

pub use file::FileSource;
pub use spoonacular::SpoonacularSource;

use async_trait::async_trait;

use crate::error::EnrichError;
use crate::model::RawRecipe;

/// Where an enrichment run gets its batch of recipes from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Source name used in logs (e.g., "spoonacular", "file")
    fn source_name(&self) -> &str;

    /// Fetch one batch. Any failure aborts the run before the store is touched.
    async fn fetch_batch(&self) -> Result<Vec<RawRecipe>, EnrichError>;
}
