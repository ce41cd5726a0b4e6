mod json_file;
mod memory;

pub use json_file::JsonFileCollection;
pub use memory::MemoryCollection;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::error::EnrichError;
use crate::model::{Ingredient, RecipeComponent};

pub const INGREDIENTS_FILE: &str = "ingredients.json";
pub const COMPONENTS_FILE: &str = "recipe_components.json";

/// Bulk operations the merge step needs from a persisted collection
#[async_trait]
pub trait Collection<T: Send + 'static>: Send + Sync {
    /// Collection name used in logs
    fn collection_name(&self) -> &str;

    /// Full contents of the collection
    async fn find_all(&self) -> Result<Vec<T>, EnrichError>;

    /// Append records, returning how many were written
    async fn insert_many(&self, records: Vec<T>) -> Result<usize, EnrichError>;

    async fn count(&self) -> Result<usize, EnrichError> {
        Ok(self.find_all().await?.len())
    }
}

/// The two collections an enrichment run writes to
#[derive(Clone)]
pub struct Store {
    pub ingredients: Arc<dyn Collection<Ingredient>>,
    pub components: Arc<dyn Collection<RecipeComponent>>,
}

impl Store {
    pub fn new(
        ingredients: Arc<dyn Collection<Ingredient>>,
        components: Arc<dyn Collection<RecipeComponent>>,
    ) -> Self {
        Store {
            ingredients,
            components,
        }
    }

    /// Process-local store, discarded on drop
    pub fn in_memory() -> Self {
        Store::new(
            Arc::new(MemoryCollection::new("ingredients")),
            Arc::new(MemoryCollection::new("recipe_components")),
        )
    }

    /// JSON-file store rooted at `dir`, created if missing
    pub async fn open_dir(dir: impl AsRef<Path>) -> Result<Self, EnrichError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        debug!("Opened store at {}", dir.display());

        Ok(Store::open_existing(dir))
    }

    /// JSON-file store rooted at `dir` without touching the filesystem.
    /// A missing directory reads as two empty collections.
    pub fn open_existing(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Store::new(
            Arc::new(JsonFileCollection::new(
                "ingredients",
                dir.join(INGREDIENTS_FILE),
            )),
            Arc::new(JsonFileCollection::new(
                "recipe_components",
                dir.join(COMPONENTS_FILE),
            )),
        )
    }

    /// `(ingredients, components)` record counts
    pub async fn counts(&self) -> Result<(usize, usize), EnrichError> {
        Ok((self.ingredients.count().await?, self.components.count().await?))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("ingredients", &self.ingredients.collection_name())
            .field("components", &self.components.collection_name())
            .finish()
    }
}
