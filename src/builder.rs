use std::path::PathBuf;
use std::time::Duration;

use crate::classify::ClassificationRules;
use crate::config::{EnrichConfig, MAX_BATCH_SIZE};
use crate::pipeline::{EnrichmentReport, Enricher};
use crate::sources::{FileSource, RecipeSource, SpoonacularSource};
use crate::store::Store;
use crate::EnrichError;

/// Builder for configuring and executing an enrichment run
#[derive(Debug, Default)]
pub struct EnricherBuilder {
    config: Option<EnrichConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    batch_size: Option<u32>,
    offset: Option<u32>,
    timeout: Option<Duration>,
    store_dir: Option<PathBuf>,
    in_memory: bool,
    seed_file: Option<PathBuf>,
    rules: Option<ClassificationRules>,
    dry_run: Option<bool>,
}

impl EnricherBuilder {
    /// Start from a loaded configuration; later builder calls override it
    ///
    /// # Example
    /// ```no_run
    /// use dishcraft_enrich::{EnrichConfig, Enricher};
    ///
    /// let config = EnrichConfig::load().unwrap();
    /// let builder = Enricher::builder().config(config);
    /// ```
    pub fn config(mut self, config: EnrichConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key for the upstream recipe source
    ///
    /// # Example
    /// ```
    /// use dishcraft_enrich::Enricher;
    ///
    /// let builder = Enricher::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the source at a different API host (proxies, test servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Number of recipes to request, 1 to 100
    pub fn batch_size(mut self, size: u32) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Pagination offset of the page to fetch
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set a timeout for the upstream request
    ///
    /// # Example
    /// ```
    /// use dishcraft_enrich::Enricher;
    /// use std::time::Duration;
    ///
    /// let builder = Enricher::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Directory of the JSON-file store
    pub fn store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }

    /// Use a process-local store instead of files
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Read the batch from a local seed file instead of the API.
    /// No API key is needed in this mode.
    ///
    /// # Example
    /// ```
    /// use dishcraft_enrich::Enricher;
    ///
    /// let builder = Enricher::builder().seed_file("seed/pantry.json");
    /// ```
    pub fn seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    /// Replace the built-in keyword tables
    pub fn rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Compute the inserts but do not write them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Assemble the enricher
    ///
    /// # Errors
    /// Returns `EnrichError` if:
    /// - No API key is available and no seed file was given
    /// - The batch size is outside 1..=100
    /// - The store directory cannot be created
    pub async fn build(self) -> Result<Enricher, EnrichError> {
        let mut config = self.config.unwrap_or_default();

        if let Some(key) = self.api_key {
            config.source.api_key = Some(key);
        }
        if let Some(url) = self.base_url {
            config.source.base_url = url;
        }
        if let Some(size) = self.batch_size {
            if size == 0 || size > MAX_BATCH_SIZE {
                return Err(EnrichError::UsageError(format!(
                    "batch size must be between 1 and {}, got {}",
                    MAX_BATCH_SIZE, size
                )));
            }
            config.source.batch_size = size;
        }
        if let Some(offset) = self.offset {
            config.source.offset = offset;
        }
        if let Some(dir) = self.store_dir {
            config.store.dir = dir;
        }
        if let Some(dry_run) = self.dry_run {
            config.dry_run = dry_run;
        }

        // Resolve the source first so a missing key fails before any I/O
        let source: Box<dyn RecipeSource> = match self.seed_file {
            Some(path) => Box::new(FileSource::new(path)),
            None => {
                let mut source = SpoonacularSource::new(&config.source)?;
                if let Some(timeout) = self.timeout {
                    source = source.with_timeout(timeout)?;
                }
                Box::new(source)
            }
        };

        let store = if self.in_memory {
            Store::in_memory()
        } else {
            Store::open_dir(&config.store.dir).await?
        };

        Ok(Enricher::new(source, store)
            .with_rules(self.rules.unwrap_or_default())
            .with_dry_run(config.dry_run))
    }

    /// Build and execute the run in one step
    ///
    /// # Example
    /// ```no_run
    /// # use dishcraft_enrich::Enricher;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let report = Enricher::builder()
    ///     .api_key("your-api-key")
    ///     .store_dir("data")
    ///     .run()
    ///     .await?;
    /// println!("{}", report);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(self) -> Result<EnrichmentReport, EnrichError> {
        self.build().await?.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_fails_before_io() {
        let config = EnrichConfig {
            source: crate::config::SourceConfig {
                api_key: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("store");

        let result = Enricher::builder()
            .config(config)
            .store_dir(&dir)
            .build()
            .await;

        assert!(matches!(result, Err(EnrichError::MissingApiKey)));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_invalid_batch_size() {
        let result = Enricher::builder()
            .api_key("key")
            .batch_size(0)
            .in_memory()
            .build()
            .await;
        assert!(matches!(result, Err(EnrichError::UsageError(_))));
    }

    #[tokio::test]
    async fn test_seed_file_needs_no_api_key() {
        let enricher = Enricher::builder()
            .config(EnrichConfig {
                source: crate::config::SourceConfig {
                    api_key: Some(String::new()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .seed_file("seed.json")
            .in_memory()
            .dry_run(true)
            .build()
            .await;
        assert!(enricher.is_ok());
    }
}
