use std::fmt;

use log::info;

use crate::builder::EnricherBuilder;
use crate::classify::ClassificationRules;
use crate::collector::BatchCollector;
use crate::error::EnrichError;
use crate::merge::{merge_into, MergeOutcome};
use crate::model::RawRecipe;
use crate::sources::RecipeSource;
use crate::store::Store;

/// Summary of one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Name of the source the batch came from
    pub source: String,
    /// Recipes in the fetched batch
    pub recipes: usize,
    /// Raw ingredient strings rejected by the normalizer
    pub dropped: usize,
    pub ingredients: MergeOutcome,
    pub components: MergeOutcome,
    pub dry_run: bool,
}

impl fmt::Display for EnrichmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { " (dry run)" } else { "" };
        writeln!(
            f,
            "Enrichment from {}{}: {} recipes, {} names dropped",
            self.source, mode, self.recipes, self.dropped
        )?;
        for (label, outcome) in [
            ("ingredients", &self.ingredients),
            ("components", &self.components),
        ] {
            writeln!(
                f,
                "  {:<12} {} candidates, {} new, {} inserted, {} total",
                label, outcome.candidates, outcome.new_records, outcome.inserted, outcome.total
            )?;
        }
        Ok(())
    }
}

/// Classify every ingredient of a batch into one collector
pub fn collect_batch(recipes: &[RawRecipe], rules: &ClassificationRules) -> BatchCollector {
    let mut collector = BatchCollector::new();
    for recipe in recipes {
        collector.collect_all(recipe.ingredient_labels(), rules);
    }
    collector
}

/// One fetch, classify, dedup and merge pass
pub struct Enricher {
    source: Box<dyn RecipeSource>,
    store: Store,
    rules: ClassificationRules,
    dry_run: bool,
}

impl Enricher {
    pub fn new(source: Box<dyn RecipeSource>, store: Store) -> Self {
        Enricher {
            source,
            store,
            rules: ClassificationRules::default(),
            dry_run: false,
        }
    }

    /// Creates a new builder for configuring an enrichment run
    pub fn builder() -> EnricherBuilder {
        EnricherBuilder::default()
    }

    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Execute the run.
    ///
    /// A fetch failure returns before the store is read or written. Merging
    /// is not transactional: a crash between the two bulk inserts leaves the
    /// ingredient insert in place.
    pub async fn run(&self) -> Result<EnrichmentReport, EnrichError> {
        info!("Starting enrichment from {}", self.source.source_name());
        let recipes = self.source.fetch_batch().await?;

        let collector = collect_batch(&recipes, &self.rules);
        let dropped = collector.dropped();
        let (ingredients, components) = collector.into_parts();
        info!(
            "Collected {} ingredients and {} components from {} recipes ({} names dropped)",
            ingredients.len(),
            components.len(),
            recipes.len(),
            dropped
        );

        let ingredients = merge_into(&*self.store.ingredients, ingredients, self.dry_run).await?;
        let components = merge_into(&*self.store.components, components, self.dry_run).await?;

        Ok(EnrichmentReport {
            source: self.source.source_name().to_string(),
            recipes: recipes.len(),
            dropped,
            ingredients,
            components,
            dry_run: self.dry_run,
        })
    }
}
