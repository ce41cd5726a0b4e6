use std::collections::HashSet;

use log::{info, warn};

use crate::error::EnrichError;
use crate::model::Named;
use crate::store::Collection;

/// Result of merging one candidate list into one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Candidates offered by the batch
    pub candidates: usize,
    /// Candidates whose name was not yet present
    pub new_records: usize,
    /// Records actually written (zero on a dry run)
    pub inserted: usize,
    /// Collection size after the merge
    pub total: usize,
}

/// Pick the candidates whose lowercase name is absent from `existing`.
///
/// Accepted names join the index as they are accepted, so case variants
/// inside one batch collapse to the first one seen.
pub fn plan_inserts<T: Named>(candidates: Vec<T>, existing: &[T]) -> Vec<T> {
    let mut index: HashSet<String> = existing
        .iter()
        .map(|record| record.name().to_lowercase())
        .collect();

    candidates
        .into_iter()
        .filter(|candidate| index.insert(candidate.name().to_lowercase()))
        .collect()
}

/// Read the collection, plan the inserts, and bulk-insert them.
///
/// The index read and the insert are not isolated from other writers.
pub async fn merge_into<T, C>(
    collection: &C,
    candidates: Vec<T>,
    dry_run: bool,
) -> Result<MergeOutcome, EnrichError>
where
    T: Named + Send + 'static,
    C: Collection<T> + ?Sized,
{
    let offered = candidates.len();
    let existing = collection.find_all().await?;
    let fresh = plan_inserts(candidates, &existing);
    let new_records = fresh.len();

    let inserted = if fresh.is_empty() {
        0
    } else if dry_run {
        warn!(
            "Dry run: skipping insert of {} {}",
            new_records,
            collection.collection_name()
        );
        0
    } else {
        collection.insert_many(fresh).await?
    };

    let total = collection.count().await?;
    info!(
        "{}: {} candidates, {} new, {} inserted, {} total",
        collection.collection_name(),
        offered,
        new_records,
        inserted,
        total
    );

    Ok(MergeOutcome {
        candidates: offered,
        new_records,
        inserted,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Ingredient};
    use crate::store::MemoryCollection;

    fn names(records: &[Ingredient]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_existing_name_excluded_regardless_of_case() {
        let existing = vec![Ingredient::new("Salt", Category::Spice)];
        let candidates = vec![
            Ingredient::new("salt", Category::Spice),
            Ingredient::new("SALT", Category::Spice),
            Ingredient::new("Rice", Category::Grain),
        ];

        let planned = plan_inserts(candidates, &existing);
        assert_eq!(names(&planned), vec!["Rice"]);
    }

    #[test]
    fn test_case_variants_in_batch_collapse_to_first() {
        let candidates = vec![
            Ingredient::new("Chicken Breast", Category::Protein),
            Ingredient::new("chicken breast", Category::Protein),
        ];

        let planned = plan_inserts(candidates, &[]);
        assert_eq!(names(&planned), vec!["Chicken Breast"]);
    }

    #[tokio::test]
    async fn test_merge_twice_is_stable() {
        let collection = MemoryCollection::with_records(
            "ingredients",
            vec![Ingredient::new("Salt", Category::Spice)],
        );
        let batch = vec![
            Ingredient::new("salt", Category::Spice),
            Ingredient::new("Rice", Category::Grain),
        ];

        let first = merge_into(&collection, batch.clone(), false).await.unwrap();
        assert_eq!(
            first,
            MergeOutcome {
                candidates: 2,
                new_records: 1,
                inserted: 1,
                total: 2
            }
        );

        let second = merge_into(&collection, batch, false).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.total, first.total);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_collection_untouched() {
        let collection: MemoryCollection<Ingredient> = MemoryCollection::new("ingredients");
        let outcome = merge_into(
            &collection,
            vec![Ingredient::new("Rice", Category::Grain)],
            true,
        )
        .await
        .unwrap();

        assert_eq!(outcome.new_records, 1);
        assert_eq!(outcome.inserted, 0);
        assert_eq!(outcome.total, 0);
    }
}
