use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use crate::error::EnrichError;
use crate::model::{RawIngredient, RawRecipe};
use crate::sources::RecipeSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Names(Vec<String>),
    Recipes(Vec<RawRecipe>),
}

/// Reads a batch from a local JSON seed file.
///
/// The file holds either a plain array of ingredient names or an array of
/// recipe objects shaped like the upstream API's (`extendedIngredients`).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecipeSource for FileSource {
    fn source_name(&self) -> &str {
        "file"
    }

    async fn fetch_batch(&self) -> Result<Vec<RawRecipe>, EnrichError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let seed: SeedFile = serde_json::from_str(&body)?;
        let recipes = match seed {
            SeedFile::Names(names) => vec![RawRecipe {
                title: Some("seed".to_string()),
                extended_ingredients: names
                    .into_iter()
                    .map(|name| RawIngredient {
                        name: Some(name),
                        original_name: None,
                    })
                    .collect(),
                ..Default::default()
            }],
            SeedFile::Recipes(recipes) => recipes,
        };

        info!(
            "Loaded {} recipes from {}",
            recipes.len(),
            self.path.display()
        );
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seed_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_plain_name_list() {
        let file = seed_file(r#"["Salt", "Brown Rice", "!!"]"#);

        let recipes = FileSource::new(file.path()).fetch_batch().await.unwrap();

        assert_eq!(recipes.len(), 1);
        let labels: Vec<&str> = recipes[0].ingredient_labels().collect();
        assert_eq!(labels, vec!["Salt", "Brown Rice", "!!"]);
    }

    #[tokio::test]
    async fn test_recipe_objects() {
        let file = seed_file(
            r#"[{"title": "A", "extendedIngredients": [{"name": "tofu"}]},
                {"title": "B", "extendedIngredients": [{"originalName": "kale"}]}]"#,
        );

        let recipes = FileSource::new(file.path()).fetch_batch().await.unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].ingredient_labels().next(), Some("kale"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        assert!(matches!(
            source.fetch_batch().await,
            Err(EnrichError::IoError(_))
        ));
    }
}
