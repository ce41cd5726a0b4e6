use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EnrichError;
use crate::store::Collection;

/// Collection persisted as a single JSON array on disk.
///
/// A missing file reads as an empty collection. Writes go to a sibling
/// temp file which is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileCollection<T> {
    name: String,
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileCollection<T> {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        JsonFileCollection {
            name: name.into(),
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> JsonFileCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    async fn read(&self) -> Result<Vec<T>, EnrichError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, records: &[T]) -> Result<(), EnrichError> {
        let body = serde_json::to_vec_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl<T> Collection<T> for JsonFileCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn find_all(&self) -> Result<Vec<T>, EnrichError> {
        self.read().await
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<usize, EnrichError> {
        if records.is_empty() {
            return Ok(0);
        }
        let inserted = records.len();
        let mut all = self.read().await?;
        all.extend(records);
        self.write(&all).await?;
        Ok(inserted)
    }
}
