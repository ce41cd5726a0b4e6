use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::EnrichError;
use crate::store::Collection;

/// In-process collection backed by a `Vec`
#[derive(Debug)]
pub struct MemoryCollection<T> {
    name: String,
    records: Mutex<Vec<T>>,
}

impl<T> MemoryCollection<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_records(name, Vec::new())
    }

    pub fn with_records(name: impl Into<String>, records: Vec<T>) -> Self {
        MemoryCollection {
            name: name.into(),
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<T>>, EnrichError> {
        self.records
            .lock()
            .map_err(|_| EnrichError::StoreError(format!("{} lock poisoned", self.name)))
    }
}

#[async_trait]
impl<T> Collection<T> for MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn find_all(&self) -> Result<Vec<T>, EnrichError> {
        Ok(self.lock()?.clone())
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<usize, EnrichError> {
        let inserted = records.len();
        self.lock()?.extend(records);
        Ok(inserted)
    }

    async fn count(&self) -> Result<usize, EnrichError> {
        Ok(self.lock()?.len())
    }
}
