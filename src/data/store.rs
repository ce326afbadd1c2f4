//! Dataset store: owns every dataset loaded during a session.
//!
//! Keys are registered at most once; a second registration under the same key
//! is rejected and the first dataset stays in place.

use std::collections::HashMap;

use tracing::{info, warn};

use super::dataset::Dataset;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: HashMap<String, Dataset>,
    /// Insertion order of keys; drives selection lists and the default selection.
    key_order: Vec<String>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Result<&Dataset, StoreError> {
        self.datasets
            .get(key)
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    /// Register a dataset. Fails with [`StoreError::DuplicateKey`] if `key` is taken.
    pub fn put(&mut self, key: impl Into<String>, dataset: Dataset) -> Result<(), StoreError> {
        let key = key.into();
        if self.datasets.contains_key(&key) {
            warn!(key = %key, "dataset already in storage, skipping");
            return Err(StoreError::DuplicateKey(key));
        }
        info!(key = %key, rows = dataset.len(), "registered dataset");
        self.key_order.push(key.clone());
        self.datasets.insert(key, dataset);
        Ok(())
    }

    pub fn list_keys(&self) -> &[String] {
        &self.key_order
    }

    pub fn first_key(&self) -> Option<&str> {
        self.key_order.first().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.datasets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.key_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_order.is_empty()
    }
}
