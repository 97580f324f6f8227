//! Run-scoped lookup cache

use crate::domain::Resolution;
use std::collections::HashMap;

/// Resolutions keyed by case-folded package id
///
/// Misses and failures are cached as well, so each id is looked up at most
/// once per run. There is no invalidation.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: HashMap<String, Resolution>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(package_id: &str) -> String {
        package_id.to_lowercase()
    }

    pub fn get(&self, package_id: &str) -> Option<&Resolution> {
        self.entries.get(&Self::key(package_id))
    }

    pub fn insert(&mut self, package_id: &str, resolution: Resolution) {
        self.entries.insert(Self::key(package_id), resolution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
