use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::key::{module_path, resolve_key};
use crate::error::{BuildError, Result};
use crate::types::DependencyRecord;

/// What to do when two different files map to the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Later-discovered file replaces the earlier one
    #[default]
    Overwrite,
    /// Fail the build
    Reject,
}

/// A key that was reassigned to a different file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub previous: String,
    pub replacement: String,
}

/// Module key → extension-stripped source path, in insertion order.
///
/// Overwriting a key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModuleMap {
    entries: IndexMap<String, String>,
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key every record; returns the map and the overwrites that happened
    pub fn from_records(
        records: &[DependencyRecord],
        top_dir: &Path,
        policy: CollisionPolicy,
    ) -> Result<(Self, Vec<KeyCollision>)> {
        let mut map = Self::new();
        let mut collisions = Vec::new();

        for record in records {
            let key = resolve_key(record, top_dir);
            let path = module_path(record);

            match map.insert(key.clone(), path.clone()) {
                Some(previous) if previous != path => {
                    if policy == CollisionPolicy::Reject {
                        return Err(BuildError::KeyCollision {
                            key,
                            previous,
                            replacement: path,
                        });
                    }
                    collisions.push(KeyCollision {
                        key,
                        previous,
                        replacement: path,
                    });
                }
                _ => {}
            }
        }

        Ok((map, collisions))
    }

    /// Returns the value previously stored under `key`
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), path.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
