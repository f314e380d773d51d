//! YAML template loading with a per-loader cache
//!
//! A loader reads each path at most once. Later calls for the same path
//! hand back the cached document, so two assemblers sharing one loader
//! never re-read a blueprint or tool file.

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{PromptError, Result};

/// Loads YAML documents and memoizes them by exact path
#[derive(Debug, Default)]
pub struct TemplateLoader {
    cache: Mutex<HashMap<PathBuf, Arc<Value>>>,
}

impl TemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document, reading the file only on the first request for `path`
    pub fn load(&self, path: &Path) -> Result<Arc<Value>> {
        if let Some(cached) = self.cache().get(path) {
            log::debug!("Template cache hit: {}", path.display());
            return Ok(Arc::clone(cached));
        }

        // Raw bytes: invalid UTF-8 is a parsing failure, not a missing file
        let content = fs::read(path).map_err(|source| PromptError::TemplateNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Value = serde_yaml::from_slice(&content).map_err(|source| PromptError::TemplateParsing {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded template: {}", path.display());

        let document = Arc::new(document);
        let mut cache = self.cache();
        // Another caller may have raced us; keep whichever landed first
        let entry = cache.entry(path.to_path_buf()).or_insert(document);
        Ok(Arc::clone(entry))
    }

    /// Load a document and deserialize it into a typed definition
    pub fn load_as<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let document = self.load(path)?;
        serde_yaml::from_value(document.as_ref().clone()).map_err(|source| PromptError::TemplateParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.cache().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache().is_empty()
    }

    /// Drop every cached document
    pub fn clear(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Value>>> {
        // The map holds only finished documents, so a poisoned lock is still usable
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
