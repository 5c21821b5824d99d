use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{CatalogError, Result};
use crate::mapping::MappingTable;
use crate::model::ComponentTable;
use crate::mui::MuiMappingDocument;

type Cache<T> = Mutex<HashMap<PathBuf, Arc<T>>>;

/// Read-through cache over the JSON data directory.
///
/// Built once per process and shared by every tool. Files are parsed on first use and kept
/// for the life of the process; failed loads are not cached, so fixing a file on disk is
/// picked up by the next call.
#[derive(Debug)]
pub struct ComponentStore {
    data_dir: PathBuf,
    tables: Cache<ComponentTable>,
    mappings: Cache<MappingTable>,
    mui: Cache<MuiMappingDocument>,
    documents: Cache<Value>,
}

impl ComponentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: Mutex::default(),
            mappings: Mutex::default(),
            mui: Mutex::default(),
            documents: Mutex::default(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `relative` joined onto the data dir (absolute paths pass through).
    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.data_dir.join(relative)
    }

    pub fn table(&self, relative: &str) -> Result<Arc<ComponentTable>> {
        cached(&self.tables, self.path_of(relative), parse_json_file)
    }

    pub fn mapping(&self, relative: &str) -> Result<Arc<MappingTable>> {
        cached(&self.mappings, self.path_of(relative), |path| {
            let text = read_file(path)?;
            MappingTable::from_json_str(&text).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    pub fn mui_mapping(&self, relative: &str) -> Result<Arc<MuiMappingDocument>> {
        cached(&self.mui, self.path_of(relative), parse_json_file)
    }

    /// Raw JSON, passed through to payloads untouched.
    pub fn document(&self, relative: &str) -> Result<Arc<Value>> {
        cached(&self.documents, self.path_of(relative), parse_json_file)
    }
}

fn cached<T>(
    cache: &Cache<T>,
    path: PathBuf,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Result<Arc<T>> {
    if let Some(hit) = cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&path)
    {
        log::debug!("cache hit: {}", path.display());
        return Ok(Arc::clone(hit));
    }

    // Loaded outside the lock; a concurrent first load parses twice and the later insert wins.
    log::debug!("cache miss: {}", path.display());
    let value = Arc::new(load(&path)?);
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(path, Arc::clone(&value));
    Ok(value)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CatalogError::DataLoad {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
