use crate::runtime_env::{ServerConfig, VersionProfile};
use modus_migrate_catalog::{
    ComponentStore, ComponentTable, MappingTable, MuiMappingDocument, Result,
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a tool needs to answer a request: resolved paths plus the shared data cache.
///
/// Built once at startup and shared by every connection clone of the service.
#[derive(Debug)]
pub(crate) struct ToolContext {
    config: ServerConfig,
    store: ComponentStore,
}

impl ToolContext {
    pub(crate) fn new(config: ServerConfig) -> Self {
        let store = ComponentStore::new(config.data_dir.clone());
        Self { config, store }
    }

    pub(crate) fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub(crate) fn source(&self) -> &VersionProfile {
        &self.config.source
    }

    pub(crate) fn target(&self) -> &VersionProfile {
        &self.config.target
    }

    pub(crate) fn table(&self, profile: &VersionProfile) -> Result<Arc<ComponentTable>> {
        self.store.table(&profile.components_file)
    }

    pub(crate) fn source_table(&self) -> Result<Arc<ComponentTable>> {
        self.table(&self.config.source)
    }

    pub(crate) fn target_table(&self) -> Result<Arc<ComponentTable>> {
        self.table(&self.config.target)
    }

    pub(crate) fn mapping(&self) -> Result<Arc<MappingTable>> {
        self.store.mapping(&self.config.files.component_mapping)
    }

    pub(crate) fn mui_mapping(&self) -> Result<Arc<MuiMappingDocument>> {
        self.store.mui_mapping(&self.config.files.mui_mapping)
    }

    /// Raw JSON document under the data directory, passed through verbatim.
    pub(crate) fn document(&self, relative: &str) -> Result<Arc<Value>> {
        self.store.document(relative)
    }

    /// Markdown prompt text, or the `"<file> not found"` placeholder.
    pub(crate) fn prompt(&self, file_name: &str) -> String {
        self.read_markdown(self.config.prompts_dir.join(file_name), file_name)
    }

    pub(crate) fn gold_standard(&self) -> String {
        let name = self.config.gold_standard.as_str();
        self.read_markdown(self.config.prompts_dir.join(name), name)
    }

    /// Absolute path of a file written into the output directory.
    pub(crate) fn output_path(&self, relative: &str) -> PathBuf {
        self.config.output_dir.join(relative)
    }

    fn read_markdown(&self, path: PathBuf, label: &str) -> String {
        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("markdown {} unavailable: {err}", path.display());
                format!("{label} not found")
            }
        }
    }
}
