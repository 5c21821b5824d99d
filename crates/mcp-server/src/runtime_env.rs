//! Installation root discovery and server configuration.
//!
//! Resolution order for the installation root: `--root`, `MODUS_MIGRATE_ROOT`, the nearest
//! ancestor of the executable that contains a `data/` directory, then the working directory.
//! An optional `modus-migrate.toml` at the root (or `--config` / `MODUS_MIGRATE_CONFIG`) refines
//! the defaults, and the `MODUS_MIGRATE_*_DIR` variables override individual directories last.

use modus_migrate_catalog::TagNaming;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ROOT_ENV: &str = "MODUS_MIGRATE_ROOT";
pub const CONFIG_ENV: &str = "MODUS_MIGRATE_CONFIG";
pub const DATA_DIR_ENV: &str = "MODUS_MIGRATE_DATA_DIR";
pub const PROMPTS_DIR_ENV: &str = "MODUS_MIGRATE_PROMPTS_DIR";
pub const OUTPUT_DIR_ENV: &str = "MODUS_MIGRATE_OUTPUT_DIR";
pub const CONFIG_FILE_NAME: &str = "modus-migrate.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} does not exist", path.display())]
    MissingConfig { path: PathBuf },

    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Source and target versions must differ (both are '{0}')")]
    DuplicateVersion(String),

    #[error("Failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Naming convention and backing table of one component library version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionProfile {
    pub version: String,
    pub prefix: String,
    pub suffix: String,
    /// Relative to the data directory.
    pub components_file: String,
}

impl VersionProfile {
    fn modus_v1() -> Self {
        Self {
            version: "1.0".to_string(),
            prefix: "modus-".to_string(),
            suffix: ".js".to_string(),
            components_file: "component_analysis/v1_components.json".to_string(),
        }
    }

    fn modus_v2() -> Self {
        Self {
            version: "2.0".to_string(),
            prefix: "modus-wc-".to_string(),
            suffix: ".tsx".to_string(),
            components_file: "component_analysis/v2_components.json".to_string(),
        }
    }

    pub fn naming(&self) -> TagNaming {
        TagNaming::new(self.prefix.as_str(), self.suffix.as_str())
    }

    fn apply(&mut self, overrides: VersionOverride) {
        if let Some(version) = overrides.version {
            self.version = version;
        }
        if let Some(prefix) = overrides.prefix {
            self.prefix = prefix;
        }
        if let Some(suffix) = overrides.suffix {
            self.suffix = suffix;
        }
        if let Some(file) = overrides.components_file {
            self.components_file = file;
        }
    }
}

/// Data files that are not tied to a version profile, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFiles {
    pub component_mapping: String,
    pub mui_mapping: String,
    pub mui_components: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            component_mapping: "component_analysis/component_mapping.json".to_string(),
            mui_mapping: "mui/mui_to_modus_mapping.json".to_string(),
            mui_components: "mui/mui_v7_components.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub install_root: PathBuf,
    pub data_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source: VersionProfile,
    pub target: VersionProfile,
    pub files: DataFiles,
    /// Relative to the prompts directory.
    pub gold_standard: String,
    pub config_file: Option<PathBuf>,
}

/// Values taken from the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    prompts_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    gold_standard: Option<String>,
    source: Option<VersionOverride>,
    target: Option<VersionOverride>,
    files: Option<FilesOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionOverride {
    version: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
    components_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilesOverride {
    component_mapping: Option<String>,
    mui_mapping: Option<String>,
    mui_components: Option<String>,
}

impl ServerConfig {
    /// Built-in layout under `root`, with outputs written into `root` as well.
    pub fn for_root(root: &Path) -> Self {
        Self {
            install_root: root.to_path_buf(),
            data_dir: root.join("data"),
            prompts_dir: root.join("md_prompts"),
            output_dir: root.to_path_buf(),
            source: VersionProfile::modus_v1(),
            target: VersionProfile::modus_v2(),
            files: DataFiles::default(),
            gold_standard: "gold_standard.md".to_string(),
            config_file: None,
        }
    }

    /// Resolve the full configuration from flags, environment and the optional TOML file.
    pub fn resolve(cli: &CliOverrides) -> Result<Self, ConfigError> {
        let cwd = env::current_dir().map_err(ConfigError::CurrentDir)?;
        let root = cli
            .root
            .clone()
            .or_else(|| env_path(ROOT_ENV))
            .or_else(|| {
                env::current_exe()
                    .ok()
                    .as_deref()
                    .and_then(infer_root_from_exe)
            })
            .unwrap_or_else(|| cwd.clone());
        let root = absolutize(&cwd, &root);

        let mut config = Self::for_root(&root);
        config.output_dir = cwd.clone();

        let explicit = cli.config.clone().or_else(|| env_path(CONFIG_ENV));
        let config_path = match explicit {
            Some(path) => {
                let path = absolutize(&cwd, &path);
                if !path.is_file() {
                    return Err(ConfigError::MissingConfig { path });
                }
                Some(path)
            }
            None => Some(root.join(CONFIG_FILE_NAME)).filter(|p| p.is_file()),
        };
        if let Some(path) = config_path {
            let file = load_file_config(&path)?;
            config.apply_file(&root, file);
            config.config_file = Some(path);
        }

        if let Some(dir) = env_path(DATA_DIR_ENV) {
            config.data_dir = absolutize(&cwd, &dir);
        }
        if let Some(dir) = env_path(PROMPTS_DIR_ENV) {
            config.prompts_dir = absolutize(&cwd, &dir);
        }
        if let Some(dir) = env_path(OUTPUT_DIR_ENV) {
            config.output_dir = absolutize(&cwd, &dir);
        }

        if config.source.version == config.target.version {
            return Err(ConfigError::DuplicateVersion(config.source.version));
        }
        log::debug!("resolved config: {config:?}");
        Ok(config)
    }

    fn apply_file(&mut self, root: &Path, file: FileConfig) {
        if let Some(dir) = file.data_dir {
            self.data_dir = absolutize(root, &dir);
        }
        if let Some(dir) = file.prompts_dir {
            self.prompts_dir = absolutize(root, &dir);
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = absolutize(root, &dir);
        }
        if let Some(gold) = file.gold_standard {
            self.gold_standard = gold;
        }
        if let Some(source) = file.source {
            self.source.apply(source);
        }
        if let Some(target) = file.target {
            self.target.apply(target);
        }
        if let Some(files) = file.files {
            if let Some(mapping) = files.component_mapping {
                self.files.component_mapping = mapping;
            }
            if let Some(mui) = files.mui_mapping {
                self.files.mui_mapping = mui;
            }
            if let Some(mui) = files.mui_components {
                self.files.mui_components = mui;
            }
        }
    }

    /// Profile for a caller-supplied version string (`"2.0"`, `"2"`, `" 1.0 "`).
    pub fn profile(&self, version: &str) -> Option<&VersionProfile> {
        let wanted = version.trim();
        [&self.source, &self.target].into_iter().find(|profile| {
            profile.version == wanted
                || profile.version.strip_suffix(".0") == Some(wanted)
        })
    }

    pub fn known_versions(&self) -> Vec<&str> {
        vec![self.source.version.as_str(), self.target.version.as_str()]
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn infer_root_from_exe(exe_path: &Path) -> Option<PathBuf> {
    let exe = exe_path
        .canonicalize()
        .unwrap_or_else(|_| exe_path.to_path_buf());
    exe.parent()?
        .ancestors()
        .find(|candidate| candidate.join("data").is_dir())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ENV_MUTEX;
    use pretty_assertions::assert_eq;

    struct EnvGuard {
        saved: Vec<(String, Option<std::ffi::OsString>)>,
    }

    impl EnvGuard {
        fn new(keys: &[&str]) -> Self {
            let mut saved = Vec::new();
            for &key in keys {
                saved.push((key.to_string(), env::var_os(key)));
                env::remove_var(key);
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain(..) {
                match value {
                    Some(v) => env::set_var(&key, v),
                    None => env::remove_var(&key),
                }
            }
        }
    }

    const ALL_KEYS: &[&str] = &[
        ROOT_ENV,
        CONFIG_ENV,
        DATA_DIR_ENV,
        PROMPTS_DIR_ENV,
        OUTPUT_DIR_ENV,
    ];

    #[test]
    fn cli_root_sets_default_layout() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ALL_KEYS);
        let tmp = tempfile::tempdir().expect("tempdir");

        let config = ServerConfig::resolve(&CliOverrides {
            root: Some(tmp.path().to_path_buf()),
            config: None,
        })
        .expect("resolve");

        assert_eq!(config.install_root, tmp.path());
        assert_eq!(config.data_dir, tmp.path().join("data"));
        assert_eq!(config.prompts_dir, tmp.path().join("md_prompts"));
        assert_eq!(config.source.prefix, "modus-");
        assert_eq!(config.target.suffix, ".tsx");
        assert_eq!(config.config_file, None);
    }

    #[test]
    fn env_root_and_dir_overrides_apply() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ALL_KEYS);
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("out");

        env::set_var(ROOT_ENV, tmp.path());
        env::set_var(OUTPUT_DIR_ENV, &out);
        env::set_var(PROMPTS_DIR_ENV, tmp.path().join("prompts"));

        let config = ServerConfig::resolve(&CliOverrides::default()).expect("resolve");
        assert_eq!(config.install_root, tmp.path());
        assert_eq!(config.output_dir, out);
        assert_eq!(config.prompts_dir, tmp.path().join("prompts"));
    }

    #[test]
    fn toml_file_at_root_refines_profiles() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ALL_KEYS);
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
data_dir = "datasets"
gold_standard = "gold.md"

[target]
prefix = "acme-"
components_file = "acme.json"

[files]
component_mapping = "map.json"
"#,
        )
        .expect("write config");

        let config = ServerConfig::resolve(&CliOverrides {
            root: Some(tmp.path().to_path_buf()),
            config: None,
        })
        .expect("resolve");

        assert_eq!(config.data_dir, tmp.path().join("datasets"));
        assert_eq!(config.gold_standard, "gold.md");
        assert_eq!(config.target.prefix, "acme-");
        assert_eq!(config.target.suffix, ".tsx");
        assert_eq!(config.target.components_file, "acme.json");
        assert_eq!(config.files.component_mapping, "map.json");
        assert_eq!(config.files.mui_mapping, "mui/mui_to_modus_mapping.json");
        assert_eq!(config.config_file, Some(tmp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ALL_KEYS);
        let tmp = tempfile::tempdir().expect("tempdir");

        let err = ServerConfig::resolve(&CliOverrides {
            root: Some(tmp.path().to_path_buf()),
            config: Some(tmp.path().join("nope.toml")),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfig { .. }));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ALL_KEYS);
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "data_dri = \"x\"\n").unwrap();

        let err = ServerConfig::resolve(&CliOverrides {
            root: Some(tmp.path().to_path_buf()),
            config: None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseConfig { .. }));
    }

    #[test]
    fn profile_lookup_accepts_short_versions() {
        let config = ServerConfig::for_root(Path::new("/srv/modus"));
        assert_eq!(config.profile("1.0").map(|p| p.prefix.as_str()), Some("modus-"));
        assert_eq!(config.profile(" 2 ").map(|p| p.prefix.as_str()), Some("modus-wc-"));
        assert!(config.profile("3.0").is_none());
        assert_eq!(config.known_versions(), vec!["1.0", "2.0"]);
    }

    #[test]
    fn exe_root_is_nearest_ancestor_with_data() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bin_dir = tmp.path().join("install").join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::create_dir_all(tmp.path().join("install").join("data")).unwrap();
        let exe = bin_dir.join("modus-migrate-mcp");
        std::fs::write(&exe, "").unwrap();

        let root = infer_root_from_exe(&exe).expect("root");
        assert_eq!(
            root.canonicalize().unwrap(),
            tmp.path().join("install").canonicalize().unwrap()
        );
    }
}
