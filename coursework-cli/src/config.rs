use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CatalogConfig {
    pub dataset: Option<DatasetConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/projects.json"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub state_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

impl CatalogConfig {
    /// Load from `path`, or from [`get_config_path`] when none is given
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            write_default_config(&config_path)?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: CatalogConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dataset.clone().unwrap_or_default().path
    }

    pub fn state_dir(&self) -> PathBuf {
        self.storage.clone().unwrap_or_default().state_dir
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    let defaults = CatalogConfig {
        dataset: Some(DatasetConfig::default()),
        storage: Some(StorageConfig::default()),
    };
    let body = toml::to_string(&defaults)
        .map_err(|e| ConfigError::Message(format!("Failed to render default config: {e}")))?;

    let content = format!(
        "# Project catalog settings\n\
         # [dataset] path: published projects.json\n\
         # [storage] state_dir: where filters, favorites and handoffs are kept\n\n{body}"
    );

    std::fs::write(config_path, content)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("coursework").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

fn default_state_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("coursework")
    } else {
        PathBuf::from(".coursework")
    }
}
