//! Whole-file text I/O with an optional age-based read cache
//!
//! `TextFileIO` reads and writes a single file synchronously. Reads return
//! a string-shaped `GenericDataContainer` named after the file's uri;
//! writes render the container's value as flat text (JSON for mapping and
//! sequence shapes). A warm cache younger than the configured maximum age
//! short-circuits re-reads unless the caller forces one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::CacheSettings;
use crate::container::{ContainerData, DataKind, GenericDataContainer};
use crate::constants::DEFAULT_CACHE_MAX_AGE_SECS;
use crate::error::{SharedError, SharedResult};
use crate::persistence::processor::IoProcessor;
use crate::value::Value;

/// Options for a read operation
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Ignore and clear any cached data, forcing a filesystem read
    pub force: bool,
}

/// Synchronous whole-file text reader/writer for data containers
#[derive(Debug)]
pub struct TextFileIO {
    uri: PathBuf,
    enable_cache: bool,
    cache_max_age: i64,
    cached_data: Option<String>,
    cached_at: i64,
}

impl TextFileIO {
    /// Create a file collaborator for `file_name` under `folder`
    pub fn new(folder: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            uri: folder.as_ref().join(file_name),
            enable_cache: false,
            cache_max_age: DEFAULT_CACHE_MAX_AGE_SECS,
            cached_data: None,
            cached_at: 0,
        }
    }

    /// Enable the read cache with the given maximum age in seconds
    pub fn with_cache(mut self, max_age_secs: i64) -> Self {
        self.enable_cache = true;
        self.cache_max_age = max_age_secs;
        self
    }

    /// Apply cache settings from the configuration layer
    pub fn with_cache_settings(mut self, settings: &CacheSettings) -> Self {
        self.enable_cache = settings.enabled;
        self.cache_max_age = settings.max_age_secs as i64;
        self
    }

    /// The path this collaborator reads and writes
    pub fn uri(&self) -> &Path {
        &self.uri
    }

    /// Read the whole file into a string-shaped container
    ///
    /// With the cache enabled, a cached read younger than the maximum age
    /// is returned without touching the filesystem. `ReadOptions::force`
    /// bypasses and clears the cache.
    pub fn read(
        &mut self,
        processor: Option<&dyn IoProcessor>,
        options: &ReadOptions,
    ) -> SharedResult<GenericDataContainer> {
        if self.enable_cache {
            let now = utc_timestamp();
            if options.force {
                info!("cache reset forced for {}", self.uri.display());
            } else if let Some(cached) = &self.cached_data {
                if now - self.cached_at < self.cache_max_age {
                    info!("returning cached value for {}", self.uri.display());
                    let cached = cached.clone();
                    return self.build_container(&cached);
                }
            }
            self.cached_data = None;
            self.cached_at = 0;
        }

        let content = fs::read_to_string(&self.uri)?;
        info!("{} bytes read from {}", content.len(), self.uri.display());

        if self.enable_cache {
            self.cached_data = Some(content.clone());
            self.cached_at = utc_timestamp();
            debug!("cache updated for {}", self.uri.display());
        }

        let container = self.build_container(&content)?;
        if let Some(processor) = processor {
            info!("running read processor for {}", self.uri.display());
            processor.process(&container)?;
        }
        Ok(container)
    }

    /// Render a container's value as text and write it whole-file
    ///
    /// Mapping-shaped containers are written as JSON; list and tuple
    /// shapes as JSON arrays; everything else as its flat text rendering.
    pub fn write(
        &mut self,
        data: &GenericDataContainer,
        processor: Option<&dyn IoProcessor>,
    ) -> SharedResult<()> {
        let content = render_text(data)?;
        fs::write(&self.uri, &content)?;
        info!("{} bytes written to {}", content.len(), self.uri.display());

        if self.enable_cache {
            self.cached_data = Some(content);
            self.cached_at = utc_timestamp();
        }

        if let Some(processor) = processor {
            info!("running write processor for {}", self.uri.display());
            processor.process(data)?;
        }
        Ok(())
    }

    fn build_container(&self, content: &str) -> SharedResult<GenericDataContainer> {
        let mut container =
            GenericDataContainer::new(self.uri.display().to_string(), DataKind::String);
        container.store(Value::from(content), None)?;
        Ok(container)
    }
}

/// Render a container's payload as the text form used on disk
fn render_text(data: &GenericDataContainer) -> SharedResult<String> {
    match data.data() {
        ContainerData::Text(text) => Ok(text.clone().unwrap_or_default()),
        ContainerData::Integer(i) => Ok(i.to_string()),
        ContainerData::Float(v) => Ok(v.to_string()),
        ContainerData::Decimal(d) => Ok(d.to_string()),
        ContainerData::List(items) | ContainerData::Tuple { items, .. } => {
            serde_json::to_string(items).map_err(|e| SharedError::Serialization {
                message: e.to_string(),
            })
        }
        ContainerData::Mapping(entries) => {
            serde_json::to_string(entries).map_err(|e| SharedError::Serialization {
                message: e.to_string(),
            })
        }
    }
}

fn utc_timestamp() -> i64 {
    Utc::now().timestamp()
}
