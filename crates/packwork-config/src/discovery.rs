//! File-based project configuration.
//!
//! A project file, `packwork.toml`, holds one base configuration and any
//! number of named overlays:
//!
//! ```toml
//! [base]
//! entry_point = "./src/index.js"
//! output_template = "[name].[chunkhash].js"
//!
//! [[base.rules]]
//! pattern = "*.css"
//! chain = [{ loader = "extract" }, { loader = "css", modules = true }]
//!
//! [profiles.production]
//! mode = "production"
//! ```
//!
//! Values may be overridden with `PACKWORK_`-prefixed environment
//! variables, nesting on `__` (`PACKWORK_BASE__OUTPUT_TEMPLATE`).

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use toml::Table;

use crate::config::{BaseConfig, EffectiveConfig, Overlay};
use crate::error::{ConfigError, Result};
use crate::merge::merge;
use crate::profile::Profile;

pub const CONFIG_FILE_NAME: &str = "packwork.toml";

const ENV_PREFIX: &str = "PACKWORK_";

/// Base configuration plus its named overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub profiles: IndexMap<String, Overlay>,
}

impl ProjectConfig {
    /// Merge the overlay named `profile` onto the base.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ProfileNotFound`] when no overlay has that name, and
    /// any error of [`merge`].
    pub fn materialize(&self, profile: &str) -> Result<EffectiveConfig> {
        let overlay = self
            .profiles
            .get(profile)
            .ok_or_else(|| ConfigError::ProfileNotFound(profile.to_string()))?;
        tracing::debug!(profile, "materializing profile");
        merge(&self.base, overlay)
    }

    /// Like [`materialize`](Self::materialize), but a profile without an
    /// overlay falls back to an overlay that only sets the profile's mode.
    pub fn materialize_profile(&self, profile: Profile) -> Result<EffectiveConfig> {
        match self.profiles.get(profile.as_str()) {
            Some(overlay) => merge(&self.base, overlay),
            None => merge(&self.base, &Overlay::with_mode(profile.mode())),
        }
    }

    /// Profile names in declaration order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Locates and loads `packwork.toml`.
///
/// # Example
///
/// ```no_run
/// use packwork_config::ConfigDiscovery;
///
/// let project = ConfigDiscovery::new(".").load().unwrap();
/// let effective = project.materialize("production").unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a discovery rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the project file, if the root has one.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load the project file under the root.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when the root has no project file.
    pub fn load(&self) -> Result<ProjectConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        Self::load_from(&path)
    }

    /// Load a project file, layering environment overrides on top.
    ///
    /// Tables keep the order they are declared in, so profiles, `define`
    /// entries and `<meta>` tags come out as written.
    pub fn load_from(path: &Path) -> Result<ProjectConfig> {
        tracing::debug!(path = %path.display(), "loading project config");
        let source = fs::read_to_string(path)?;
        let invalid = |message: String| ConfigError::InvalidValue {
            field: path.display().to_string(),
            message,
        };

        let mut document: Table = toml::from_str(&source).map_err(|err| invalid(err.to_string()))?;
        for (key, raw) in Env::prefixed(ENV_PREFIX).split("__").iter() {
            let Ok(parsed) = raw.parse::<figment::value::Value>();
            let value = toml::Value::try_from(parsed).map_err(|err| invalid(err.to_string()))?;
            tracing::trace!(key = key.as_str(), "applying environment override");
            let segments: Vec<&str> = key.as_str().split('.').collect();
            insert_path(&mut document, &segments, value);
        }

        document.try_into().map_err(|err: toml::de::Error| invalid(err.to_string()))
    }

    /// Load the project file and materialize the named profile.
    pub fn load_with_profile(&self, profile: &str) -> Result<EffectiveConfig> {
        self.load()?.materialize(profile)
    }
}

/// Set `value` at a dotted key path, replacing non-table intermediates.
fn insert_path(table: &mut Table, path: &[&str], value: toml::Value) {
    match path {
        [] => {}
        [last] => {
            table.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = table
                .entry(*head)
                .or_insert_with(|| toml::Value::Table(Table::new()));
            match entry {
                toml::Value::Table(next) => insert_path(next, rest, value),
                other => {
                    let mut next = Table::new();
                    insert_path(&mut next, rest, value);
                    *other = toml::Value::Table(next);
                }
            }
        }
    }
}
